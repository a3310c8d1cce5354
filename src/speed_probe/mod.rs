pub mod body;
pub mod error;
pub mod probe;
pub mod report;
pub mod result;
pub mod thresholds;

#[cfg(test)]
pub(crate) mod test_server;

pub mod prelude {
    pub use super::error::ProbeError;
    pub use super::probe::{FOLLOW_UP_REQUESTS, probe_speed, run_probe};
    pub use super::result::{ProbeReport, ResponseHeaders, SpeedResult, TtfbStats};
    pub use super::thresholds::Tier;
}

use std::fmt::Write;

/// Formats an error together with every error in its `source()` chain.
pub fn describe_error(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
