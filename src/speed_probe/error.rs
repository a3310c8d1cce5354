use thiserror::Error;

/// Any failure that aborts a speed probe.
///
/// There is a single failure class: the probe either completes all of its
/// requests or reports one of these and returns no result. Causes are left to
/// the `source()` chain.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("malformed response body")]
    Body(#[source] std::io::Error),
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ProbeError::Request(e) => e.is_timeout(),
            ProbeError::InvalidUrl { .. } | ProbeError::Body(_) => false,
        }
    }
}
