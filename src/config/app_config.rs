use std::env;
use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_TARGET_URL: &str = "https://digital-canvas-liart.vercel.app/";
pub const DEFAULT_USER_AGENT: &str = "speedprobe/1.0";

/// Every request gives up after this long, including the body download.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct AppConfig {
    pub target_url: String,
    pub user_agent: String,
}

/// Load the application configuration from an optional `.env` file and environment variables.
/// `SPEED_PROBE_URL` overrides the target URL and `SPEED_PROBE_USER_AGENT` the user agent.
pub fn load_config() -> AppConfig {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("Ignoring unreadable .env file: {e}");
        }
    }

    let target_url =
        env::var("SPEED_PROBE_URL").unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string());
    let user_agent =
        env::var("SPEED_PROBE_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

    log::info!("Using target URL: {}", target_url);

    AppConfig {
        target_url,
        user_agent,
    }
}

/// Setup the HTTP client shared by all probe requests.
pub fn setup_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}
