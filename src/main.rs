pub mod config;
pub mod speed_probe;

use config::app_config::{REQUEST_TIMEOUT, load_config, setup_client};
use speed_probe::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = load_config();

    let client = match setup_client(&app_config.user_agent, REQUEST_TIMEOUT) {
        Ok(client) => client,
        Err(e) => {
            println!("❌ Failed to create HTTP client: {e}");
            log::error!("Failed to create HTTP client: {e}");
            return;
        }
    };

    let Some(result) = probe_speed(&client, &app_config.target_url).await else {
        return;
    };

    println!("\n✅ Test completed successfully!");
    println!("\nRaw Data (JSON):");
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize result: {e}"),
    }
}
