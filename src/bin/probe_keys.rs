use dotenv::dotenv;
use env_logger;
use log::{error, info};

use vendor_dashboard::config::AppConfig;
use vendor_dashboard::services::vendor_api::VendorApi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    info!("Probing key status at {}", config.api_base_url);

    let api = VendorApi::new(config.api_base_url);
    match api.fetch_key_status().await {
        Ok(stats) => {
            info!("Total keys: {}", stats.total_keys);
            info!("Available keys: {}", stats.available_keys);
            info!("Blacklisted keys: {}", stats.blacklisted_keys);
            info!("Cache size: {:.2} MB", stats.cache_size_mb);
        }
        Err(e) => {
            error!("Key status fetch failed: {}", e);
        }
    }

    Ok(())
}
