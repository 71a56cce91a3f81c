use dotenv::dotenv;
use env_logger;
use log::{error, info};

use vendor_dashboard::config::AppConfig;
use vendor_dashboard::services::vendor_api::VendorApi;
use vendor_dashboard::views::table_row;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    info!("Probing vendor backend at {}", config.api_base_url);

    let api = VendorApi::new(config.api_base_url);
    match api.fetch_vendors().await {
        Ok(data) => {
            let analysis = &data.analysis;
            info!("Fetched {} comparison rows", analysis.comparison_table.len());
            for insight in &analysis.insights {
                info!("Insight: {}", insight);
            }
            for vendor in &analysis.comparison_table {
                let row = table_row(vendor);
                info!(
                    "{} ({}) [{}] revenue={} pe={} roe={} flags={}{}",
                    row.name,
                    row.symbol,
                    row.category,
                    row.revenue,
                    row.pe_ratio,
                    row.roe,
                    row.flags,
                    if row.warning { " [WARNING]" } else { "" },
                );
            }
        }
        Err(e) => {
            error!("Vendor fetch failed: {}", e);
        }
    }

    Ok(())
}
