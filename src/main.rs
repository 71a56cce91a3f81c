use dotenv::dotenv;
use env_logger;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use vendor_dashboard::config::AppConfig;
use vendor_dashboard::routes;
use vendor_dashboard::services::dashboard::Dashboard;
use vendor_dashboard::services::key_status::{spawn_poller, KeyStatusMonitor};
use vendor_dashboard::services::vendor_api::VendorApi;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the dashboard service...");

    let config = AppConfig::from_env();
    info!("Using vendor backend at {}", config.api_base_url);

    // Bind to 0.0.0.0 for hosted environments
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let api = VendorApi::new(config.api_base_url.clone());
    let dashboard = Arc::new(Dashboard::new(api.clone()));
    let keys = Arc::new(KeyStatusMonitor::new(api.clone()));

    // Background key-status poll, cancelled explicitly at shutdown
    let poller = spawn_poller(keys.clone());

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    // Set up routes
    let api_routes = routes::routes(dashboard, keys, api).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    let (bound, server) = warp::serve(api_routes).bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
    });
    info!("Server listening on {}", bound);
    server.await;

    info!("Server stopped, shutting down status poller");
    poller.stop().await;
}
