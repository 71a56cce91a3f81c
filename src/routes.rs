// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;

use crate::handlers::{
    dashboard::{get_dashboard, refresh_dashboard},
    export::{export_comparison_csv, export_vendor_statistics},
    keys::{clear_cache, get_key_status, reset_key_blacklist},
};
use crate::services::dashboard::Dashboard;
use crate::services::key_status::KeyStatusMonitor;
use crate::services::vendor_api::VendorApi;
use log::info;

use crate::handlers::error::ApiError;
use std::convert::Infallible;
use warp::{Filter, Reply};

// Map our custom errors (and anything else that slipped through) to a JSON
// error body
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    dashboard: Arc<Dashboard>,
    keys: Arc<KeyStatusMonitor>,
    api: VendorApi,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let dashboard_filter = warp::any().map(move || dashboard.clone());
    let keys_filter = warp::any().map(move || keys.clone());
    let api_filter = warp::any().map(move || api.clone());

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(dashboard_filter.clone())
        .and(keys_filter.clone())
        .and_then(get_dashboard);

    let refresh_route = warp::path!("api" / "v1" / "refresh")
        .and(warp::post())
        .and(dashboard_filter.clone())
        .and(keys_filter.clone())
        .and_then(refresh_dashboard);

    let export_route = warp::path!("api" / "v1" / "export" / "csv")
        .and(warp::get())
        .and(api_filter.clone())
        .and_then(export_comparison_csv);

    let vendor_export_route = warp::path!("api" / "v1" / "vendors" / String / "export")
        .and(warp::get())
        .and(dashboard_filter.clone())
        .and_then(export_vendor_statistics);

    let key_status_route = warp::path!("api" / "v1" / "keys" / "status")
        .and(warp::get())
        .and(keys_filter.clone())
        .and_then(get_key_status);

    let key_reset_route = warp::path!("api" / "v1" / "keys" / "reset")
        .and(warp::post())
        .and(api_filter.clone())
        .and(keys_filter.clone())
        .and_then(reset_key_blacklist);

    let cache_clear_route = warp::path!("api" / "v1" / "cache" / "clear")
        .and(warp::post())
        .and(keys_filter.clone())
        .and_then(clear_cache);

    info!("All routes configured successfully.");

    dashboard_route
        .or(refresh_route)
        .or(export_route)
        .or(vendor_export_route)
        .or(key_status_route)
        .or(key_reset_route)
        .or(cache_clear_route)
        .recover(handle_rejection)
}
