// src/handlers/keys.rs
use log::{error, info};
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::key_status::KeyStatusMonitor;
use crate::services::vendor_api::VendorApi;
use crate::views;

/// Key status for the widget and the management panel. The panel fetches on
/// open, so this refreshes before replying; the 30-second poll keeps the
/// widget copy warm between requests.
pub async fn get_key_status(keys: Arc<KeyStatusMonitor>) -> Result<Json, Rejection> {
    info!("Handling request for key status");
    keys.refresh().await;
    let snapshot = keys.snapshot().await;
    Ok(warp::reply::json(&views::key_status_view(&snapshot)))
}

/// Reset the backend's key blacklist, then re-fetch the status so the panel
/// shows the new counts. No optimistic update.
pub async fn reset_key_blacklist(
    api: VendorApi,
    keys: Arc<KeyStatusMonitor>,
) -> Result<Json, Rejection> {
    info!("Handling key blacklist reset");

    match api.reset_key_blacklist().await {
        Ok(()) => {
            keys.refresh().await;
            Ok(warp::reply::json(&json!({
                "success": true,
                "message": "Key blacklist reset successfully"
            })))
        }
        Err(e) => {
            error!("Failed to reset key blacklist: {}", e);
            Err(warp::reject::custom(ApiError::upstream(e.to_string())))
        }
    }
}

/// The backend has no endpoint that clears its cache; this only re-fetches
/// the statistics. Kept as-is rather than inventing new semantics.
pub async fn clear_cache(keys: Arc<KeyStatusMonitor>) -> Result<Json, Rejection> {
    info!("Handling cache clear request (stats refresh only)");
    keys.refresh().await;
    Ok(warp::reply::json(&json!({
        "success": true,
        "message": "Cache statistics refreshed"
    })))
}
