// src/handlers/dashboard.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::dashboard::Dashboard;
use crate::services::key_status::KeyStatusMonitor;
use crate::views;

/// Render the dashboard. The first request after startup finds no data and
/// triggers the initial fetch; after a failed first load every render
/// retries it, which is what the error view's retry control does.
pub async fn get_dashboard(
    dashboard: Arc<Dashboard>,
    keys: Arc<KeyStatusMonitor>,
) -> Result<Json, Rejection> {
    info!("Handling request to render the dashboard");

    if !dashboard.has_data().await {
        info!("No vendor data loaded yet, fetching");
        dashboard.refresh().await;
    }

    render(dashboard, keys).await
}

/// Manual refresh: always re-fetch, then render whatever state resulted.
pub async fn refresh_dashboard(
    dashboard: Arc<Dashboard>,
    keys: Arc<KeyStatusMonitor>,
) -> Result<Json, Rejection> {
    info!("Handling manual dashboard refresh");
    dashboard.refresh().await;
    render(dashboard, keys).await
}

async fn render(
    dashboard: Arc<Dashboard>,
    keys: Arc<KeyStatusMonitor>,
) -> Result<Json, Rejection> {
    let state = dashboard.snapshot().await;
    let key_snapshot = keys.snapshot().await;
    Ok(warp::reply::json(&views::dashboard_view(
        &state,
        &key_snapshot,
    )))
}
