// src/handlers/export.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Response;
use warp::{Rejection, Reply};

use super::error::ApiError;
use crate::services::dashboard::Dashboard;
use crate::services::export::vendor_statistics_csv;
use crate::services::vendor_api::VendorApi;

/// Proxy the backend-generated comparison CSV through to the browser as a
/// file download.
pub async fn export_comparison_csv(api: VendorApi) -> Result<impl Reply, Rejection> {
    info!("Handling comparison CSV export");

    let bytes = api.export_csv().await.map_err(|e| {
        error!("CSV export failed: {}", e);
        warp::reject::custom(ApiError::upstream(e.to_string()))
    })?;

    Ok(csv_download(bytes, "vendor_comparison.csv"))
}

/// Build the single-vendor statistics CSV from the currently loaded
/// comparison table.
pub async fn export_vendor_statistics(
    symbol: String,
    dashboard: Arc<Dashboard>,
) -> Result<impl Reply, Rejection> {
    info!("Handling statistics export for vendor {}", symbol);

    let state = dashboard.snapshot().await;
    let export = state
        .analysis
        .as_ref()
        .and_then(|analysis| {
            analysis
                .comparison_table
                .iter()
                .find(|row| row.symbol.eq_ignore_ascii_case(&symbol))
        })
        .ok_or_else(|| {
            warp::reject::custom(ApiError::not_found(format!(
                "No vendor data loaded for symbol {}",
                symbol
            )))
        })
        .and_then(|vendor| {
            vendor_statistics_csv(vendor).map_err(|e| {
                error!("Failed to build vendor CSV: {}", e);
                warp::reject::custom(ApiError::new(e.to_string()))
            })
        })?;

    Ok(csv_download(export.content, &export.filename))
}

fn csv_download(bytes: Vec<u8>, filename: &str) -> impl Reply {
    let response = Response::new(bytes.into());
    let response = warp::reply::with_header(response, "content-type", "text/csv; charset=utf-8");
    warp::reply::with_header(
        response,
        "content-disposition",
        format!("attachment; filename=\"{}\"", filename),
    )
}
