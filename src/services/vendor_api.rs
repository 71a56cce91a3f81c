// src/services/vendor_api.rs
use log::{error, info};
use reqwest::Client;

use crate::models::{ApiEnvelope, KeyStats, VendorsData};
use crate::BoxError;

pub type Result<T> = std::result::Result<T, BoxError>;

/// Fallback shown when the backend gives us neither an error message nor a
/// usable payload.
pub const FETCH_VENDORS_FALLBACK: &str = "Failed to fetch vendor data";
pub const KEY_STATUS_FALLBACK: &str = "Cache status unavailable";

/// HTTP client for the vendor data backend. Cheap to clone; all requests
/// share one connection pool.
#[derive(Clone)]
pub struct VendorApi {
    client: Client,
    base_url: String,
}

impl VendorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        VendorApi {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the vendor dataset and its precomputed analysis. The error
    /// message is resolved here with a fixed precedence: server-provided
    /// error field, then transport error text, then a generic fallback.
    pub async fn fetch_vendors(&self) -> Result<VendorsData> {
        let url = format!("{}/vendors", self.base_url);
        info!("Fetching vendor data from {}", url);

        let response = self.client.get(&url).send().await?;
        let envelope: ApiEnvelope<VendorsData> = response
            .json()
            .await
            .map_err(|_| FETCH_VENDORS_FALLBACK)?;

        if envelope.success {
            envelope.data.ok_or_else(|| FETCH_VENDORS_FALLBACK.into())
        } else {
            let message = envelope
                .error
                .unwrap_or_else(|| FETCH_VENDORS_FALLBACK.to_string());
            error!("Vendor backend reported failure: {}", message);
            Err(message.into())
        }
    }

    /// Fetch advisory key-rotation and cache metrics.
    pub async fn fetch_key_status(&self) -> Result<KeyStats> {
        let url = format!("{}/keys/status", self.base_url);
        let response = self.client.get(&url).send().await?;
        let envelope: ApiEnvelope<KeyStats> =
            response.json().await.map_err(|_| KEY_STATUS_FALLBACK)?;

        if envelope.success {
            envelope.data.ok_or_else(|| KEY_STATUS_FALLBACK.into())
        } else {
            Err(envelope
                .error
                .unwrap_or_else(|| KEY_STATUS_FALLBACK.to_string())
                .into())
        }
    }

    /// Ask the backend to clear its API-key blacklist.
    pub async fn reset_key_blacklist(&self) -> Result<()> {
        let url = format!("{}/keys/reset", self.base_url);
        info!("Resetting key blacklist via {}", url);

        let response = self.client.post(&url).send().await?;
        let envelope: ApiEnvelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|_| "Failed to reset key blacklist")?;

        if envelope.success {
            Ok(())
        } else {
            Err(envelope
                .error
                .unwrap_or_else(|| "Failed to reset key blacklist".to_string())
                .into())
        }
    }

    /// Download the backend-generated comparison CSV. The bytes pass through
    /// unchanged; only single-vendor exports are assembled client-side.
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let url = format!("{}/vendors/export/csv", self.base_url);
        info!("Downloading comparison CSV from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err("Failed to export CSV".into());
        }
        Ok(response.bytes().await?.to_vec())
    }
}
