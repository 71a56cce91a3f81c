// src/services/dashboard.rs
use chrono::Local;
use log::{error, info, warn};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::models::{AnalysisResult, VendorsData};
use crate::services::vendor_api::VendorApi;

/// The dashboard's whole view state. Handlers take immutable snapshots of
/// this; only fetch outcomes mutate it.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub vendors: Option<Value>,
    pub analysis: Option<AnalysisResult>,
    /// Inline error from the most recent failed fetch. Blocks the page only
    /// while no data has ever loaded; afterwards stale data stays visible.
    pub error: Option<String>,
    /// Busy flag for disabling the refresh control while a request is out.
    pub loading: bool,
    pub last_updated: Option<String>,
    applied_seq: u64,
}

/// Holds the fetched analysis and serializes fetch outcomes. Requests are not
/// deduplicated; instead each fetch gets a monotonically increasing sequence
/// number and an outcome older than the last applied one is discarded, so a
/// slow response cannot overwrite a newer one.
pub struct Dashboard {
    api: VendorApi,
    state: RwLock<DashboardState>,
    next_seq: AtomicU64,
}

impl Dashboard {
    pub fn new(api: VendorApi) -> Self {
        Dashboard {
            api,
            state: RwLock::new(DashboardState::default()),
            next_seq: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn has_data(&self) -> bool {
        self.state.read().await.analysis.is_some()
    }

    /// Fetch the vendor dataset and apply the outcome to shared state.
    pub async fn refresh(&self) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
        }
        info!("Refreshing vendor data (request #{})", seq);

        let outcome = self
            .api
            .fetch_vendors()
            .await
            .map_err(|e| e.to_string());
        self.apply_outcome(seq, outcome).await;
    }

    /// Apply one fetch outcome. Success replaces the analysis wholesale and
    /// stamps the last-updated time; failure records an inline error and
    /// leaves previously loaded data in place.
    pub async fn apply_outcome(&self, seq: u64, outcome: Result<VendorsData, String>) {
        let mut state = self.state.write().await;
        state.loading = false;

        if seq < state.applied_seq {
            warn!(
                "Discarding stale vendor response #{} (already applied #{})",
                seq, state.applied_seq
            );
            return;
        }
        state.applied_seq = seq;

        match outcome {
            Ok(data) => {
                let rows = data.analysis.comparison_table.len();
                state.vendors = Some(data.vendors);
                state.analysis = Some(data.analysis);
                state.error = None;
                state.last_updated =
                    Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
                info!("Applied vendor data #{} ({} rows)", seq, rows);
            }
            Err(message) => {
                error!("Vendor data fetch #{} failed: {}", seq, message);
                state.error = Some(message);
            }
        }
    }
}
