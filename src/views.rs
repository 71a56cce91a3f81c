// src/views.rs
//
// View models for the dashboard page. Everything here is a pure function of
// the state snapshots it is given; the browser page renders these verbatim.
use serde::Serialize;

use crate::models::{AnalysisResult, KeyStats, VendorRecord};
use crate::services::charts::{self, CategorySlice, ChartPoint};
use crate::services::dashboard::DashboardState;
use crate::services::flags;
use crate::services::format::format_metric;
use crate::services::key_status::KeyStatusSnapshot;

pub const DASHBOARD_TITLE: &str = "Vendor Analysis";
pub const DASHBOARD_SUBTITLE: &str = "Analyze potential vendors for sensors and materials";

/// Route the page retries against when the first load fails.
pub const REFRESH_ROUTE: &str = "/api/v1/refresh";

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    /// First load still in flight, nothing to show yet.
    Loading,
    /// A fetch failed before any data ever loaded; this replaces the whole
    /// page and carries the retry binding.
    Error { message: String, retry: &'static str },
    Dashboard(DashboardPage),
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub last_updated: Option<String>,
    /// True while a refresh is outstanding; the page disables the refresh
    /// control and shows its updating overlay.
    pub updating: bool,
    /// Non-blocking error from the latest failed refresh; stale data below
    /// remains visible.
    pub error: Option<String>,
    pub insights: Vec<String>,
    pub charts: Option<ChartsView>,
    pub table: Option<TableView>,
    pub key_status: KeyStatusView,
}

#[derive(Debug, Serialize)]
pub struct ChartsView {
    pub revenue: Vec<ChartPoint>,
    pub pe_ratio: Vec<ChartPoint>,
    pub roe: Vec<ChartPoint>,
    pub categories: Vec<CategorySlice>,
}

#[derive(Debug, Serialize)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub vendor_count: usize,
}

/// One table row with every metric already formatted for display.
#[derive(Debug, Serialize)]
pub struct TableRow {
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub market_cap: String,
    pub revenue: String,
    pub pe_ratio: String,
    pub roe: String,
    pub debt_to_equity: String,
    pub current_ratio: String,
    pub dividend_yield: String,
    pub operating_margin: String,
    pub profit_margin: String,
    pub price_to_sales: String,
    pub ev_to_ebitda: String,
    pub flags: String,
    pub warning: bool,
    pub tooltip: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeyStatusView {
    /// No fetch attempt has finished yet.
    Loading,
    Unavailable,
    Ready {
        total_keys: u32,
        available_keys: u32,
        blacklisted_keys: u32,
        keys_available: bool,
        cache_size_mb: String,
    },
}

pub fn dashboard_view(state: &DashboardState, keys: &KeyStatusSnapshot) -> DashboardView {
    if state.analysis.is_none() {
        if state.loading {
            return DashboardView::Loading;
        }
        if let Some(message) = &state.error {
            return DashboardView::Error {
                message: message.clone(),
                retry: REFRESH_ROUTE,
            };
        }
    }

    let (insights, charts, table) = match &state.analysis {
        Some(analysis) => (
            analysis.insights.clone(),
            Some(charts_view(analysis)),
            Some(table_view(analysis)),
        ),
        None => (Vec::new(), None, None),
    };

    DashboardView::Dashboard(DashboardPage {
        title: DASHBOARD_TITLE,
        subtitle: DASHBOARD_SUBTITLE,
        last_updated: state.last_updated.clone(),
        updating: state.loading,
        error: state.error.clone(),
        insights,
        charts,
        table,
        key_status: key_status_view(keys),
    })
}

pub fn charts_view(analysis: &AnalysisResult) -> ChartsView {
    let table = &analysis.comparison_table;
    ChartsView {
        revenue: charts::revenue_series(table),
        pe_ratio: charts::pe_ratio_series(table),
        roe: charts::roe_series(table),
        categories: charts::category_distribution(table),
    }
}

pub fn table_view(analysis: &AnalysisResult) -> TableView {
    let rows: Vec<TableRow> = analysis.comparison_table.iter().map(table_row).collect();
    let vendor_count = rows.len();
    TableView { rows, vendor_count }
}

pub fn table_row(vendor: &VendorRecord) -> TableRow {
    let flag_string = vendor.flag_string();
    TableRow {
        symbol: vendor.symbol.clone(),
        name: vendor.name.clone(),
        category: vendor.category.clone(),
        market_cap: format_metric(vendor.market_cap),
        revenue: format_metric(vendor.revenue),
        pe_ratio: format_metric(vendor.pe_ratio),
        roe: format_metric(vendor.roe),
        debt_to_equity: format_metric(vendor.debt_to_equity),
        current_ratio: format_metric(vendor.current_ratio),
        dividend_yield: format_metric(vendor.dividend_yield),
        operating_margin: format_metric(vendor.operating_margin),
        profit_margin: format_metric(vendor.profit_margin),
        price_to_sales: format_metric(vendor.price_to_sales),
        ev_to_ebitda: format_metric(vendor.ev_to_ebitda),
        flags: flag_string.to_string(),
        warning: flags::has_warning_flags(flag_string),
        tooltip: flags::flag_tooltip(flag_string),
    }
}

pub fn key_status_view(snapshot: &KeyStatusSnapshot) -> KeyStatusView {
    if !snapshot.attempted && snapshot.stats.is_none() {
        return KeyStatusView::Loading;
    }
    match &snapshot.stats {
        None => KeyStatusView::Unavailable,
        Some(stats) => ready_key_status(stats),
    }
}

fn ready_key_status(stats: &KeyStats) -> KeyStatusView {
    KeyStatusView::Ready {
        total_keys: stats.total_keys,
        available_keys: stats.available_keys,
        blacklisted_keys: stats.blacklisted_keys,
        keys_available: stats.available_keys > 0,
        cache_size_mb: format!("{:.2}", stats.cache_size_mb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;
    use serde_json::Value;

    fn record(symbol: &str, flags: Option<&str>) -> VendorRecord {
        VendorRecord {
            symbol: symbol.to_string(),
            name: format!("{} Corp", symbol),
            category: "Sensors".to_string(),
            market_cap: Some(12.345),
            revenue: Some(4.0),
            pe_ratio: None,
            roe: Some(15.0),
            debt_to_equity: Some(0.4),
            current_ratio: Some(1.8),
            dividend_yield: Some(1.25),
            operating_margin: Some(10.0),
            profit_margin: Some(7.5),
            price_to_sales: Some(2.0),
            ev_to_ebitda: Some(13.0),
            flags: flags.map(str::to_string),
        }
    }

    fn analysis(rows: Vec<VendorRecord>) -> AnalysisResult {
        AnalysisResult {
            comparison_table: rows,
            insights: vec!["Highest revenue: TEL Corp (TEL) with $4.0B".to_string()],
            flags: Value::Null,
        }
    }

    fn state_with(analysis_result: Option<AnalysisResult>) -> DashboardState {
        let mut state = DashboardState::default();
        state.analysis = analysis_result;
        state
    }

    #[test]
    fn table_rows_format_metrics_and_flags() {
        let row = table_row(&record("TEL", Some("HIGH_PE, UNKNOWN_CODE")));
        assert_eq!(row.market_cap, "12.35");
        assert_eq!(row.pe_ratio, "N/A");
        assert!(row.warning);
        assert_eq!(row.tooltip, "High P/E Ratio (> 30), UNKNOWN_CODE");
    }

    #[test]
    fn flagless_rows_never_warn() {
        let row = table_row(&record("TEL", None));
        assert!(!row.warning);
        assert_eq!(row.flags, "None");
        assert_eq!(row.tooltip, "");

        let row = table_row(&record("ST", Some("API_ERROR")));
        assert!(!row.warning);
        assert_eq!(row.tooltip, "API Error");
    }

    #[test]
    fn first_load_failure_renders_blocking_error() {
        let mut state = state_with(None);
        state.error = Some("rate limited".to_string());

        match dashboard_view(&state, &KeyStatusSnapshot::default()) {
            DashboardView::Error { message, retry } => {
                assert_eq!(message, "rate limited");
                assert_eq!(retry, REFRESH_ROUTE);
            }
            other => panic!("expected blocking error view, got {:?}", other),
        }
    }

    #[test]
    fn later_failures_keep_stale_data_inline() {
        let mut state = state_with(Some(analysis(vec![record("TEL", None)])));
        state.error = Some("rate limited".to_string());

        match dashboard_view(&state, &KeyStatusSnapshot::default()) {
            DashboardView::Dashboard(page) => {
                assert_eq!(page.error.as_deref(), Some("rate limited"));
                let table = page.table.expect("stale table still rendered");
                assert_eq!(table.vendor_count, 1);
            }
            other => panic!("expected dashboard view, got {:?}", other),
        }
    }

    #[test]
    fn loading_without_data_renders_spinner() {
        let mut state = state_with(None);
        state.loading = true;
        assert!(matches!(
            dashboard_view(&state, &KeyStatusSnapshot::default()),
            DashboardView::Loading
        ));
    }

    #[test]
    fn key_status_states() {
        assert!(matches!(
            key_status_view(&KeyStatusSnapshot::default()),
            KeyStatusView::Loading
        ));
        assert!(matches!(
            key_status_view(&KeyStatusSnapshot {
                attempted: true,
                stats: None
            }),
            KeyStatusView::Unavailable
        ));
        match key_status_view(&KeyStatusSnapshot {
            attempted: true,
            stats: Some(KeyStats {
                total_keys: 5,
                available_keys: 0,
                blacklisted_keys: 5,
                cache_size_mb: 1.234,
            }),
        }) {
            KeyStatusView::Ready {
                keys_available,
                cache_size_mb,
                ..
            } => {
                assert!(!keys_available);
                assert_eq!(cache_size_mb, "1.23");
            }
            other => panic!("expected ready status, got {:?}", other),
        }
    }
}
