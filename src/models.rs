// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a successful `/vendors` fetch. `vendors` is the raw per-symbol
/// data blob; the dashboard only renders the precomputed `analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorsData {
    #[serde(default)]
    pub vendors: Value,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub comparison_table: Vec<VendorRecord>,
    #[serde(default)]
    pub insights: Vec<String>,
    // Per-symbol flag lists; the table rows carry their own Flags string,
    // so this is only checked for presence.
    #[serde(default)]
    pub flags: Value,
}

/// One row of the comparison table, keyed by `Symbol` (unique per analysis).
/// Field names match the wire format exactly. Numeric fields may arrive
/// absent, null, or as non-numeric strings; all of those become `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRecord {
    #[serde(rename = "Symbol", default)]
    pub symbol: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Market Cap ($B)", default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(rename = "Revenue ($B)", default, deserialize_with = "lenient_f64")]
    pub revenue: Option<f64>,
    #[serde(rename = "P/E Ratio", default, deserialize_with = "lenient_f64")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "ROE (%)", default, deserialize_with = "lenient_f64")]
    pub roe: Option<f64>,
    #[serde(rename = "Debt/Equity", default, deserialize_with = "lenient_f64")]
    pub debt_to_equity: Option<f64>,
    #[serde(rename = "Current Ratio", default, deserialize_with = "lenient_f64")]
    pub current_ratio: Option<f64>,
    #[serde(rename = "Dividend Yield (%)", default, deserialize_with = "lenient_f64")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "Operating Margin (%)", default, deserialize_with = "lenient_f64")]
    pub operating_margin: Option<f64>,
    #[serde(rename = "Profit Margin (%)", default, deserialize_with = "lenient_f64")]
    pub profit_margin: Option<f64>,
    #[serde(rename = "Price/Sales", default, deserialize_with = "lenient_f64")]
    pub price_to_sales: Option<f64>,
    #[serde(rename = "EV/EBITDA", default, deserialize_with = "lenient_f64")]
    pub ev_to_ebitda: Option<f64>,
    // Comma-and-space-separated flag codes, or the literal "None"
    #[serde(rename = "Flags", default)]
    pub flags: Option<String>,
}

impl VendorRecord {
    /// Flag string with the wire's absent-means-"None" defaulting applied.
    pub fn flag_string(&self) -> &str {
        self.flags.as_deref().unwrap_or("None")
    }
}

/// Advisory key-rotation and cache metrics from `/keys/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyStats {
    #[serde(default)]
    pub total_keys: u32,
    #[serde(default)]
    pub available_keys: u32,
    #[serde(default)]
    pub blacklisted_keys: u32,
    #[serde(default)]
    pub cache_size_mb: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
