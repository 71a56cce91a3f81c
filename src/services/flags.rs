// src/services/flags.rs

/// Flag codes that warrant a visible warning icon. A strict subset of the
/// describable catalog below; informational codes such as API_ERROR get a
/// tooltip but no icon.
pub const SEVERE_FLAGS: [&str; 5] = [
    "LOW_REVENUE",
    "HIGH_PE",
    "HIGH_DEBT",
    "LOW_LIQUIDITY",
    "LOW_ROE",
];

/// Human-readable description for a single flag code. Unknown codes pass
/// through verbatim.
pub fn describe_flag(code: &str) -> &str {
    match code {
        "LOW_REVENUE" => "Low Revenue (< $1B)",
        "HIGH_PE" => "High P/E Ratio (> 30)",
        "HIGH_DEBT" => "High Debt-to-Equity (> 1.0)",
        "LOW_LIQUIDITY" => "Low Current Ratio (< 1.0)",
        "LOW_ROE" => "Low ROE (< 10%)",
        "LOW_OPERATING_MARGIN" => "Low Operating Margin (< 5%)",
        "LOW_PROFIT_MARGIN" => "Low Profit Margin (< 3%)",
        "HIGH_PRICE_TO_SALES" => "High Price/Sales (> 10)",
        "HIGH_EV_TO_EBITDA" => "High EV/EBITDA (> 20)",
        "API_ERROR" => "API Error",
        other => other,
    }
}

/// True when the ", "-separated flag string contains at least one severe
/// code. "None" and empty strings never warn.
pub fn has_warning_flags(flag_string: &str) -> bool {
    if flag_string.is_empty() || flag_string == "None" {
        return false;
    }
    flag_string
        .split(", ")
        .any(|flag| SEVERE_FLAGS.contains(&flag))
}

/// Tooltip text for a flag string: every code mapped through the catalog and
/// rejoined with ", ". Runs for informational flags too, whether or not an
/// icon is shown.
pub fn flag_tooltip(flag_string: &str) -> String {
    if flag_string.is_empty() || flag_string == "None" {
        return String::new();
    }
    flag_string
        .split(", ")
        .map(describe_flag)
        .collect::<Vec<_>>()
        .join(", ")
}
