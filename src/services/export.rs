// src/services/export.rs
use anyhow::Result;
use csv::WriterBuilder;
use regex::Regex;

use crate::models::VendorRecord;
use crate::services::format::format_metric;

/// A per-vendor statistics export built client-side from one comparison-table
/// row. The bulk comparison CSV comes from the backend; only this single-row
/// export is assembled here.
#[derive(Debug, Clone)]
pub struct VendorCsv {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Download filename: `{Symbol}_{Name}_statistics.csv` with whitespace runs
/// in the name collapsed to underscores.
pub fn vendor_statistics_filename(vendor: &VendorRecord) -> Result<String> {
    let whitespace = Regex::new(r"\s+")?;
    Ok(format!(
        "{}_{}_statistics.csv",
        vendor.symbol,
        whitespace.replace_all(&vendor.name, "_")
    ))
}

/// Build the (label, value) rows for one vendor. Numeric cells go through the
/// same formatter as the table display, so exported and displayed values
/// never diverge.
pub fn vendor_statistics_csv(vendor: &VendorRecord) -> Result<VendorCsv> {
    let filename = vendor_statistics_filename(vendor)?;

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(["Metric", "Value"])?;
    writer.write_record(["Company Name", vendor.name.as_str()])?;
    writer.write_record(["Symbol", vendor.symbol.as_str()])?;
    writer.write_record(["Category", vendor.category.as_str()])?;
    writer.write_record(["Market Cap ($B)", format_metric(vendor.market_cap).as_str()])?;
    writer.write_record(["Revenue ($B)", format_metric(vendor.revenue).as_str()])?;
    writer.write_record(["P/E Ratio", format_metric(vendor.pe_ratio).as_str()])?;
    writer.write_record(["ROE (%)", format_metric(vendor.roe).as_str()])?;
    writer.write_record(["Debt/Equity", format_metric(vendor.debt_to_equity).as_str()])?;
    writer.write_record(["Current Ratio", format_metric(vendor.current_ratio).as_str()])?;
    writer.write_record(["Dividend Yield (%)", format_metric(vendor.dividend_yield).as_str()])?;
    writer.write_record(["Operating Margin (%)", format_metric(vendor.operating_margin).as_str()])?;
    writer.write_record(["Profit Margin (%)", format_metric(vendor.profit_margin).as_str()])?;
    writer.write_record(["Price/Sales", format_metric(vendor.price_to_sales).as_str()])?;
    writer.write_record(["EV/EBITDA", format_metric(vendor.ev_to_ebitda).as_str()])?;
    writer.write_record(["Flags", vendor.flag_string()])?;

    let content = writer.into_inner()?;
    Ok(VendorCsv { filename, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> VendorRecord {
        VendorRecord {
            symbol: "ACME".to_string(),
            name: "Acme Sensors".to_string(),
            category: "Sensors".to_string(),
            market_cap: Some(4.5),
            revenue: Some(1.234),
            pe_ratio: Some(22.345),
            roe: None,
            debt_to_equity: Some(0.8),
            current_ratio: Some(1.5),
            dividend_yield: Some(2.1),
            operating_margin: Some(11.0),
            profit_margin: Some(8.25),
            price_to_sales: Some(3.0),
            ev_to_ebitda: Some(14.9),
            flags: Some("HIGH_PE".to_string()),
        }
    }

    #[test]
    fn filename_collapses_whitespace_to_underscores() {
        let mut vendor = acme();
        assert_eq!(
            vendor_statistics_filename(&vendor).unwrap(),
            "ACME_Acme_Sensors_statistics.csv"
        );

        vendor.name = "Acme  Advanced\tSensors".to_string();
        assert_eq!(
            vendor_statistics_filename(&vendor).unwrap(),
            "ACME_Acme_Advanced_Sensors_statistics.csv"
        );
    }

    #[test]
    fn csv_starts_with_header_and_name_rows() {
        let export = vendor_statistics_csv(&acme()).unwrap();
        let text = String::from_utf8(export.content).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Metric,Value"));
        assert_eq!(lines.next(), Some("Company Name,Acme Sensors"));
        assert_eq!(lines.next(), Some("Symbol,ACME"));
    }

    #[test]
    fn csv_values_match_table_formatting() {
        let export = vendor_statistics_csv(&acme()).unwrap();
        let text = String::from_utf8(export.content).unwrap();
        // same 2-decimal rule as the table, missing values as N/A
        assert!(text.contains("Revenue ($B),1.23"));
        assert!(text.contains("P/E Ratio,22.35"));
        assert!(text.contains("ROE (%),N/A"));
        assert!(text.contains("Flags,HIGH_PE"));
    }

    #[test]
    fn absent_flags_export_as_none() {
        let mut vendor = acme();
        vendor.flags = None;
        let export = vendor_statistics_csv(&vendor).unwrap();
        let text = String::from_utf8(export.content).unwrap();
        assert!(text.ends_with("Flags,None\n"));
    }
}
