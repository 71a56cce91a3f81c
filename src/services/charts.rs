// src/services/charts.rs
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::VendorRecord;

/// One bar in a metric comparison chart. Derived from the comparison table on
/// every render, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
    pub category: String,
}

/// One slice of the category distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: usize,
}

/// Chart series for one metric: rows where the metric is a positive finite
/// number, sorted descending by value. Each metric filters independently, so
/// a vendor missing from one series can still appear in another.
pub fn metric_series(
    table: &[VendorRecord],
    metric: fn(&VendorRecord) -> Option<f64>,
) -> Vec<ChartPoint> {
    let mut series: Vec<ChartPoint> = table
        .iter()
        .filter_map(|row| match metric(row) {
            Some(value) if value.is_finite() && value > 0.0 => Some(ChartPoint {
                name: row.symbol.clone(),
                value,
                category: row.category.clone(),
            }),
            _ => None,
        })
        .collect();
    series.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    series
}

pub fn revenue_series(table: &[VendorRecord]) -> Vec<ChartPoint> {
    metric_series(table, |row| row.revenue)
}

pub fn pe_ratio_series(table: &[VendorRecord]) -> Vec<ChartPoint> {
    metric_series(table, |row| row.pe_ratio)
}

pub fn roe_series(table: &[VendorRecord]) -> Vec<ChartPoint> {
    metric_series(table, |row| row.roe)
}

/// Vendor count per category, grouped by the literal category string in
/// first-seen order. No case or whitespace normalization: two category
/// strings that differ only in whitespace count as distinct groups.
pub fn category_distribution(table: &[VendorRecord]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();
    for row in table {
        match slices.iter_mut().find(|slice| slice.name == row.category) {
            Some(slice) => slice.value += 1,
            None => slices.push(CategorySlice {
                name: row.category.clone(),
                value: 1,
            }),
        }
    }
    slices
}
