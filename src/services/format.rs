// src/services/format.rs

/// Display formatting for table cells and exported values, so the two can
/// never diverge: missing or non-finite metrics render as "N/A", everything
/// else as fixed-point with two decimals.
pub fn format_metric(value: Option<f64>) -> String {
    format_metric_with(value, 2)
}

pub fn format_metric_with(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_render_as_na() {
        assert_eq!(format_metric(None), "N/A");
        assert_eq!(format_metric(Some(f64::NAN)), "N/A");
        assert_eq!(format_metric(Some(f64::INFINITY)), "N/A");
    }

    #[test]
    fn finite_values_get_two_decimals() {
        assert_eq!(format_metric(Some(12.345)), "12.35");
        assert_eq!(format_metric(Some(1.0)), "1.00");
        assert_eq!(format_metric(Some(0.0)), "0.00");
        assert_eq!(format_metric(Some(-3.456)), "-3.46");
    }

    #[test]
    fn decimal_count_is_configurable() {
        assert_eq!(format_metric_with(Some(12.345), 1), "12.3");
        assert_eq!(format_metric_with(Some(12.0), 0), "12");
        assert_eq!(format_metric_with(None, 4), "N/A");
    }
}
