//! Number formatting for cards and tables

use steelboard_types::MetricUnit;

const SCALES: [(f64, &str); 4] = [
    (1.0, ""),
    (1_000.0, "K"),
    (1_000_000.0, "M"),
    (1_000_000_000.0, "B"),
];

/// Format large numbers (K, M, B)
///
/// The suffix is picked after rounding to one decimal, so `999.96` reads
/// `1.0K` rather than `1000.0`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "—".to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();

    let mut scale = SCALES
        .iter()
        .rposition(|(div, _)| abs >= *div)
        .unwrap_or(0);
    if scale + 1 < SCALES.len() && round_tenth(abs / SCALES[scale].0) >= 1_000.0 {
        scale += 1;
    }

    let (div, suffix) = SCALES[scale];
    if scale == 0 && abs.fract() == 0.0 {
        format!("{}{}", sign, abs as u64)
    } else {
        format!("{}{:.1}{}", sign, abs / div, suffix)
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Format as USD with thousands separators: `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "—".to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = cents / 100;
    let rest = cents % 100;
    format!("{}${}.{:02}", sign, group_thousands(dollars), rest)
}

/// Format a value that is already a percentage: `12.5%`
pub fn format_percent(pct: f64) -> String {
    if !pct.is_finite() {
        return "—".to_string();
    }
    format!("{:.1}%", pct)
}

/// Format a metric value according to its unit
pub fn format_metric(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Count => format_number(value),
        MetricUnit::Currency => format_currency(value),
        MetricUnit::Percent => format_percent(value),
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(12.4), "12.4");
        assert_eq!(format_number(1_500.0), "1.5K");
        assert_eq!(format_number(2_300_000.0), "2.3M");
        assert_eq!(format_number(4_100_000_000.0), "4.1B");
        assert_eq!(format_number(-1_500.0), "-1.5K");
        assert_eq!(format_number(f64::NAN), "—");
    }

    #[test]
    fn test_format_number_rounds_into_next_suffix() {
        assert_eq!(format_number(999.94), "999.9");
        assert_eq!(format_number(999.96), "1.0K");
        assert_eq!(format_number(999_960.0), "1.0M");
        assert_eq!(format_number(999_960_000.0), "1.0B");
        assert_eq!(format_number(-999_960.0), "-1.0M");
        assert_eq!(format_number(1_500_000_000_000.0), "1500.0B");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
        assert_eq!(format_currency(f64::INFINITY), "—");
    }

    #[test]
    fn test_format_metric_dispatch() {
        assert_eq!(format_metric(1500.0, MetricUnit::Count), "1.5K");
        assert_eq!(format_metric(1500.0, MetricUnit::Currency), "$1,500.00");
        assert_eq!(format_metric(37.5, MetricUnit::Percent), "37.5%");
    }
}
