//! CLI command helpers
//!
//! Value parsing, JSON/SVG output for `sparkline`, file export for `render`,
//! and terminal tables for `summary`.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use steelboard_core::format::format_metric;
use steelboard_core::{
    render_forecast_svg, render_geometry_svg, write_svg, DashboardView, LoadError, LoadReport,
    NormalizedPoint, RenderSpec, SparklineGeometry, TrendDirection,
};

/// File stem of the forecast SVG, never handed to a trend
const FORECAST_STEM: &str = "forecast";

// ============================================================================
// Value parsing
// ============================================================================

/// Split tokens on commas and whitespace and parse each piece.
///
/// Unparseable pieces become NaN so the mapper cleans them to 0 and the
/// series keeps its length.
pub fn parse_values<S: AsRef<str>>(tokens: &[S]) -> Vec<f64> {
    tokens
        .iter()
        .flat_map(|t| {
            t.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .map(|piece| match piece.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(token = %piece, "Not a number, treating as missing");
                f64::NAN
            }
        })
        .collect()
}

/// Read a whole series from `reader` (typically stdin)
pub fn read_values(mut reader: impl Read) -> Result<Vec<f64>> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("Failed to read values from stdin")?;
    Ok(parse_values(&[input]))
}

/// clap value parser for `--width`/`--height`: finite and strictly positive
pub fn parse_dimension(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("must be a positive finite number, got `{}`", s));
    }
    Ok(value)
}

// ============================================================================
// Sparkline output
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SparklineJson<'a> {
    width: f64,
    height: f64,
    points: &'a [NormalizedPoint],
    path: Option<String>,
    area_path: Option<String>,
    last_point: Option<NormalizedPoint>,
}

/// Geometry as JSON: points, line path, area path and last-point marker
pub fn format_sparkline_json(geometry: &SparklineGeometry) -> Result<String> {
    let viewport = geometry.viewport();
    let doc = SparklineJson {
        width: viewport.width,
        height: viewport.height,
        points: geometry.points(),
        path: geometry.line_path(),
        area_path: geometry.area_path(),
        last_point: geometry.last_point(),
    };
    serde_json::to_string_pretty(&doc).context("Failed to serialize sparkline geometry")
}

// ============================================================================
// Snapshot export
// ============================================================================

/// Write one SVG per trend card plus `forecast.svg` into `out_dir`
///
/// Keys that sanitize to the same stem get `-2`, `-3`, ... suffixes so no
/// file overwrites another. A file that cannot be written is recorded in
/// `report` and the remaining files are still written.
pub fn write_dashboard_svgs(
    view: &DashboardView,
    spec: &RenderSpec,
    out_dir: &Path,
    report: &mut LoadReport,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut used = HashSet::from([FORECAST_STEM.to_string()]);
    let mut written = Vec::new();

    for card in &view.cards {
        let base = file_stem(&card.key);
        let stem = unique_stem(&base, &mut used);
        if stem != base {
            tracing::warn!(key = %card.key, file = %stem, "File name taken, using suffix");
            report.add_warning(
                format!("svg:{}", card.key),
                format!("{}.svg already used, written as {}.svg", base, stem),
            );
        }

        let path = out_dir.join(format!("{}.svg", stem));
        match write_svg(&path, &render_geometry_svg(&card.geometry, spec)) {
            Ok(()) => written.push(path),
            Err(e) => {
                report.add_error(LoadError::from_core_error(format!("svg:{}", card.key), &e))
            }
        }
    }

    if let Some(forecast) = &view.forecast {
        let path = out_dir.join(format!("{}.svg", FORECAST_STEM));
        match write_svg(&path, &render_forecast_svg(forecast, spec)) {
            Ok(()) => written.push(path),
            Err(e) => report.add_error(LoadError::from_core_error("svg:forecast", &e)),
        }
    }

    Ok(written)
}

/// First of `base`, `base-2`, `base-3`, ... not yet in `used`
///
/// Compared case-insensitively so `Orders` and `orders` do not share a file
/// on case-insensitive filesystems.
fn unique_stem(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while !used.insert(candidate.to_ascii_lowercase()) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    candidate
}

/// Metric key reduced to a safe file name
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "metric".to_string()
    } else {
        stem
    }
}

/// Human-readable lines for a load report, empty when healthy
pub fn format_report(report: &LoadReport) -> Vec<String> {
    report
        .errors
        .iter()
        .map(|e| match &e.suggestion {
            Some(hint) => format!("  - {}: {} ({})", e.source, e.message, hint),
            None => format!("  - {}: {}", e.source, e.message),
        })
        .collect()
}

// ============================================================================
// Summary tables
// ============================================================================

/// Trend cards and anomalies as tables, or the whole view as JSON
pub fn format_summary(view: &DashboardView, json: bool, no_color: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(view).context("Failed to serialize dashboard");
    }

    let mut out = String::new();
    if let Some(period) = &view.period {
        out.push_str(&format!("Period: {}\n\n", period));
    }

    out.push_str(&format_trend_table(view, no_color));

    if let Some(forecast) = &view.forecast {
        out.push_str(&format!(
            "\n\nForecast ({}): {} projected, {} [{}]",
            forecast.label,
            format_metric(forecast.predicted_total(), forecast.unit),
            forecast.confidence_label(),
            forecast.confidence_level().label()
        ));
    }

    out.push_str("\n\n");
    out.push_str(&format_anomaly_table(view, no_color));
    Ok(out)
}

fn header(labels: &[&str], no_color: bool) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| {
            let cell = Cell::new(label);
            if no_color {
                cell
            } else {
                cell.fg(Color::Cyan)
            }
        })
        .collect()
}

fn format_trend_table(view: &DashboardView, no_color: bool) -> String {
    if view.cards.is_empty() {
        return "No trends in snapshot.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Metric", "Current", "Change", "Trend", "Points"], no_color));

    for card in &view.cards {
        let current = card
            .current_display
            .clone()
            .unwrap_or_else(|| "—".to_string());
        let delta = card.delta_display();
        let direction = card.summary.map(|s| s.direction);
        let arrow = direction.map(|d| d.arrow()).unwrap_or("");

        let mut change = Cell::new(&delta);
        if !no_color {
            match direction {
                Some(TrendDirection::Up) => change = change.fg(Color::Green),
                Some(TrendDirection::Down) => change = change.fg(Color::Red),
                _ => {}
            }
        }

        table.add_row(Row::from(vec![
            Cell::new(&card.label),
            Cell::new(&current),
            change,
            Cell::new(arrow),
            Cell::new(card.geometry.len()),
        ]));
    }

    table.to_string()
}

fn format_anomaly_table(view: &DashboardView, no_color: bool) -> String {
    if view.anomalies.is_empty() {
        return "No anomalies detected.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(
        &["", "Date", "Metric", "Value", "Expected", "Deviation", "Z"],
        no_color,
    ));

    for row in &view.anomalies {
        table.add_row(Row::from(vec![
            Cell::new(row.severity.icon()),
            Cell::new(row.date.format("%Y-%m-%d")),
            Cell::new(&row.metric),
            Cell::new(row.format_value()),
            Cell::new(row.format_expected()),
            Cell::new(row.format_deviation()),
            Cell::new(format!("{:.1}", row.z_score)),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelboard_core::{map_series, parse_snapshot, DashboardPreferences, Viewport};

    const SNAPSHOT: &str = r#"{
        "period": "30d",
        "trends": [
            {"key": "orders", "label": "Orders", "series": [10, 12, 15]},
            {"key": "quotes/sent", "label": "Quotes sent", "series": [8, 8]}
        ],
        "forecast": {"metric": "revenue", "label": "Revenue", "unit": "currency", "historical": [1, 2], "predicted": [3], "confidence": 0.8},
        "anomalies": [
            {"date": "2026-09-14", "metric": "orders", "value": 42, "expected": 12, "zScore": 3.4}
        ]
    }"#;

    fn view() -> DashboardView {
        let (snapshot, _) = parse_snapshot(SNAPSHOT, Path::new("inline")).unwrap();
        DashboardView::build(&snapshot, &DashboardPreferences::default())
    }

    #[test]
    fn test_parse_values_separators() {
        let values = parse_values(&["1,2", "3 4\n5", ",,6,"]);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_values_negative_and_bad_tokens() {
        let values = parse_values(&["-3.5", "abc", "7"]);
        assert_eq!(values.len(), 3, "Bad tokens keep their slot");
        assert_eq!(values[0], -3.5);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 7.0);
    }

    #[test]
    fn test_read_values_from_reader() {
        let values = read_values("1 5\n3\n".as_bytes()).unwrap();
        assert_eq!(values, vec![1.0, 5.0, 3.0]);
    }

    #[test]
    fn test_sparkline_json() {
        let geometry = map_series(&[1.0, 5.0, 3.0], Viewport::default());
        let json = format_sparkline_json(&geometry).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["points"].as_array().unwrap().len(), 3);
        assert_eq!(doc["path"], "M 1.00,47.00 L 80.00,1.00 L 159.00,24.00");
        assert_eq!(doc["lastPoint"]["x"], 159.0);
        assert!(doc["areaPath"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_sparkline_json_empty() {
        let geometry = map_series(&[], Viewport::default());
        let doc: serde_json::Value =
            serde_json::from_str(&format_sparkline_json(&geometry).unwrap()).unwrap();
        assert!(doc["path"].is_null());
        assert!(doc["lastPoint"].is_null());
        assert_eq!(doc["width"], 160.0);
    }

    #[test]
    fn test_file_stem_sanitized() {
        assert_eq!(file_stem("orders"), "orders");
        assert_eq!(file_stem("quotes/sent"), "quotes_sent");
        assert_eq!(file_stem(""), "metric");
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("120"), Ok(120.0));
        assert_eq!(parse_dimension("20.5"), Ok(20.5));
        for bad in ["0", "-5", "NaN", "inf", "-inf", "abc", ""] {
            assert!(parse_dimension(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_unique_stem() {
        let mut used = HashSet::from([FORECAST_STEM.to_string()]);
        assert_eq!(unique_stem("orders", &mut used), "orders");
        assert_eq!(unique_stem("orders", &mut used), "orders-2");
        assert_eq!(unique_stem("Orders", &mut used), "Orders-3");
        assert_eq!(unique_stem("forecast", &mut used), "forecast-2");
    }

    #[test]
    fn test_write_dashboard_svgs() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("svg");
        let mut report = LoadReport::new();

        let written =
            write_dashboard_svgs(&view(), &RenderSpec::default(), &out, &mut report).unwrap();

        assert_eq!(written.len(), 3);
        assert!(out.join("orders.svg").exists());
        assert!(out.join("quotes_sent.svg").exists());
        let forecast = std::fs::read_to_string(out.join("forecast.svg")).unwrap();
        assert!(forecast.contains("forecast-predicted"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_write_dashboard_svgs_colliding_keys() {
        let json = r#"{
            "trends": [
                {"key": "quotes/sent", "series": [1, 2]},
                {"key": "quotes_sent", "series": [3, 4]},
                {"key": "forecast", "series": [5, 6]}
            ],
            "forecast": {"metric": "revenue", "historical": [1, 2], "predicted": [3], "confidence": 0.5}
        }"#;
        let (snapshot, _) = parse_snapshot(json, Path::new("inline")).unwrap();
        let view = DashboardView::build(&snapshot, &DashboardPreferences::default());
        let dir = tempfile::TempDir::new().unwrap();
        let mut report = LoadReport::new();

        let written =
            write_dashboard_svgs(&view, &RenderSpec::default(), dir.path(), &mut report).unwrap();

        assert_eq!(written.len(), 4);
        let unique: HashSet<_> = written.iter().collect();
        assert_eq!(unique.len(), 4, "Every metric gets its own file");
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert!(dir.path().join("quotes_sent-2.svg").exists());
        assert!(dir.path().join("forecast-2.svg").exists());

        let trend = std::fs::read_to_string(dir.path().join("forecast-2.svg")).unwrap();
        assert!(!trend.contains("forecast-predicted"), "Trend did not overwrite forecast");
        let forecast = std::fs::read_to_string(dir.path().join("forecast.svg")).unwrap();
        assert!(forecast.contains("forecast-predicted"));
        assert_eq!(report.error_count(), (2, 0));
    }

    #[test]
    fn test_write_dashboard_svgs_records_write_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory where the file should go makes that one write fail
        std::fs::create_dir(dir.path().join("orders.svg")).unwrap();
        let mut report = LoadReport::new();

        let written =
            write_dashboard_svgs(&view(), &RenderSpec::default(), dir.path(), &mut report).unwrap();

        assert_eq!(written.len(), 2, "Other files are still written");
        assert_eq!(report.error_count(), (0, 1));
        assert_eq!(report.errors[0].source, "svg:orders");
        assert!(report.errors[0].suggestion.is_some());
    }

    #[test]
    fn test_summary_table_no_color() {
        let output = format_summary(&view(), false, true).unwrap();

        assert!(output.contains("Period: 30d"));
        assert!(output.contains("Orders"));
        assert!(output.contains("+50.0%"));
        assert!(output.contains("Confidence: 80.0%"));
        assert!(output.contains("2026-09-14"));
        assert!(!output.contains("\u{1b}["), "No ANSI escapes with no_color");
    }

    #[test]
    fn test_summary_json() {
        let output = format_summary(&view(), true, false).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(doc["cards"].as_array().unwrap().len(), 2);
        assert_eq!(doc["anomalies"][0]["severity"], "critical");
    }

    #[test]
    fn test_format_report_lines() {
        let (_, report) = parse_snapshot(
            r#"{"trends": [{"key": "orders", "series": [1, null]}]}"#,
            Path::new("inline"),
        )
        .unwrap();
        let lines = format_report(&report);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  - trend:orders:"));
    }
}
