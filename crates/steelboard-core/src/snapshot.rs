//! Analytics snapshot loading
//!
//! Reads the JSON document exported by the analytics service and checks it
//! for problems the dashboard can survive (non-finite values, empty series,
//! duplicate keys). Those are reported, not rejected.

use std::collections::HashSet;
use std::path::Path;

use steelboard_types::AnalyticsSnapshot;

use crate::error::{CoreError, LoadError, LoadReport};

/// Read and validate a snapshot file
pub fn load_snapshot(path: &Path) -> Result<(AnalyticsSnapshot, LoadReport), CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_snapshot(&content, path)
}

/// Parse and validate snapshot JSON; `origin` is only used in error messages
pub fn parse_snapshot(
    content: &str,
    origin: &Path,
) -> Result<(AnalyticsSnapshot, LoadReport), CoreError> {
    let snapshot: AnalyticsSnapshot =
        serde_json::from_str(content).map_err(|source| CoreError::JsonParse {
            path: origin.to_path_buf(),
            message: source.to_string(),
            source,
        })?;

    let report = validate_snapshot(&snapshot);
    tracing::debug!(
        trends = report.trends_loaded,
        forecast = report.forecast_loaded,
        anomalies = report.anomalies_loaded,
        coerced = report.values_coerced,
        "Snapshot loaded from {}",
        origin.display()
    );

    Ok((snapshot, report))
}

/// Collect non-fatal problems in a parsed snapshot
pub fn validate_snapshot(snapshot: &AnalyticsSnapshot) -> LoadReport {
    let mut report = LoadReport::new();
    let mut seen = HashSet::new();

    for trend in &snapshot.trends {
        let source = format!("trend:{}", trend.key);

        if !seen.insert(trend.key.as_str()) {
            tracing::warn!(key = %trend.key, "Duplicate trend key in snapshot");
            report.add_warning(&source, "Duplicate metric key; only the first is used for lookups");
        }

        if trend.series.is_empty() {
            report.add_warning(&source, "Empty series; card renders a blank sparkline");
        }

        let bad = trend.non_finite_count();
        if bad > 0 {
            tracing::warn!(key = %trend.key, bad, "Non-finite values in trend series");
            report.values_coerced += bad;
            report.add_error(
                LoadError::warning(
                    &source,
                    format!("{} of {} values are not finite and render as 0", bad, trend.series.len()),
                )
                .with_suggestion("Check the upstream aggregation for missing days"),
            );
        }

        report.trends_loaded += 1;
    }

    if let Some(forecast) = &snapshot.forecast {
        let source = format!("forecast:{}", forecast.metric);

        if !(0.0..=1.0).contains(&forecast.confidence) {
            tracing::warn!(confidence = forecast.confidence, "Forecast confidence out of range");
            report.add_warning(
                &source,
                format!(
                    "Confidence {} outside [0, 1]; clamped for display",
                    forecast.confidence
                ),
            );
        }

        let bad = forecast
            .historical
            .iter()
            .chain(forecast.predicted.iter())
            .filter(|v| !v.is_finite())
            .count();
        if bad > 0 {
            report.values_coerced += bad;
            report.add_warning(&source, format!("{} forecast values are not finite", bad));
        }

        if forecast.historical.is_empty() && forecast.predicted.is_empty() {
            report.add_warning(&source, "Forecast has no values");
        }

        report.forecast_loaded = true;
    }

    for anomaly in &snapshot.anomalies {
        if !anomaly.value.is_finite() || !anomaly.z_score.is_finite() {
            report.add_warning(
                format!("anomaly:{}", anomaly.metric),
                format!("Anomaly on {} has a non-finite value and is hidden", anomaly.date),
            );
        }
    }
    report.anomalies_loaded = snapshot.anomalies.len();

    report
}
