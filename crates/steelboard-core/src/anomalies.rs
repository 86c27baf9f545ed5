//! Anomalies panel view model
//!
//! The analytics service flags unusual values (z-score based); this module
//! filters and orders those records for display.

use serde::Serialize;
use std::cmp::Ordering;
use steelboard_types::{AnomalyRecord, AnomalySeverity, MetricUnit};

use crate::format::format_metric;

/// One row of the anomalies panel
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyRow {
    pub date: chrono::NaiveDate,
    pub metric: String,
    pub unit: MetricUnit,
    pub value: f64,
    pub expected: f64,
    pub z_score: f64,
    pub severity: AnomalySeverity,
}

impl AnomalyRow {
    /// Deviation from the expected value in percent, `None` when expected is 0
    pub fn deviation_pct(&self) -> Option<f64> {
        if self.expected == 0.0 || !self.expected.is_finite() {
            return None;
        }
        Some((self.value - self.expected) / self.expected.abs() * 100.0)
    }

    /// Format value based on metric unit
    pub fn format_value(&self) -> String {
        format_metric(self.value, self.unit)
    }

    pub fn format_expected(&self) -> String {
        format_metric(self.expected, self.unit)
    }

    /// Format deviation as percentage with sign
    pub fn format_deviation(&self) -> String {
        match self.deviation_pct() {
            Some(pct) => {
                let sign = if pct >= 0.0 { "+" } else { "" };
                format!("{}{:.0}%", sign, pct)
            }
            None => "n/a".to_string(),
        }
    }
}

/// Filter and order anomaly records for display.
///
/// - records with a non-finite value or z-score are dropped
/// - severity comes from the record, or is derived from the z-score
///   (records within 2σ and without a severity are dropped)
/// - ordering: critical first, then |z| descending, then most recent first
pub fn rank_anomalies(records: &[AnomalyRecord]) -> Vec<AnomalyRow> {
    let mut rows: Vec<AnomalyRow> = records
        .iter()
        .filter_map(|record| {
            if !record.value.is_finite() || !record.z_score.is_finite() {
                tracing::warn!(
                    metric = %record.metric,
                    date = %record.date,
                    "Dropping anomaly with non-finite value"
                );
                return None;
            }

            let severity = record
                .severity
                .or_else(|| AnomalySeverity::from_z_score(record.z_score))?;

            Some(AnomalyRow {
                date: record.date,
                metric: record.metric.clone(),
                unit: record.unit,
                value: record.value,
                expected: record.expected,
                z_score: record.z_score,
                severity,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        severity_rank(a.severity)
            .cmp(&severity_rank(b.severity))
            .then_with(|| {
                b.z_score
                    .abs()
                    .partial_cmp(&a.z_score.abs())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.date.cmp(&a.date))
    });

    rows
}

fn severity_rank(severity: AnomalySeverity) -> u8 {
    match severity {
        AnomalySeverity::Critical => 0,
        AnomalySeverity::Warning => 1,
    }
}
