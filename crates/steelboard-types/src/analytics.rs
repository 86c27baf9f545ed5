//! Analytics payload types
//!
//! Mirrors the JSON document the analytics service returns for the dashboard:
//! trend series per metric, an optional forecast, and detected anomalies.
//! All aggregation happens server-side; these types only carry the numbers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// How a metric's values should be displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    /// Plain counts (orders, quotes, projects)
    #[default]
    Count,
    /// Monetary amounts in USD
    Currency,
    /// Ratios already expressed as percentages (win rate, margin)
    Percent,
}

/// One trend series rendered as a sparkline card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetric {
    /// Stable identifier (e.g. "orders", "quotes_sent")
    pub key: String,
    /// Human label shown on the card
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub unit: MetricUnit,
    /// Values in time order; non-finite entries are kept and cleaned at render time
    #[serde(default, deserialize_with = "lenient::series")]
    pub series: Vec<f64>,
}

impl TrendMetric {
    pub fn new(key: impl Into<String>, label: impl Into<String>, series: Vec<f64>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: MetricUnit::Count,
            series,
        }
    }

    pub fn with_unit(mut self, unit: MetricUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Label to display, falling back to the key
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }

    /// Number of entries that are NaN or infinite
    pub fn non_finite_count(&self) -> usize {
        self.series.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Server-computed forecast for one metric
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPayload {
    pub metric: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub unit: MetricUnit,
    /// Observed values (oldest first)
    #[serde(default, deserialize_with = "lenient::series")]
    pub historical: Vec<f64>,
    /// Predicted values following the last observation
    #[serde(default, deserialize_with = "lenient::series")]
    pub predicted: Vec<f64>,
    /// Fit quality (R², expected in 0.0-1.0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub confidence: f64,
}

/// Severity reported for an anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    /// Critical: >3 standard deviations from expected
    Critical,
    /// Warning: >2 standard deviations from expected
    Warning,
}

impl AnomalySeverity {
    /// Classify a z-score, `None` when within normal variation
    pub fn from_z_score(z_score: f64) -> Option<Self> {
        let abs_z = z_score.abs();
        if abs_z > 3.0 {
            Some(Self::Critical)
        } else if abs_z > 2.0 {
            Some(Self::Warning)
        } else {
            None
        }
    }

    /// Icon representation for terminal output
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Critical => "🚨",
            Self::Warning => "⚠️",
        }
    }

    /// CSS class suffix for web styling
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
        }
    }
}

/// A data point the analytics service flagged as unusual
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub metric: String,
    #[serde(default)]
    pub unit: MetricUnit,
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
    /// Expected (mean) value the observation is compared against
    #[serde(default, deserialize_with = "lenient::number")]
    pub expected: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub z_score: f64,
    /// Server-assigned severity; derived from the z-score when absent
    #[serde(default)]
    pub severity: Option<AnomalySeverity>,
}

/// Complete analytics document for one dashboard period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub computed_at: Option<DateTime<Utc>>,
    /// Period label as sent by the server (e.g. "30d")
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub trends: Vec<TrendMetric>,
    #[serde(default)]
    pub forecast: Option<ForecastPayload>,
    #[serde(default)]
    pub anomalies: Vec<AnomalyRecord>,
}

impl AnalyticsSnapshot {
    /// Look up a trend by key
    pub fn trend(&self, key: &str) -> Option<&TrendMetric> {
        self.trends.iter().find(|t| t.key == key)
    }

    /// Check if the snapshot carries nothing to display
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty() && self.forecast.is_none() && self.anomalies.is_empty()
    }
}
