//! Trend card view model
//!
//! A trend card shows a metric's current value, the change over the displayed
//! window, and a sparkline. The change compares the last value of the window
//! against the first one, after the same cleaning the sparkline applies.

use serde::Serialize;
use steelboard_types::{MetricUnit, TrendMetric};

use crate::format::format_metric;
use crate::sparkline::{clean_series, map_series, SparklineGeometry, Viewport};

/// Default band (in percent) inside which a change counts as stable
pub const DEFAULT_STABLE_THRESHOLD_PCT: f64 = 1.0;

/// Direction of change across the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Stable => "▬",
        }
    }

    /// CSS class suffix for web styling
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

/// Delta between the first and last value of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSummary {
    /// Last value in the window
    pub current: f64,
    /// First value in the window
    pub baseline: f64,
    /// `current - baseline`
    pub change: f64,
    /// Relative change in percent, `None` when the baseline is zero
    pub change_pct: Option<f64>,
    pub direction: TrendDirection,
}

impl TrendSummary {
    /// Summarize a series, `None` when it is empty.
    ///
    /// Changes whose magnitude is below `stable_threshold_pct` percent are
    /// reported as [`TrendDirection::Stable`].
    pub fn from_series(series: &[f64], stable_threshold_pct: f64) -> Option<Self> {
        let cleaned = clean_series(series);
        let baseline = *cleaned.first()?;
        let current = *cleaned.last()?;
        let change = current - baseline;

        let change_pct = if baseline == 0.0 {
            None
        } else {
            Some(change / baseline.abs() * 100.0)
        };

        let within_band = change_pct
            .map(|pct| pct.abs() < stable_threshold_pct)
            .unwrap_or(false);

        let direction = if change == 0.0 || within_band {
            TrendDirection::Stable
        } else if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };

        Some(Self {
            current,
            baseline,
            change,
            change_pct,
            direction,
        })
    }

    /// Signed percentage label: `+12.5%`, `-3.0%`, or `n/a`
    pub fn format_delta(&self) -> String {
        match self.change_pct {
            Some(pct) => {
                let sign = if pct > 0.0 { "+" } else { "" };
                format!("{}{:.1}%", sign, pct)
            }
            None => "n/a".to_string(),
        }
    }
}

/// Everything a trend card needs to render
#[derive(Debug, Clone, Serialize)]
pub struct TrendCardModel {
    pub key: String,
    pub label: String,
    pub unit: MetricUnit,
    /// Data still being fetched; geometry and summary are empty
    pub loading: bool,
    /// Current value formatted for the metric's unit
    pub current_display: Option<String>,
    pub summary: Option<TrendSummary>,
    pub geometry: SparklineGeometry,
}

impl TrendCardModel {
    /// Build a card from a loaded metric
    pub fn from_metric(metric: &TrendMetric, viewport: Viewport, stable_threshold_pct: f64) -> Self {
        let summary = TrendSummary::from_series(&metric.series, stable_threshold_pct);
        Self {
            key: metric.key.clone(),
            label: metric.display_label().to_string(),
            unit: metric.unit,
            loading: false,
            current_display: summary.map(|s| format_metric(s.current, metric.unit)),
            summary,
            geometry: map_series(&metric.series, viewport),
        }
    }

    /// Placeholder card while data is in flight
    pub fn loading(key: impl Into<String>, label: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: MetricUnit::Count,
            loading: true,
            current_display: None,
            summary: None,
            geometry: SparklineGeometry::empty(viewport),
        }
    }

    /// Delta label, `—` when there is no data
    pub fn delta_display(&self) -> String {
        self.summary
            .map(|s| s.format_delta())
            .unwrap_or_else(|| "—".to_string())
    }
}
