//! Dashboard view assembly
//!
//! Turns a loaded snapshot into the cards, forecast and anomaly rows the
//! frontends render. Geometry is computed once here so the CLI and the web
//! components draw identical shapes.

use serde::Serialize;
use steelboard_types::AnalyticsSnapshot;

use crate::anomalies::{rank_anomalies, AnomalyRow};
use crate::forecast::ForecastGeometry;
use crate::preferences::DashboardPreferences;
use crate::sparkline::Viewport;
use crate::trend::TrendCardModel;

/// Fully prepared dashboard content
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub period: Option<String>,
    pub cards: Vec<TrendCardModel>,
    pub forecast: Option<ForecastGeometry>,
    pub anomalies: Vec<AnomalyRow>,
}

impl DashboardView {
    /// Build using the viewport and stable band from `prefs`
    pub fn build(snapshot: &AnalyticsSnapshot, prefs: &DashboardPreferences) -> Self {
        Self::with_viewport(
            snapshot,
            prefs.sparkline.viewport,
            prefs.stable_threshold_pct,
        )
    }

    pub fn with_viewport(
        snapshot: &AnalyticsSnapshot,
        viewport: Viewport,
        stable_threshold_pct: f64,
    ) -> Self {
        let cards = snapshot
            .trends
            .iter()
            .map(|metric| TrendCardModel::from_metric(metric, viewport, stable_threshold_pct))
            .collect();

        let forecast = snapshot
            .forecast
            .as_ref()
            .map(|payload| ForecastGeometry::build(payload, viewport));

        Self {
            period: snapshot.period.clone(),
            cards,
            forecast,
            anomalies: rank_anomalies(&snapshot.anomalies),
        }
    }

    pub fn card(&self, key: &str) -> Option<&TrendCardModel> {
        self.cards.iter().find(|c| c.key == key)
    }

    /// Anomalies with critical severity
    pub fn critical_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.severity == steelboard_types::AnomalySeverity::Critical)
            .count()
    }
}
