//! Forecast card geometry
//!
//! Historical and predicted values share one scale so the forecast visually
//! continues the observed line. The forecast segment starts at the last
//! historical point to keep the two paths connected.

use serde::Serialize;
use steelboard_types::{ForecastPayload, MetricUnit};

use crate::sparkline::{
    clean_series, map_series, polyline, NormalizedPoint, SparklineGeometry, Viewport,
};

/// Qualitative reading of the forecast's R²
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// R² >= 0.7
    High,
    /// R² >= 0.4
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_r_squared(r_squared: f64) -> Self {
        if r_squared >= 0.7 {
            Self::High
        } else if r_squared >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Geometry and labels for a forecast card
#[derive(Debug, Clone, Serialize)]
pub struct ForecastGeometry {
    pub metric: String,
    pub label: String,
    pub unit: MetricUnit,
    /// R² clamped into `[0, 1]` (non-finite -> 0)
    pub confidence: f64,
    geometry: SparklineGeometry,
    historical_len: usize,
    predicted_total: f64,
}

impl ForecastGeometry {
    /// Map `historical ++ predicted` into one viewport
    pub fn build(payload: &ForecastPayload, viewport: Viewport) -> Self {
        let mut combined = clean_series(&payload.historical);
        let predicted = clean_series(&payload.predicted);
        let predicted_total = predicted.iter().sum();
        combined.extend_from_slice(&predicted);

        let confidence = if payload.confidence.is_finite() {
            payload.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if confidence != payload.confidence {
            tracing::debug!(
                metric = %payload.metric,
                raw = payload.confidence,
                "Forecast confidence clamped"
            );
        }

        let label = if payload.label.is_empty() {
            payload.metric.clone()
        } else {
            payload.label.clone()
        };

        Self {
            metric: payload.metric.clone(),
            label,
            unit: payload.unit,
            confidence,
            geometry: map_series(&combined, viewport),
            historical_len: payload.historical.len(),
            predicted_total,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.geometry.viewport()
    }

    /// True when neither historical nor predicted values exist
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    pub fn historical_points(&self) -> &[NormalizedPoint] {
        &self.geometry.points()[..self.historical_len]
    }

    /// Predicted points, led by the last historical point when there is one
    pub fn forecast_points(&self) -> &[NormalizedPoint] {
        let points = self.geometry.points();
        if points.len() == self.historical_len {
            return &[];
        }
        let start = self.historical_len.saturating_sub(1);
        &points[start..]
    }

    pub fn historical_path(&self) -> Option<String> {
        polyline(self.historical_points())
    }

    pub fn forecast_path(&self) -> Option<String> {
        polyline(self.forecast_points())
    }

    /// X of the boundary between observed and predicted values
    pub fn split_x(&self) -> Option<f64> {
        self.historical_points().last().map(|p| p.x)
    }

    /// Final predicted point (or last observation if nothing is predicted)
    pub fn last_point(&self) -> Option<NormalizedPoint> {
        self.geometry.last_point()
    }

    /// Sum of the cleaned predicted values
    pub fn predicted_total(&self) -> f64 {
        self.predicted_total
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_r_squared(self.confidence)
    }

    /// `Confidence: 82.0%`
    pub fn confidence_label(&self) -> String {
        format!("Confidence: {:.1}%", self.confidence * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(historical: Vec<f64>, predicted: Vec<f64>, confidence: f64) -> ForecastPayload {
        ForecastPayload {
            metric: "revenue".to_string(),
            label: "Revenue".to_string(),
            unit: MetricUnit::Currency,
            historical,
            predicted,
            confidence,
        }
    }

    #[test]
    fn test_shared_scale_and_split() {
        let p = payload(vec![0.0, 10.0], vec![20.0], 0.9);
        let f = ForecastGeometry::build(&p, Viewport::new(160.0, 48.0));

        assert_eq!(f.historical_points().len(), 2);
        assert_eq!(f.forecast_points().len(), 2, "Forecast is anchored on last observation");
        assert_eq!(f.split_x(), Some(80.0));

        // The max of the combined series is the prediction: top padding line
        assert_eq!(f.last_point().unwrap().y, 1.0);
        assert_eq!(
            f.historical_path().as_deref(),
            Some("M 1.00,47.00 L 80.00,24.00")
        );
        assert_eq!(
            f.forecast_path().as_deref(),
            Some("M 80.00,24.00 L 159.00,1.00")
        );
    }

    #[test]
    fn test_no_predictions() {
        let f = ForecastGeometry::build(&payload(vec![1.0, 2.0], vec![], 0.5), Viewport::default());
        assert!(f.forecast_points().is_empty());
        assert!(f.forecast_path().is_none());
        assert!(f.historical_path().is_some());
        assert_eq!(f.predicted_total(), 0.0);
    }

    #[test]
    fn test_no_history() {
        let f = ForecastGeometry::build(&payload(vec![], vec![3.0, 4.0], 0.5), Viewport::default());
        assert!(f.historical_path().is_none());
        assert!(f.split_x().is_none());
        assert_eq!(f.forecast_points().len(), 2);
        assert_eq!(f.predicted_total(), 7.0);
    }

    #[test]
    fn test_empty_payload() {
        let f = ForecastGeometry::build(&payload(vec![], vec![], 0.0), Viewport::default());
        assert!(f.is_empty());
        assert!(f.historical_path().is_none());
        assert!(f.forecast_path().is_none());
    }

    #[test]
    fn test_confidence_clamped() {
        let f = ForecastGeometry::build(&payload(vec![1.0], vec![2.0], 1.7), Viewport::default());
        assert_eq!(f.confidence, 1.0);
        assert_eq!(f.confidence_level(), ConfidenceLevel::High);
        assert_eq!(f.confidence_label(), "Confidence: 100.0%");

        let f = ForecastGeometry::build(
            &payload(vec![1.0], vec![2.0], f64::NAN),
            Viewport::default(),
        );
        assert_eq!(f.confidence, 0.0);
        assert_eq!(f.confidence_level(), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_r_squared(0.75), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_r_squared(0.4), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_r_squared(0.1), ConfidenceLevel::Low);
    }

    #[test]
    fn test_non_finite_predictions_cleaned() {
        let f = ForecastGeometry::build(
            &payload(vec![5.0], vec![f64::NAN, 5.0], 0.5),
            Viewport::default(),
        );
        assert_eq!(f.predicted_total(), 5.0);
        for p in f.forecast_points() {
            assert!(p.y.is_finite());
        }
    }
}
