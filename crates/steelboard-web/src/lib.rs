//! steelboard-web - Leptos components for the steelboard dashboard
//!
//! Thin views over the `steelboard-core` view models: geometry, deltas and
//! ranking are computed there, these components only emit markup.

pub mod components;

pub use components::{
    AnomaliesPanel, CardColor, ForecastCard, Sparkline, SparklineShape, StatsCard, TrendCard,
};
