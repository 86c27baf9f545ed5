//! steelboard-types - Shared data types for steelboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No async runtime, no filesystem access - just serde-serializable types
//! describing what the analytics collaborator sends to the dashboard.
//!
//! Used by:
//! - steelboard-core (view models, rendering, snapshot loading)
//! - steelboard-web (frontend components)

pub mod analytics;
pub mod lenient;

pub use analytics::{
    AnalyticsSnapshot, AnomalyRecord, AnomalySeverity, ForecastPayload, MetricUnit, TrendMetric,
};
