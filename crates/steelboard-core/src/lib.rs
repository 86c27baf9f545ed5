//! steelboard-core - Core library for steelboard
//!
//! Provides sparkline geometry, trend/forecast/anomaly view models, SVG
//! rendering and snapshot loading for the business dashboard.

pub mod anomalies;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod format;
pub mod preferences;
pub mod render;
pub mod snapshot;
pub mod sparkline;
pub mod trend;

pub use anomalies::{rank_anomalies, AnomalyRow};
pub use dashboard::DashboardView;
pub use error::{CoreError, DegradedState, LoadError, LoadReport};
pub use forecast::{ConfidenceLevel, ForecastGeometry};
pub use preferences::DashboardPreferences;
pub use render::{
    render_forecast_svg, render_geometry_svg, render_sparkline_svg, write_svg, RenderSpec,
};
pub use snapshot::{load_snapshot, parse_snapshot};
pub use sparkline::{map_series, NormalizedPoint, SparklineGeometry, Viewport};
pub use trend::{TrendCardModel, TrendDirection, TrendSummary};
