//! Leptos UI components

mod anomalies_panel;
mod forecast_card;
mod sparkline;
mod stats_card;
mod trend_card;

pub use anomalies_panel::AnomaliesPanel;
pub use forecast_card::ForecastCard;
pub use sparkline::{Sparkline, SparklineShape};
pub use stats_card::{CardColor, StatsCard};
pub use trend_card::TrendCard;
