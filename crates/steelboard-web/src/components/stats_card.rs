//! Small headline card for counts and totals

use leptos::prelude::*;
use steelboard_core::TrendDirection;
use steelboard_types::AnomalySeverity;

/// Card color variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardColor {
    Default,
    Green,
    Yellow,
    Red,
}

impl CardColor {
    fn to_class(self) -> &'static str {
        match self {
            CardColor::Default => "",
            CardColor::Green => "card-green",
            CardColor::Yellow => "card-yellow",
            CardColor::Red => "card-red",
        }
    }

    pub fn for_severity(severity: AnomalySeverity) -> Self {
        match severity {
            AnomalySeverity::Critical => CardColor::Red,
            AnomalySeverity::Warning => CardColor::Yellow,
        }
    }

    pub fn for_direction(direction: TrendDirection) -> Self {
        match direction {
            TrendDirection::Up => CardColor::Green,
            TrendDirection::Down => CardColor::Red,
            TrendDirection::Stable => CardColor::Default,
        }
    }
}

/// StatsCard component - a single labelled value
#[component]
pub fn StatsCard(
    /// Card label (e.g., "Critical anomalies")
    label: String,
    /// Card value, already formatted
    value: String,
    /// Icon shown before the text
    #[prop(into, default = String::new())]
    icon: String,
    /// Color variant for status indication
    #[prop(default = CardColor::Default)]
    color: CardColor,
    /// Secondary line under the value
    #[prop(optional)]
    detail: Option<String>,
) -> impl IntoView {
    let has_icon = !icon.is_empty();

    view! {
        <div class=format!("card stats-card {}", color.to_class())>
            {has_icon.then(|| view! { <div class="stats-card-icon">{icon}</div> })}
            <div class="stats-card-content">
                <div class="stats-card-label">{label}</div>
                <div class="stats-card-value">{value}</div>
                {detail.map(|d| view! { <div class="stats-card-detail">{d}</div> })}
            </div>
        </div>
    }
}
