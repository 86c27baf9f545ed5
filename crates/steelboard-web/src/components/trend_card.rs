//! Trend card: current value, change over the window, and a sparkline

use leptos::prelude::*;
use steelboard_core::TrendCardModel;

use super::sparkline::SparklineShape;

/// Trend card component
///
/// While `card.loading` is set a skeleton is shown instead of numbers.
#[component]
pub fn TrendCard(
    card: TrendCardModel,
    /// Fill the area under the sparkline
    #[prop(default = false)]
    filled: bool,
) -> impl IntoView {
    if card.loading {
        return view! {
            <div class="card trend-card trend-card-loading" data-metric=card.key>
                <div class="trend-card-label">{card.label}</div>
                <div class="trend-card-skeleton">"Loading…"</div>
            </div>
        }
        .into_any();
    }

    let delta = card.delta_display();
    let direction_class = card
        .summary
        .map(|s| format!("trend-{}", s.direction.class_name()))
        .unwrap_or_default();
    let arrow = card.summary.map(|s| s.direction.arrow());
    let current = card.current_display.unwrap_or_else(|| "—".to_string());

    view! {
        <div class="card trend-card" data-metric=card.key>
            <div class="trend-card-header">
                <div class="trend-card-label">{card.label}</div>
                <div class=format!("trend-card-delta {}", direction_class)>
                    {arrow.map(|a| view! { <span class="trend-card-arrow">{a}</span> })}
                    {delta}
                </div>
            </div>
            <div class="trend-card-value">{current}</div>
            <SparklineShape geometry=card.geometry filled=filled/>
        </div>
    }
    .into_any()
}
