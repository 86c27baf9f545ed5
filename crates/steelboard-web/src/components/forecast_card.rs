//! Forecast card: observed line, dashed projection, confidence badge

use leptos::prelude::*;
use steelboard_core::format::format_metric;
use steelboard_core::render::RenderSpec;
use steelboard_core::ForecastGeometry;

/// Forecast card component
#[component]
pub fn ForecastCard(
    forecast: ForecastGeometry,
    /// Line color
    #[prop(into, default = RenderSpec::default().stroke)]
    stroke: String,
) -> impl IntoView {
    let viewport = forecast.viewport();
    let level_class = format!(
        "forecast-confidence confidence-{}",
        forecast.confidence_level().label().to_lowercase()
    );
    let confidence = forecast.confidence_label();
    let total = format_metric(forecast.predicted_total(), forecast.unit);
    let has_prediction = forecast.forecast_path().is_some();

    let split = forecast
        .split_x()
        .filter(|_| has_prediction)
        .map(|x| format!("{:.2}", x));
    let historical = forecast.historical_path();
    let predicted = forecast.forecast_path();
    let label = forecast.label.clone();
    let split_stroke = stroke.clone();
    let predicted_stroke = stroke.clone();

    view! {
        <div class="card forecast-card">
            <div class="card-header">
                <h3 class="card-title">{label}</h3>
                <span class=level_class>{confidence}</span>
            </div>
            <div class="card-body">
                <svg
                    class="forecast-chart"
                    width=viewport.width.to_string()
                    height=viewport.height.to_string()
                    viewBox=format!("0 0 {} {}", viewport.width, viewport.height)
                >
                    {split.map(|x| view! {
                        <line
                            class="forecast-split"
                            x1=x.clone()
                            y1="0"
                            x2=x
                            y2=viewport.height.to_string()
                            stroke=split_stroke
                            stroke-width="0.5"
                            stroke-dasharray="2,2"
                        />
                    })}
                    {historical.map(|d| view! {
                        <path class="forecast-historical" d=d fill="none" stroke=stroke stroke-width="1.5"/>
                    })}
                    {predicted.map(|d| view! {
                        <path
                            class="forecast-predicted"
                            d=d
                            fill="none"
                            stroke=predicted_stroke
                            stroke-width="1.5"
                            stroke-dasharray="4,3"
                        />
                    })}
                </svg>
                {has_prediction.then(|| view! {
                    <div class="forecast-total">
                        <span class="forecast-total-label">"Projected total"</span>
                        <span class="forecast-total-value">{total}</span>
                    </div>
                })}
            </div>
        </div>
    }
}
