//! Sparkline component for compact trend display

use leptos::prelude::*;
use steelboard_core::render::{RenderSpec, MARKER_RADIUS};
use steelboard_core::sparkline::{
    map_series, SparklineGeometry, Viewport, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

fn default_stroke() -> String {
    RenderSpec::default().stroke
}

fn default_fill() -> String {
    RenderSpec::default().fill
}

/// Sparkline component - maps raw values and draws them
#[component]
pub fn Sparkline(
    /// Values in time order; NaN/infinite entries render as 0
    data: Vec<f64>,
    /// Viewport width
    #[prop(default = DEFAULT_WIDTH)]
    width: f64,
    /// Viewport height
    #[prop(default = DEFAULT_HEIGHT)]
    height: f64,
    /// Draw the area under the curve
    #[prop(default = false)]
    filled: bool,
    /// Line color
    #[prop(into, default = default_stroke())]
    stroke: String,
    /// Area color, used when `filled`
    #[prop(into, default = default_fill())]
    fill: String,
) -> impl IntoView {
    let geometry = map_series(&data, Viewport::new(width, height));
    view! { <SparklineShape geometry=geometry filled=filled stroke=stroke fill=fill/> }
}

/// Draws already-mapped geometry; an empty geometry is a blank canvas
#[component]
pub fn SparklineShape(
    geometry: SparklineGeometry,
    #[prop(default = false)]
    filled: bool,
    #[prop(into, default = default_stroke())]
    stroke: String,
    #[prop(into, default = default_fill())]
    fill: String,
) -> impl IntoView {
    let stroke_width = RenderSpec::default().stroke_width.to_string();

    let viewport = geometry.viewport();
    let area = if filled { geometry.area_path() } else { None };
    let line = geometry.line_path();
    let marker = geometry.last_point();
    let empty_class = if geometry.is_empty() {
        "sparkline-empty"
    } else {
        ""
    };
    let marker_fill = stroke.clone();

    view! {
        <svg
            class=format!("sparkline {}", empty_class)
            width=viewport.width.to_string()
            height=viewport.height.to_string()
            viewBox=format!("0 0 {} {}", viewport.width, viewport.height)
        >
            {area.map(|d| view! {
                <path class="sparkline-area" d=d fill=fill stroke="none"/>
            })}
            {line.map(|d| view! {
                <path
                    class="sparkline-line"
                    d=d
                    fill="none"
                    stroke=stroke
                    stroke-width=stroke_width
                    stroke-linecap="round"
                    stroke-linejoin="round"
                />
            })}
            {marker.map(|p| view! {
                <circle
                    class="sparkline-last"
                    cx=format!("{:.2}", p.x)
                    cy=format!("{:.2}", p.y)
                    r=MARKER_RADIUS.to_string()
                    fill=marker_fill
                />
            })}
        </svg>
    }
}
