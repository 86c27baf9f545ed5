//! Standalone SVG rendering for sparklines and forecast cards
//!
//! Produces self-contained `<svg>` documents so the CLI can write files and
//! server-side pages can inline them without a charting dependency.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;
use crate::forecast::ForecastGeometry;
use crate::sparkline::{map_series, SparklineGeometry, Viewport};

/// Radius of the emphasized last-point marker
pub const MARKER_RADIUS: f64 = 2.0;

/// Rendering parameters for a sparkline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    pub viewport: Viewport,
    /// Line color (any SVG paint)
    pub stroke: String,
    /// Area color, used when `filled` is set
    pub fill: String,
    /// Draw the filled area under the curve
    pub filled: bool,
    pub stroke_width: f64,
    /// Draw a marker on the final data point
    pub show_last_marker: bool,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            stroke: "#2563eb".to_string(),
            fill: "rgba(37, 99, 235, 0.15)".to_string(),
            filled: false,
            stroke_width: 1.5,
            show_last_marker: true,
        }
    }
}

impl RenderSpec {
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn with_colors(mut self, stroke: impl Into<String>, fill: impl Into<String>) -> Self {
        self.stroke = stroke.into();
        self.fill = fill.into();
        self
    }
}

/// Map `series` and render it as an SVG document.
///
/// An empty series yields the bare canvas at the requested size.
pub fn render_sparkline_svg(series: &[f64], spec: &RenderSpec) -> String {
    let geometry = map_series(series, spec.viewport);
    render_geometry_svg(&geometry, spec)
}

/// Render already-mapped geometry.
///
/// Colors and size come from `spec`; the viewport is taken from the geometry.
pub fn render_geometry_svg(geometry: &SparklineGeometry, spec: &RenderSpec) -> String {
    let viewport = geometry.viewport();
    let mut out = open_svg(viewport, "sparkline");

    if spec.filled {
        if let Some(area) = geometry.area_path() {
            out.push_str(&format!(
                r#"<path class="sparkline-area" d="{}" fill="{}" stroke="none"/>"#,
                area,
                escape_xml(&spec.fill)
            ));
            out.push('\n');
        }
    }

    if let Some(line) = geometry.line_path() {
        push_line(&mut out, "sparkline-line", &line, spec, None);
    }

    if spec.show_last_marker {
        if let Some(last) = geometry.last_point() {
            push_marker(&mut out, last.x, last.y, spec);
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Render a forecast: solid historical line, dashed forecast line, and a
/// vertical divider at the boundary.
pub fn render_forecast_svg(forecast: &ForecastGeometry, spec: &RenderSpec) -> String {
    let viewport = forecast.viewport();
    let mut out = open_svg(viewport, "forecast");

    if let Some(split_x) = forecast.split_x() {
        if forecast.forecast_path().is_some() {
            out.push_str(&format!(
                r#"<line class="forecast-split" x1="{:.2}" y1="0" x2="{:.2}" y2="{}" stroke="{}" stroke-width="0.5" stroke-dasharray="2,2"/>"#,
                split_x,
                split_x,
                viewport.height,
                escape_xml(&spec.stroke)
            ));
            out.push('\n');
        }
    }

    if let Some(historical) = forecast.historical_path() {
        push_line(&mut out, "forecast-historical", &historical, spec, None);
    }

    if let Some(predicted) = forecast.forecast_path() {
        push_line(&mut out, "forecast-predicted", &predicted, spec, Some("4,3"));
    }

    if spec.show_last_marker {
        if let Some(last) = forecast.last_point() {
            push_marker(&mut out, last.x, last.y, spec);
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Write an SVG document to `path`
pub fn write_svg(path: &Path, svg: &str) -> Result<(), CoreError> {
    std::fs::write(path, svg).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(bytes = svg.len(), "Wrote {}", path.display());
    Ok(())
}

fn open_svg(viewport: Viewport, class: &str) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"class="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        class, viewport.width, viewport.height, viewport.width, viewport.height
    ));
    out.push('\n');
    out
}

fn push_line(out: &mut String, class: &str, d: &str, spec: &RenderSpec, dash: Option<&str>) {
    out.push_str(&format!(
        r#"<path class="{}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
        class,
        d,
        escape_xml(&spec.stroke),
        spec.stroke_width
    ));
    if let Some(dash) = dash {
        out.push_str(&format!(r#" stroke-dasharray="{}""#, dash));
    }
    out.push_str("/>\n");
}

fn push_marker(out: &mut String, x: f64, y: f64, spec: &RenderSpec) {
    out.push_str(&format!(
        r#"<circle class="sparkline-last" cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
        x,
        y,
        MARKER_RADIUS,
        escape_xml(&spec.stroke)
    ));
    out.push('\n');
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelboard_types::{ForecastPayload, MetricUnit};

    #[test]
    fn test_empty_series_renders_blank_canvas() {
        let svg = render_sparkline_svg(&[], &RenderSpec::default());

        assert!(svg.contains(r#"width="160" height="48" viewBox="0 0 160 48""#));
        assert!(!svg.contains("<path"), "No path for empty series");
        assert!(!svg.contains("<circle"), "No marker for empty series");
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_line_only() {
        let svg = render_sparkline_svg(&[1.0, 5.0, 3.0], &RenderSpec::default());

        assert!(svg.contains(r#"d="M 1.00,47.00 L 80.00,1.00 L 159.00,24.00""#));
        assert!(!svg.contains("sparkline-area"));
        assert!(svg.contains(r#"<circle class="sparkline-last" cx="159.00" cy="24.00""#));
    }

    #[test]
    fn test_filled_area_drawn_beneath_line() {
        let spec = RenderSpec::default().with_filled(true);
        let svg = render_sparkline_svg(&[1.0, 5.0, 3.0], &spec);

        let area_at = svg.find("sparkline-area").expect("area path");
        let line_at = svg.find("sparkline-line").expect("line path");
        assert!(area_at < line_at, "Area must be painted before the line");
        assert!(svg.contains("L 159.00,47.00 L 1.00,47.00 Z"));
    }

    #[test]
    fn test_marker_disabled() {
        let spec = RenderSpec {
            show_last_marker: false,
            ..RenderSpec::default()
        };
        let svg = render_sparkline_svg(&[1.0, 2.0], &spec);
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_colors_escaped() {
        let spec = RenderSpec::default().with_colors(r#"red" onload="x"#, "<fill>");
        let svg = render_sparkline_svg(&[1.0, 2.0], &spec.with_filled(true));

        assert!(!svg.contains(r#"onload="x""#));
        assert!(svg.contains("red&quot; onload=&quot;x"));
        assert!(svg.contains("&lt;fill&gt;"));
    }

    #[test]
    fn test_custom_viewport() {
        let spec = RenderSpec::default().with_viewport(Viewport::new(100.0, 20.5));
        let svg = render_sparkline_svg(&[3.0], &spec);
        assert!(svg.contains(r#"width="100" height="20.5""#));
        assert!(svg.contains(r#"d="M 1.00,19.50""#));
    }

    #[test]
    fn test_forecast_svg() {
        let payload = ForecastPayload {
            metric: "revenue".to_string(),
            label: String::new(),
            unit: MetricUnit::Currency,
            historical: vec![0.0, 10.0],
            predicted: vec![20.0],
            confidence: 0.8,
        };
        let forecast = ForecastGeometry::build(&payload, Viewport::default());
        let svg = render_forecast_svg(&forecast, &RenderSpec::default());

        assert!(svg.contains("forecast-historical"));
        assert!(svg.contains(r#"stroke-dasharray="4,3""#));
        assert!(svg.contains(r#"x1="80.00""#), "Split line at last observation");
    }

    #[test]
    fn test_write_svg_missing_dir() {
        let err = write_svg(Path::new("/nonexistent/steelboard/out.svg"), "<svg/>").unwrap_err();
        assert!(matches!(err, CoreError::FileWrite { .. }));
    }
}
