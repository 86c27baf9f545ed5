//! Sparkline geometry
//!
//! Maps a one-dimensional numeric series into points and an SVG path inside a
//! fixed viewport. A 1-unit padding is kept on every edge so the stroke is
//! never clipped by the viewport boundary.
//!
//! The mapping never fails: empty series produce empty geometry, non-finite
//! values are coerced to `0`, and flat series render as a line on the
//! bottom padding edge.

use serde::{Deserialize, Serialize};

/// Default sparkline width in viewport units
pub const DEFAULT_WIDTH: f64 = 160.0;
/// Default sparkline height in viewport units
pub const DEFAULT_HEIGHT: f64 = 48.0;
/// Margin reserved on each edge of the viewport
pub const PADDING: f64 = 1.0;

/// Fixed-size drawing area the series is normalized into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Y coordinate of the bottom padding line (area fills close here)
    pub fn baseline_y(&self) -> f64 {
        self.height - PADDING
    }

    /// Check whether a point lies inside `[0, width] x [0, height]`
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// A series element projected into viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    fn svg(&self) -> String {
        format!("{:.2},{:.2}", self.x, self.y)
    }
}

/// Replace every NaN / infinite element with `0`.
///
/// Length and order are preserved.
pub fn clean_series(series: &[f64]) -> Vec<f64> {
    series
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

/// Geometry produced for one sparkline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklineGeometry {
    viewport: Viewport,
    points: Vec<NormalizedPoint>,
}

impl SparklineGeometry {
    /// Empty geometry: a blank canvas of the given size
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            points: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Points in series order (one per input element)
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final data point, rendered as the emphasized marker
    pub fn last_point(&self) -> Option<NormalizedPoint> {
        self.points.last().copied()
    }

    /// Polyline through every point: `M x,y L x,y ...`
    ///
    /// Returns `None` for empty geometry.
    pub fn line_path(&self) -> Option<String> {
        polyline(&self.points)
    }

    /// Closed region between the line and the bottom padding line.
    ///
    /// Drops from the last point to the baseline, runs back to the first
    /// point's x and closes.
    pub fn area_path(&self) -> Option<String> {
        let mut path = self.line_path()?;
        let first = self.points.first()?;
        let last = self.points.last()?;
        let baseline = self.viewport.baseline_y();
        path.push_str(&format!(
            " L {:.2},{:.2} L {:.2},{:.2} Z",
            last.x, baseline, first.x, baseline
        ));
        Some(path)
    }

    /// Line or area path depending on `filled`
    pub fn path(&self, filled: bool) -> Option<String> {
        if filled {
            self.area_path()
        } else {
            self.line_path()
        }
    }
}

/// Straight-segment path through `points`, `None` when there are none
pub(crate) fn polyline(points: &[NormalizedPoint]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    let mut path = format!("M {}", first.svg());
    for point in rest {
        path.push_str(" L ");
        path.push_str(&point.svg());
    }
    Some(path)
}

/// Map a series into sparkline geometry.
///
/// - `x = i / (n - 1) * (width - 2) + 1`, pinned to `1` when `n == 1`
/// - `y = (height - 1) - (v - min) / range * (height - 2)`, inverted so larger
///   values sit higher on screen
/// - `range` is replaced by `1` when the series is flat
pub fn map_series(series: &[f64], viewport: Viewport) -> SparklineGeometry {
    let cleaned = clean_series(series);
    let replaced = series.iter().filter(|v| !v.is_finite()).count();
    if replaced > 0 {
        tracing::debug!(replaced, "Coerced non-finite sparkline values to 0");
    }

    if cleaned.is_empty() {
        return SparklineGeometry::empty(viewport);
    }

    let min = cleaned.iter().copied().fold(f64::INFINITY, f64::min);
    let max = cleaned.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let n = cleaned.len();
    let inner_width = viewport.width - 2.0 * PADDING;
    let inner_height = viewport.height - 2.0 * PADDING;

    let points = cleaned
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = if n > 1 {
                (i as f64 / (n - 1) as f64) * inner_width + PADDING
            } else {
                PADDING
            };
            let y = (viewport.height - PADDING) - normalize(value, min, max) * inner_height;
            NormalizedPoint { x, y }
        })
        .collect();

    SparklineGeometry { viewport, points }
}

/// Position of `value` within `[min, max]` as a fraction in `[0, 1]`.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let mut range = max - min;
    if range == 0.0 {
        range = 1.0;
    }

    let t = if range.is_finite() {
        (value - min) / range
    } else {
        // max - min overflowed (values near f64::MAX with opposite signs)
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    };

    t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(geometry: &SparklineGeometry) {
        let vp = geometry.viewport();
        for p in geometry.points() {
            assert!(vp.contains(*p), "Point {:?} outside {:?}", p, vp);
        }
    }

    #[test]
    fn test_empty_series() {
        let geometry = map_series(&[], Viewport::default());

        assert!(geometry.is_empty());
        assert_eq!(geometry.len(), 0);
        assert!(geometry.line_path().is_none(), "Empty series has no path");
        assert!(geometry.area_path().is_none());
        assert!(geometry.last_point().is_none());
        assert_eq!(geometry.viewport(), Viewport::new(160.0, 48.0));
    }

    #[test]
    fn test_concrete_three_points() {
        let geometry = map_series(&[1.0, 5.0, 3.0], Viewport::new(160.0, 48.0));
        let points = geometry.points();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, 1.0);
        assert_eq!(points[1].x, 80.0);
        assert_eq!(points[2].x, 159.0);

        // Higher value -> higher on screen -> smaller y
        assert!(points[1].y < points[0].y);
        assert!(points[1].y < points[2].y);
        assert_eq!(points[0].y, 47.0, "Minimum sits on the bottom padding line");
        assert_eq!(points[1].y, 1.0, "Maximum sits on the top padding line");
        assert_eq!(points[2].y, 24.0);
        assert_in_bounds(&geometry);
    }

    #[test]
    fn test_flat_series_renders_bottom_line() {
        let geometry = map_series(&[7.0, 7.0, 7.0], Viewport::default());

        assert_eq!(geometry.len(), 3);
        for p in geometry.points() {
            assert_eq!(p.y, 47.0, "Flat series must sit at height - 1");
        }
    }

    #[test]
    fn test_flat_series_independent_of_magnitude() {
        for constant in [-1e9, -3.0, 0.0, 0.5, 42.0, 1e12] {
            let geometry = map_series(&[constant; 5], Viewport::new(100.0, 20.0));
            let ys: Vec<f64> = geometry.points().iter().map(|p| p.y).collect();
            assert!(
                ys.iter().all(|&y| y == ys[0]),
                "Constant {constant} produced uneven ys: {ys:?}"
            );
        }
    }

    #[test]
    fn test_single_element_pinned_left() {
        let geometry = map_series(&[12.5], Viewport::default());

        assert_eq!(geometry.len(), 1);
        let p = geometry.points()[0];
        assert_eq!(p.x, PADDING, "Single point is pinned to the left padding edge");
        assert_eq!(p.y, 47.0);
        assert_in_bounds(&geometry);
        assert_eq!(geometry.line_path().as_deref(), Some("M 1.00,47.00"));
    }

    #[test]
    fn test_non_finite_values_cleaned() {
        let dirty = [1.0, f64::NAN, 4.0, f64::INFINITY, f64::NEG_INFINITY, 2.0];
        let clean = [1.0, 0.0, 4.0, 0.0, 0.0, 2.0];

        let from_dirty = map_series(&dirty, Viewport::default());
        let from_clean = map_series(&clean, Viewport::default());

        assert_eq!(from_dirty, from_clean);
        assert_eq!(from_dirty.len(), dirty.len(), "No element is dropped");
        for p in from_dirty.points() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_all_non_finite() {
        let geometry = map_series(&[f64::NAN, f64::NAN], Viewport::default());
        assert_eq!(geometry.len(), 2);
        assert!(geometry.points().iter().all(|p| p.y == 47.0));
    }

    #[test]
    fn test_clean_series_idempotent() {
        let dirty = [f64::NAN, 3.0, f64::INFINITY];
        let once = clean_series(&dirty);
        let twice = clean_series(&once);
        assert_eq!(once, vec![0.0, 3.0, 0.0]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extreme_range_stays_finite() {
        let geometry = map_series(&[-f64::MAX, 0.0, f64::MAX], Viewport::default());
        for p in geometry.points() {
            assert!(p.y.is_finite(), "Overflowing range must not leak NaN");
        }
        assert_in_bounds(&geometry);
        assert_eq!(geometry.points()[1].y, 24.0);
    }

    #[test]
    fn test_line_path_format() {
        let geometry = map_series(&[1.0, 5.0, 3.0], Viewport::default());
        assert_eq!(
            geometry.line_path().as_deref(),
            Some("M 1.00,47.00 L 80.00,1.00 L 159.00,24.00")
        );
    }

    #[test]
    fn test_area_path_closes_on_baseline() {
        let geometry = map_series(&[1.0, 5.0, 3.0], Viewport::default());
        let area = geometry.area_path().unwrap();

        assert!(area.starts_with("M 1.00,47.00 L 80.00,1.00 L 159.00,24.00"));
        assert!(area.ends_with(" L 159.00,47.00 L 1.00,47.00 Z"), "got {area}");
        assert_eq!(geometry.path(true), Some(area));
        assert_eq!(geometry.path(false), geometry.line_path());
    }

    #[test]
    fn test_last_point_marker() {
        let geometry = map_series(&[2.0, 9.0, 4.0, 6.0], Viewport::default());
        let last = geometry.last_point().unwrap();
        assert_eq!(last, *geometry.points().last().unwrap());
        assert_eq!(last.x, 159.0);
    }

    #[test]
    fn test_bounds_hold_for_mixed_series() {
        let series: Vec<f64> = (0..50)
            .map(|i| ((i as f64) * 0.7).sin() * 1000.0 - 250.0)
            .collect();
        for (w, h) in [(160.0, 48.0), (10.0, 4.0), (2.0, 2.0), (800.0, 100.0)] {
            let geometry = map_series(&series, Viewport::new(w, h));
            assert_eq!(geometry.len(), series.len());
            assert_in_bounds(&geometry);
        }
    }
}
