// File: crates/figure-core/src/series.rs
// Summary: Line series with point markers and horizontal reference lines.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Marker {
    /// Filled circle; radius in points.
    Circle { radius: f32 },
}

impl Default for Marker {
    fn default() -> Self {
        // 6 pt marker diameter
        Marker::Circle { radius: 3.0 }
    }
}

#[derive(Clone, Debug)]
pub struct LineSeries {
    pub points: Vec<(f64, f64)>,
    pub color: skia::Color,
    /// Stroke width in points.
    pub width: f32,
    pub marker: Option<Marker>,
}

impl LineSeries {
    pub fn new(points: Vec<(f64, f64)>, color: skia::Color) -> Self {
        Self { points, color, width: 1.5, marker: None }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// (x_min, x_max, y_min, y_max) over finite points, if any.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc, &(x, y)| match acc {
                None => Some((x, x, y, y)),
                Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
            })
    }
}

/// Horizontal line across the whole panel at value `y`.
#[derive(Clone, Copy, Debug)]
pub struct RefLine {
    pub y: f64,
    pub color: skia::Color,
    pub width: f32,
}

impl RefLine {
    pub fn new(y: f64, color: skia::Color) -> Self {
        Self { y, color, width: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_skip_non_finite() {
        let s = LineSeries::new(vec![(0.0, 2.0), (1.0, f64::NAN), (3.0, -1.0)], skia::Color::BLACK);
        assert_eq!(s.bounds(), Some((0.0, 3.0, -1.0, 2.0)));
        assert_eq!(LineSeries::new(Vec::new(), skia::Color::BLACK).bounds(), None);
    }
}
