// File: crates/figure-core/src/types.rs
// Summary: Shared sizes and paddings. Drawing happens in points (1/72 in).

/// Points per inch; every layout constant in this crate is expressed in points.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Physical figure size plus the raster resolution used for PNG output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureSize {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
}

impl FigureSize {
    pub const fn new(width_in: f32, height_in: f32, dpi: f32) -> Self {
        Self { width_in, height_in, dpi }
    }

    /// Page size in points, as used by the PDF backend.
    pub fn points(&self) -> (f32, f32) {
        (self.width_in * POINTS_PER_INCH, self.height_in * POINTS_PER_INCH)
    }

    /// Raster size in whole pixels at `dpi`.
    pub fn pixels(&self) -> (i32, i32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as i32,
            (self.height_in * self.dpi).round().max(1.0) as i32,
        )
    }

    /// Canvas scale that maps points onto pixels.
    pub fn raster_scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }
}

/// Margins around a plot area, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f32 { self.top + self.bottom }
}

impl Default for Insets {
    /// Room for a rotated y label, tick labels on the left and one tick row below.
    fn default() -> Self {
        Self::new(62.0, 14.0, 10.0, 28.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sizes() {
        let trends = FigureSize::new(12.0, 8.0, 300.0);
        assert_eq!(trends.pixels(), (3600, 2400));
        assert_eq!(trends.points(), (864.0, 576.0));

        let pathways = FigureSize::new(16.0, 12.0, 300.0);
        assert_eq!(pathways.points(), (1152.0, 864.0));
        assert_eq!(FigureSize { dpi: 72.0, ..pathways }.pixels(), (1152, 864));
    }
}
