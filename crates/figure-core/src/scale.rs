// File: crates/figure-core/src/scale.rs
// Summary: Linear data -> canvas transform used by chart panels and the diagram.

/// Maps a data interval onto a canvas interval. The range may be inverted
/// (bottom > top) for y axes, where larger values sit higher on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(d0: f64, d1: f64, r0: f32, r1: f32) -> Self {
        let mut s = Self { d0, d1, r0, r1 };
        if (s.d1 - s.d0).abs() < 1e-12 { s.d1 = s.d0 + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let t = (v - self.d0) / (self.d1 - self.d0);
        self.r0 + t as f32 * (self.r1 - self.r0)
    }

    /// Canvas length of one data unit (signed, follows the range direction).
    pub fn unit(&self) -> f32 {
        ((self.r1 - self.r0) as f64 / (self.d1 - self.d0)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_for_y() {
        let s = LinearScale::new(0.0, 10.0, 500.0, 100.0);
        assert_eq!(s.to_px(0.0), 500.0);
        assert_eq!(s.to_px(10.0), 100.0);
        assert_eq!(s.to_px(5.0), 300.0);
        assert_eq!(s.unit(), -40.0);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let s = LinearScale::new(3.0, 3.0, 0.0, 10.0);
        assert_eq!(s.d1, 4.0);
        assert_eq!(s.to_px(3.5), 5.0);
    }
}
