// File: crates/figure-core/src/geometry.rs
// Summary: Point/rect math for connectors: arc3 curves, end shrinking, arrow heads.
// All coordinates are canvas space (points, y grows downwards).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pt {
    pub x: f32,
    pub y: f32,
}

impl Pt {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }
    pub fn dist(self, o: Pt) -> f32 { ((self.x - o.x).powi(2) + (self.y - o.y).powi(2)).sqrt() }
    fn lerp(self, o: Pt, t: f32) -> Pt { Pt::new(self.x + (o.x - self.x) * t, self.y + (o.y - self.y) * t) }
}

impl From<Pt> for skia_safe::Point {
    fn from(p: Pt) -> Self { skia_safe::Point::new(p.x, p.y) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    /// Normalize so left <= right and top <= bottom.
    pub fn sorted(self) -> Self {
        Self::from_ltrb(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }
}

impl From<RectF> for skia_safe::Rect {
    fn from(r: RectF) -> Self { skia_safe::Rect::from_ltrb(r.left, r.top, r.right, r.bottom) }
}

/// Quadratic Bézier `p0 -> c -> p2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub p0: Pt,
    pub c: Pt,
    pub p2: Pt,
}

impl Quad {
    /// Curved connector from `a` to `b` bending by `rad` times the chord length.
    /// Positive `rad` bends to the right of travel on screen, as an arc3
    /// connection style does in a y-up display space.
    pub fn arc3(a: Pt, b: Pt, rad: f32) -> Self {
        let mid = a.lerp(b, 0.5);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        Self { p0: a, c: Pt::new(mid.x - rad * dy, mid.y + rad * dx), p2: b }
    }

    pub fn at(&self, t: f32) -> Pt {
        let u = 1.0 - t;
        Pt::new(
            u * u * self.p0.x + 2.0 * u * t * self.c.x + t * t * self.p2.x,
            u * u * self.p0.y + 2.0 * u * t * self.c.y + t * t * self.p2.y,
        )
    }

    /// Unit direction of travel at `t`.
    pub fn tangent(&self, t: f32) -> (f32, f32) {
        let u = 1.0 - t;
        let dx = 2.0 * u * (self.c.x - self.p0.x) + 2.0 * t * (self.p2.x - self.c.x);
        let dy = 2.0 * u * (self.c.y - self.p0.y) + 2.0 * t * (self.p2.y - self.c.y);
        let n = (dx * dx + dy * dy).sqrt().max(1e-6);
        (dx / n, dy / n)
    }

    /// Sub-curve between parameters `t0 < t1`.
    pub fn segment(&self, t0: f32, t1: f32) -> Self {
        let w0 = (1.0 - t0) * (1.0 - t1);
        let w1 = (1.0 - t0) * t1 + t0 * (1.0 - t1);
        let w2 = t0 * t1;
        let c = Pt::new(
            w0 * self.p0.x + w1 * self.c.x + w2 * self.p2.x,
            w0 * self.p0.y + w1 * self.c.y + w2 * self.p2.y,
        );
        Self { p0: self.at(t0), c, p2: self.at(t1) }
    }

    /// Cut `shrink_a` off the start and `shrink_b` off the end (straight-line
    /// distance from the original endpoints). `None` when nothing would remain.
    pub fn shrink(&self, shrink_a: f32, shrink_b: f32) -> Option<Self> {
        if self.p0.dist(self.p2) <= shrink_a + shrink_b { return None; }
        let t0 = if shrink_a > 0.0 { self.param_at_distance(self.p0, shrink_a, true) } else { 0.0 };
        let t1 = if shrink_b > 0.0 { self.param_at_distance(self.p2, shrink_b, false) } else { 1.0 };
        (t0 < t1).then(|| self.segment(t0, t1))
    }

    // Bisection for the t where the curve leaves the circle of radius `r` around `origin`.
    fn param_at_distance(&self, origin: Pt, r: f32, from_start: bool) -> f32 {
        let (mut inside, mut outside) = if from_start { (0.0f32, 1.0f32) } else { (1.0f32, 0.0f32) };
        for _ in 0..32 {
            let mid = (inside + outside) * 0.5;
            if self.at(mid).dist(origin) < r { inside = mid; } else { outside = mid; }
        }
        (inside + outside) * 0.5
    }
}

/// Two barbs of an open arrow head ending at `tip`, travelling along `dir` (unit).
pub fn arrow_barbs(tip: Pt, dir: (f32, f32), length: f32, half_width: f32) -> [Pt; 2] {
    let base = Pt::new(tip.x - dir.0 * length, tip.y - dir.1 * length);
    let (nx, ny) = (-dir.1, dir.0);
    [
        Pt::new(base.x + nx * half_width, base.y + ny * half_width),
        Pt::new(base.x - nx * half_width, base.y - ny * half_width),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: f32, b: f32) -> bool { (a - b).abs() < 1e-3 }

    #[test]
    fn arc3_offsets_control_from_midpoint() {
        // travelling rightwards, +0.1 bends the curve down the page
        let q = Quad::arc3(Pt::new(0.0, 0.0), Pt::new(100.0, 0.0), 0.1);
        assert!(near(q.c.x, 50.0));
        assert!(near(q.c.y, 10.0));
        let straight = Quad::arc3(Pt::new(0.0, 0.0), Pt::new(0.0, 40.0), 0.0);
        assert_eq!(straight.c, Pt::new(0.0, 20.0));
    }

    #[test]
    fn shrink_keeps_requested_distance() {
        let q = Quad::arc3(Pt::new(0.0, 0.0), Pt::new(200.0, 50.0), 0.1);
        let s = q.shrink(15.0, 15.0).expect("long enough");
        assert!(near(s.p0.dist(q.p0), 15.0));
        assert!(near(s.p2.dist(q.p2), 15.0));
        // shrunk curve still lies on the original
        let mid = s.at(0.5);
        assert!(mid.x > 0.0 && mid.x < 200.0);
    }

    #[test]
    fn shrink_of_short_connector_is_empty() {
        let q = Quad::arc3(Pt::new(0.0, 0.0), Pt::new(20.0, 0.0), 0.1);
        assert!(q.shrink(15.0, 15.0).is_none());
    }

    #[test]
    fn barbs_are_symmetric_behind_tip() {
        let [l, r] = arrow_barbs(Pt::new(10.0, 0.0), (1.0, 0.0), 4.0, 2.0);
        assert_eq!(l, Pt::new(6.0, 2.0));
        assert_eq!(r, Pt::new(6.0, -2.0));
    }

    #[test]
    fn rect_helpers() {
        let r = RectF::from_ltwh(1.0, 2.0, 4.0, 6.0);
        assert_eq!((r.width(), r.height()), (4.0, 6.0));
        assert_eq!(RectF::from_ltrb(5.0, 8.0, 1.0, 2.0).sorted(), RectF::from_ltrb(1.0, 2.0, 5.0, 8.0));
    }
}
