use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(center.x - size.x * 0.5, center.y - size.y * 0.5),
            size,
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(self, other: Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.origin.x < b_max.x
            && other.origin.x < a_max.x
            && self.origin.y < b_max.y
            && other.origin.y < a_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn overlapping_rects() {
        assert!(r(0.0, 0.0, 10.0, 10.0).overlaps(r(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn contained_rect_overlaps() {
        assert!(r(0.0, 0.0, 100.0, 100.0).overlaps(r(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn touching_edge_is_not_overlap() {
        // Zero-width contact is not a collision.
        assert!(!r(0.0, 0.0, 10.0, 10.0).overlaps(r(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        assert!(!r(0.0, 0.0, 0.0, 10.0).overlaps(r(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn centered_rect_round_trips_center() {
        let rect = Rect::centered(Vec2::new(50.0, 20.0), Vec2::new(10.0, 4.0));
        assert_eq!(rect.origin, Vec2::new(45.0, 18.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
    }
}
