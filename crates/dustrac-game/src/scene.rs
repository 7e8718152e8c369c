use dustrac_engine::coords::{Rect, Vec2};

/// Scene extent in scene units.
///
/// The width is fixed; the height is derived from the display aspect ratio so
/// the scene fills the screen without stretching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SceneSize {
    pub width: u32,
    pub height: u32,
}

impl SceneSize {
    pub const DEFAULT_WIDTH: u32 = 1024;
    pub const DEFAULT_HEIGHT: u32 = 768;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Keeps `width` and picks the height matching the `aspect_w : aspect_h`
    /// ratio, rounding down. A degenerate aspect keeps the default height.
    pub fn with_aspect(width: u32, aspect_w: u32, aspect_h: u32) -> Self {
        if aspect_w == 0 || aspect_h == 0 {
            return Self::new(width, Self::DEFAULT_HEIGHT);
        }
        let height = u64::from(width) * u64::from(aspect_h) / u64::from(aspect_w);
        Self::new(width, u32::try_from(height).unwrap_or(u32::MAX))
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn center(self) -> Vec2 {
        self.bounds().center()
    }
}

impl Default for SceneSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widescreen_shrinks_height() {
        assert_eq!(SceneSize::with_aspect(1024, 1920, 1080), SceneSize::new(1024, 576));
    }

    #[test]
    fn four_by_three_keeps_default() {
        assert_eq!(SceneSize::with_aspect(1024, 800, 600), SceneSize::default());
    }

    #[test]
    fn zero_aspect_falls_back() {
        assert_eq!(SceneSize::with_aspect(1024, 0, 600).height, SceneSize::DEFAULT_HEIGHT);
    }
}
