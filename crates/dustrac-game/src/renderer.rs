use dustrac_engine::paint::Color;

use crate::display::{DisplayPlan, Resolution};
use crate::scene::SceneSize;

/// Render surface description handed to the game object.
///
/// The GPU surface itself belongs to the window runtime; this carries what the
/// game needs to draw into it.
#[derive(Debug, Clone)]
pub struct Renderer {
    resolution: Resolution,
    fullscreen: bool,
    scene: SceneSize,
    track: Color,
    pit_lane: Color,
}

impl Renderer {
    pub fn new(plan: &DisplayPlan) -> Self {
        Self {
            resolution: plan.resolution,
            fullscreen: plan.fullscreen,
            scene: plan.scene,
            track: Color::from_srgb_u8(0x4a, 0x44, 0x3c),
            pit_lane: Color::from_srgb_u8(0x3c, 0x6e, 0x3c),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn scene(&self) -> SceneSize {
        self.scene
    }

    /// Background color; tinted while a player is in the pit.
    pub fn clear_color(&self, pitting: bool) -> Color {
        if pitting {
            self.track.lerp(self.pit_lane, 0.5)
        } else {
            self.track
        }
    }
}
