//! Window dimensions and scene sizing.
//!
//! Pure functions of the settings and the desktop size so startup sizing is
//! testable without a display.

use crate::scene::SceneSize;
use crate::settings::Settings;

/// A pixel resolution.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Resolved display layout for one run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayPlan {
    /// Render resolution: the desktop's when `full_resolution` is set.
    pub resolution: Resolution,
    pub fullscreen: bool,
    pub scene: SceneSize,
}

impl DisplayPlan {
    /// Resolves the layout.
    ///
    /// Fullscreen scenes follow the desktop aspect ratio; windowed scenes follow
    /// the window's. When the platform cannot report a desktop size the
    /// configured resolution stands in for it.
    pub fn resolve(settings: &Settings, desktop: Option<Resolution>, scene_width: u32) -> Self {
        let configured = Resolution::new(settings.h_res, settings.v_res);
        let desktop = desktop.unwrap_or(configured);

        let resolution = if settings.full_resolution {
            desktop
        } else {
            configured
        };

        let fullscreen = !settings.windowed;
        let aspect = if fullscreen { desktop } else { resolution };

        Self {
            resolution,
            fullscreen,
            scene: SceneSize::with_aspect(scene_width, aspect.width, aspect.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(full_resolution: bool, windowed: bool) -> Settings {
        Settings {
            h_res: 800,
            v_res: 600,
            full_resolution,
            windowed,
            fps: 60,
        }
    }

    const DESKTOP: Resolution = Resolution::new(1920, 1080);

    #[test]
    fn full_resolution_uses_the_desktop() {
        let plan = DisplayPlan::resolve(&settings(true, false), Some(DESKTOP), 1024);
        assert_eq!(plan.resolution, DESKTOP);
        assert!(plan.fullscreen);
        assert_eq!(plan.scene, SceneSize::new(1024, 576));
    }

    #[test]
    fn configured_resolution_fullscreen_still_follows_desktop_aspect() {
        let plan = DisplayPlan::resolve(&settings(false, false), Some(DESKTOP), 1024);
        assert_eq!(plan.resolution, Resolution::new(800, 600));
        assert_eq!(plan.scene.height, 576);
    }

    #[test]
    fn windowed_follows_window_aspect() {
        let plan = DisplayPlan::resolve(&settings(false, true), Some(DESKTOP), 1024);
        assert!(!plan.fullscreen);
        assert_eq!(plan.scene, SceneSize::new(1024, 768));
    }

    #[test]
    fn unknown_desktop_falls_back_to_configured() {
        let plan = DisplayPlan::resolve(&settings(true, false), None, 1024);
        assert_eq!(plan.resolution, Resolution::new(800, 600));
        assert_eq!(plan.scene.height, 768);
    }
}
