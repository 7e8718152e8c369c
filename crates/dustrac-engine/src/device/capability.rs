use std::fmt;

use anyhow::{Context, Result};

/// Graphics API version advertised by the platform, in OpenGL terms.
///
/// Ordering is lexicographic on `(major, minor)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GraphicsVersion {
    pub major: u32,
    pub minor: u32,
}

impl GraphicsVersion {
    /// Minimum version the game renders with.
    pub const OPENGL_3_0: Self = Self::new(3, 0);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Maps the adapter's shader model onto the GL version family it implies.
    pub fn from_shader_model(model: wgpu::ShaderModel) -> Self {
        match model {
            wgpu::ShaderModel::Sm2 => Self::new(2, 0),
            wgpu::ShaderModel::Sm4 => Self::new(3, 3),
            _ => Self::new(4, 5),
        }
    }

    #[inline]
    pub fn meets(self, minimum: Self) -> bool {
        self >= minimum
    }
}

impl fmt::Display for GraphicsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Result of probing the best available adapter.
#[derive(Debug, Clone)]
pub struct GraphicsProbe {
    pub adapter_name: String,
    pub backend: wgpu::Backend,
    pub version: GraphicsVersion,
}

/// Queries the platform's best adapter without creating a window or surface.
///
/// Adapter acquisition is asynchronous under wgpu; callers on the main thread
/// drive it with `pollster::block_on`.
pub async fn probe_graphics() -> Result<GraphicsProbe> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a GPU adapter")?;

    let info = adapter.get_info();
    let caps = adapter.get_downlevel_capabilities();
    let version = GraphicsVersion::from_shader_model(caps.shader_model);

    log::debug!(
        "graphics probe: adapter={} backend={:?} version={version}",
        info.name,
        info.backend
    );

    Ok(GraphicsProbe {
        adapter_name: info.name,
        backend: info.backend,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_three_dot_minor_meets_the_minimum() {
        assert!(GraphicsVersion::new(3, 0).meets(GraphicsVersion::OPENGL_3_0));
        assert!(GraphicsVersion::new(3, 3).meets(GraphicsVersion::OPENGL_3_0));
        assert!(GraphicsVersion::new(4, 6).meets(GraphicsVersion::OPENGL_3_0));
    }

    #[test]
    fn two_dot_x_is_rejected() {
        assert!(!GraphicsVersion::new(2, 1).meets(GraphicsVersion::OPENGL_3_0));
    }

    #[test]
    fn shader_models_map_to_gl_families() {
        assert_eq!(
            GraphicsVersion::from_shader_model(wgpu::ShaderModel::Sm2),
            GraphicsVersion::new(2, 0)
        );
        assert!(GraphicsVersion::from_shader_model(wgpu::ShaderModel::Sm4)
            .meets(GraphicsVersion::OPENGL_3_0));
        assert!(GraphicsVersion::from_shader_model(wgpu::ShaderModel::Sm5)
            .meets(GraphicsVersion::OPENGL_3_0));
    }

    #[test]
    fn version_displays_as_major_dot_minor() {
        assert_eq!(GraphicsVersion::OPENGL_3_0.to_string(), "3.0");
    }
}
