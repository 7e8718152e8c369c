use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::KeyboardState;
use crate::paint::Color;
use crate::time::FrameTime;
use crate::window::RuntimeConfig;

use super::app::AppControl;

/// Startup context passed to `core::App::on_start`.
pub struct StartCtx<'a> {
    /// Size of the primary monitor, when the platform reports one.
    pub monitor_size: Option<PhysicalSize<u32>>,

    /// Window configuration the runtime is about to apply.
    pub config: &'a mut RuntimeConfig,
}

/// Per-window handles.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub keyboard: &'a KeyboardState,
    pub time: FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface to `clear` and presents the frame.
    ///
    /// Surface loss is recovered by reconfiguring; only fatal surface errors
    /// stop the loop.
    pub fn present(&mut self, clear: Color) -> AppControl {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // Pass is dropped before the encoder moves into submit().
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("dustrac clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
