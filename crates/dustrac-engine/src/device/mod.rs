//! GPU device + surface management.
//!
//! This module is responsible for:
//! - probing the platform's graphics capability before anything is created
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod capability;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use capability::{probe_graphics, GraphicsProbe, GraphicsVersion};
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
