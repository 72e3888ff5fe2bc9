//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and records into a
//! `RenderTarget` supplied by the frame.
//!
//! Convention:
//! - CPU geometry is in normalized drawing space (center origin, +Y up)
//! - the vertex shader applies `projection * model` to reach clip space

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
