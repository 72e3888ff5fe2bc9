//! Coordinate and geometry types shared by the runtime and renderers.
//!
//! Canonical drawing space:
//! - normalized units, [-1, 1] on the shorter window axis
//! - origin at the window center
//! - +X right, +Y up
//!
//! Renderers map this space to clip space with a projection matrix derived
//! from the current [`Viewport`].

mod mat4;
mod vec2;
mod viewport;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use viewport::Viewport;
