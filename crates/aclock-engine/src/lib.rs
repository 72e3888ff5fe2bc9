//! aclock engine crate.
//!
//! Owns the platform + GPU runtime pieces the clock is drawn with: a single
//! paced winit window, a wgpu surface, input translation, and an instanced
//! renderer for transformed unit shapes.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
