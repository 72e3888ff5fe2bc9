//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - `FrameClock` measures the time between presented frames
//! - `FramePacer` decides when the next frame is due

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
