//! Analog clock face: hand math, the per-frame renderer, and CLI options.

pub mod cli;
pub mod hands;
pub mod policy;
pub mod renderer;
pub mod time;

pub use hands::{compute_hand_transforms, HandTransforms};
pub use renderer::{ClockConfig, ClockRenderer, ClockState};
pub use time::{ClockTime, FixedClock, LocalClock, WallClock};
