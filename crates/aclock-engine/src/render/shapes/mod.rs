//! Shape renderers.

mod common;

pub mod polygon;
