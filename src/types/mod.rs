//! Core data types flowing through the bridge.

mod frame;
mod orientation;

pub use frame::RawFrame;
pub use orientation::{NormalizedOrientation, normalize};
