//! Runtime orchestration of a single label.

pub mod controller;

pub use controller::{ControllerState, TruncateController};
