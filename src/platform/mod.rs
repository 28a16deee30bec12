//! Platform-specific terminal integrations.

#[cfg(unix)]
pub mod resize;

#[cfg(unix)]
pub use resize::{terminal_size, ResizeSignal};
