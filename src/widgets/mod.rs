//! Renderable widgets.

pub mod truncated_text;

pub use truncated_text::TruncateMiddle;
