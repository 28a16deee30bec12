//! Text helpers (grapheme segmentation, width calculations).
//!
//! These helpers are pure (string in/number out) and live under `core` so the splitter and the
//! terminal measurer agree on what a "character" is.

pub mod width;
