//! Middle-ellipsis text label.
//!
//! Invariant: the displayed text is a pure function of the current props and the latest
//! measurement; resize-driven re-measurement is debounced and never runs after unmount.
//!
//! # Public API Overview
//! - [`split`] truncates a text in the middle given measured widths, honoring [`Anchor`]s.
//! - [`Measurer`] implementations produce [`Measurement`]s ([`TerminalMeasurer`],
//!   [`FixedMeasurer`]).
//! - [`TruncateController`] drives mount, prop changes, debounced resize and smart copy.
//! - [`TruncateMiddle`] renders the controller as a terminal [`Component`].

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod runtime;
pub mod widgets;

/// Label options and environment configuration.
pub use crate::config::{EnvConfig, TruncateProps, DEFAULT_ELLIPSIS, DEFAULT_RESIZE_DEBOUNCE_MS};

/// Anchors, splitting and measurement.
pub use crate::core::anchor::{resolve_prefix, resolve_suffix, Anchor};
pub use crate::core::error::{AnchorError, MeasureError};
pub use crate::core::measure::{Dimensions, FixedMeasurer, Measurement, Measurer, TerminalMeasurer};
pub use crate::core::split::{split, SplitInput, TruncationResult};

/// Debouncing primitives.
pub use crate::core::debounce::{
    debounce, CancelHandle, Clock, Debounced, Debouncer, ManualClock, SystemClock,
};

/// Smart copy.
pub use crate::core::clipboard::{
    intercept_copy, ClipboardSink, CopyDecision, ParseSmartCopyError, SelectionSource, SmartCopy,
    PLAIN_TEXT_MIME,
};

/// Runtime component trait and widgets.
pub use crate::core::component::Component;
pub use crate::runtime::{ControllerState, TruncateController};
pub use crate::widgets::TruncateMiddle;

/// Terminal resize source and size probe.
#[cfg(unix)]
pub use crate::platform::{terminal_size, ResizeSignal};

/// Width helpers.
pub use crate::core::text::width::{grapheme_count, visible_width};
