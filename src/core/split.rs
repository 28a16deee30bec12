//! Middle truncation: decide where the ellipsis goes and what survives around it.
//!
//! The splitter is a pure function of its inputs. Widths come from the measurer that produced the
//! [`crate::Measurement`], so the result is judged in the same units the label is rendered in.

use tracing::debug;

use crate::core::anchor::{resolve_prefix, resolve_suffix, Anchor};
use crate::core::text::width::graphemes;

const WIDTH_EPSILON: f64 = 1e-9;

/// Everything the splitter needs for one pass.
#[derive(Debug, Clone, Copy)]
pub struct SplitInput<'a> {
    pub text: &'a str,
    pub ellipsis: &'a str,
    /// Measured width of the whole text.
    pub text_width: f64,
    pub ellipsis_width: f64,
    pub available_width: f64,
    pub start: Option<&'a Anchor>,
    pub end: Option<&'a Anchor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationResult {
    pub truncated_text: String,
    pub is_truncated: bool,
}

impl TruncationResult {
    pub fn untruncated(text: &str) -> Self {
        Self {
            truncated_text: text.to_string(),
            is_truncated: false,
        }
    }
}

/// Truncate `input.text` in the middle so that it fits `input.available_width`.
///
/// Graphemes are dropped in pairs from either side of the midpoint (the start side keeps the
/// extra grapheme on odd lengths) until the kept text plus the ellipsis fits. Anchored prefix and
/// suffix graphemes are never dropped, even if that leaves the result wider than the container.
/// Overlapping anchors are both emitted in full around the ellipsis.
pub fn split(input: &SplitInput<'_>, width_of: &dyn Fn(&str) -> f64) -> TruncationResult {
    if input.text_width <= input.available_width + WIDTH_EPSILON {
        return TruncationResult::untruncated(input.text);
    }

    if input.available_width < input.ellipsis_width {
        return TruncationResult {
            truncated_text: input.ellipsis.to_string(),
            is_truncated: true,
        };
    }

    let parts = graphemes(input.text);
    let len = parts.len();
    let prefix_len = input
        .start
        .map(|anchor| resolve_prefix(input.text, anchor))
        .unwrap_or(0);
    let suffix_len = input
        .end
        .map(|anchor| resolve_suffix(input.text, anchor))
        .unwrap_or(0);

    if prefix_len + suffix_len > len {
        debug!(prefix_len, suffix_len, len, "anchors overlap; keeping both verbatim");
        let mut truncated_text = parts[..prefix_len].concat();
        truncated_text.push_str(input.ellipsis);
        truncated_text.extend(parts[len - suffix_len..].iter().copied());
        return TruncationResult {
            truncated_text,
            is_truncated: true,
        };
    }

    let free_end = len - suffix_len;

    let widths: Vec<f64> = parts.iter().map(|part| width_of(part)).collect();
    let budget = input.available_width - input.ellipsis_width;
    let mut kept: f64 = widths.iter().sum();

    let middle = len.div_ceil(2).clamp(prefix_len, free_end);
    let mut left_end = middle;
    let mut right_start = middle;

    loop {
        let left_open = left_end > prefix_len;
        let right_open = right_start < free_end;
        if !left_open && !right_open {
            break;
        }
        if left_open {
            left_end -= 1;
            kept -= widths[left_end];
        }
        if right_open {
            kept -= widths[right_start];
            right_start += 1;
        }
        if kept <= budget + WIDTH_EPSILON {
            break;
        }
    }

    let mut truncated_text = String::with_capacity(input.text.len() + input.ellipsis.len());
    truncated_text.extend(parts[..left_end].iter().copied());
    truncated_text.push_str(input.ellipsis);
    truncated_text.extend(parts[right_start..].iter().copied());

    debug!(
        prefix_len,
        suffix_len,
        kept_start = left_end,
        kept_end = len - right_start,
        overflow = kept > budget + WIDTH_EPSILON,
        "split text"
    );

    TruncationResult {
        truncated_text,
        is_truncated: true,
    }
}
