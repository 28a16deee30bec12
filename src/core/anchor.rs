//! Leading/trailing anchors preserved through truncation.

use std::fmt;

use regex::Regex;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::error::AnchorError;

/// A run of graphemes that truncation must keep at the start or end of the text.
#[derive(Clone)]
pub enum Anchor {
    /// Keep exactly this many graphemes.
    Count(usize),
    /// Keep whatever the pattern matches at the start (or end) of the text.
    Pattern(Regex),
}

impl Anchor {
    pub fn pattern(pattern: &str) -> Result<Self, AnchorError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| AnchorError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }
}

impl From<usize> for Anchor {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Regex> for Anchor {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => f.debug_tuple("Count").field(count).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
        }
    }
}

impl PartialEq for Anchor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Count(a), Self::Count(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Number of leading graphemes `anchor` preserves in `text`. Invalid anchors preserve nothing.
pub fn resolve_prefix(text: &str, anchor: &Anchor) -> usize {
    match anchor {
        Anchor::Count(count) => checked_count(text, *count, "start"),
        Anchor::Pattern(regex) => match regex.find(text) {
            Some(found) if found.start() == 0 => text
                .grapheme_indices(true)
                .take_while(|(idx, grapheme)| idx + grapheme.len() <= found.end())
                .count(),
            _ => {
                debug!(pattern = regex.as_str(), "start pattern did not match; ignoring anchor");
                0
            }
        },
    }
}

/// Number of trailing graphemes `anchor` preserves in `text`. Invalid anchors preserve nothing.
pub fn resolve_suffix(text: &str, anchor: &Anchor) -> usize {
    match anchor {
        Anchor::Count(count) => checked_count(text, *count, "end"),
        Anchor::Pattern(regex) => {
            let boundaries: Vec<usize> = text.grapheme_indices(true).map(|(idx, _)| idx).collect();
            let total = boundaries.len();
            for (position, start) in boundaries.iter().copied().enumerate() {
                if let Some(found) = regex.find_at(text, start) {
                    if found.start() == start && found.end() == text.len() {
                        return total - position;
                    }
                }
            }
            debug!(pattern = regex.as_str(), "end pattern did not match; ignoring anchor");
            0
        }
    }
}

fn checked_count(text: &str, count: usize, side: &'static str) -> usize {
    let total = text.graphemes(true).count();
    if count > total {
        debug!(side, count, total, "anchor longer than text; ignoring anchor");
        return 0;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::{resolve_prefix, resolve_suffix, Anchor};

    #[test]
    fn count_anchor_is_taken_verbatim() {
        assert_eq!(resolve_prefix("0123456789", &Anchor::from(4_usize)), 4);
        assert_eq!(resolve_suffix("0123456789", &Anchor::from(10_usize)), 10);
    }

    #[test]
    fn out_of_range_count_is_ignored() {
        assert_eq!(resolve_prefix("abc", &Anchor::Count(4)), 0);
        assert_eq!(resolve_suffix("abc", &Anchor::Count(99)), 0);
    }

    #[test]
    fn prefix_pattern_must_match_at_start() {
        let digits = Anchor::pattern(r"\d{4}").expect("pattern");
        assert_eq!(resolve_prefix("0123456789", &digits), 4);
        assert_eq!(resolve_prefix("ab0123", &digits), 0);
    }

    #[test]
    fn suffix_pattern_must_reach_end() {
        let digits = Anchor::pattern(r"\d{4}$").expect("pattern");
        assert_eq!(resolve_suffix("0123456789", &digits), 4);

        let unanchored = Anchor::pattern(r"\d{2}").expect("pattern");
        assert_eq!(resolve_suffix("12ab", &unanchored), 0);
        assert_eq!(resolve_suffix("ab12", &unanchored), 2);
    }

    #[test]
    fn suffix_pattern_takes_longest_match() {
        let extension = Anchor::pattern(r"\.[a-z.]+$").expect("pattern");
        assert_eq!(resolve_suffix("archive.tar.gz", &extension), 7);
    }

    #[test]
    fn pattern_anchor_counts_graphemes() {
        let word = Anchor::pattern(r"^\S+").expect("pattern");
        assert_eq!(resolve_prefix("cafe\u{301} au lait", &word), 4);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(Anchor::pattern("(").is_err());
    }
}
