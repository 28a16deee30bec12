//! Smart copy: put the untruncated text on the clipboard when the user copies the label.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// Clipboard interception policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmartCopy {
    /// Never intercept.
    #[default]
    Off,
    /// Intercept any non-empty selection of the label.
    Partial,
    /// Intercept only when the whole label is selected.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown smart copy policy '{0}' (expected false, partial or all)")]
pub struct ParseSmartCopyError(String);

impl FromStr for SmartCopy {
    type Err = ParseSmartCopyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "false" | "off" | "none" => Ok(Self::Off),
            "partial" => Ok(Self::Partial),
            "all" => Ok(Self::All),
            _ => Err(ParseSmartCopyError(value.to_string())),
        }
    }
}

/// Current user selection, as the host's selection API reports it.
pub trait SelectionSource {
    fn selected_text(&mut self) -> Option<String>;
}

/// Payload of the copy event being handled.
pub trait ClipboardSink {
    fn set_data(&mut self, mime: &str, data: &str);

    /// Stop the host from writing its own selection text afterwards.
    fn prevent_default(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDecision {
    /// The host copies the selection as usual.
    Default,
    /// The clipboard now holds the full text.
    Override,
}

/// Decide whether a copy event gets the full text instead of the visible selection.
///
/// `displayed` is the label as rendered (possibly truncated), `full` the source text.
pub fn intercept_copy(
    policy: SmartCopy,
    displayed: &str,
    full: &str,
    selection: &mut dyn SelectionSource,
    sink: &mut dyn ClipboardSink,
) -> CopyDecision {
    if policy == SmartCopy::Off {
        return CopyDecision::Default;
    }

    let selected = match selection.selected_text() {
        Some(selected) if !selected.is_empty() => selected,
        _ => return CopyDecision::Default,
    };

    let whole = selected == displayed;
    let intercept = match policy {
        SmartCopy::Off => false,
        SmartCopy::Partial => true,
        SmartCopy::All => whole,
    };
    debug!(?policy, whole, intercept, "copy event");

    if !intercept {
        return CopyDecision::Default;
    }

    sink.set_data(PLAIN_TEXT_MIME, full);
    sink.prevent_default();
    CopyDecision::Override
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{ClipboardSink, SelectionSource};

    #[derive(Debug, Default)]
    pub struct MockSelection {
        pub text: Option<String>,
        pub queries: usize,
    }

    impl MockSelection {
        pub fn new(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                queries: 0,
            }
        }
    }

    impl SelectionSource for MockSelection {
        fn selected_text(&mut self) -> Option<String> {
            self.queries += 1;
            self.text.clone()
        }
    }

    #[derive(Debug, Default)]
    pub struct MockClipboard {
        pub data: Vec<(String, String)>,
        pub prevented: bool,
    }

    impl ClipboardSink for MockClipboard {
        fn set_data(&mut self, mime: &str, data: &str) {
            self.data.push((mime.to_string(), data.to_string()));
        }

        fn prevent_default(&mut self) {
            self.prevented = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MockClipboard, MockSelection};
    use super::{intercept_copy, CopyDecision, SmartCopy, PLAIN_TEXT_MIME};

    const FULL: &str = "0123456789";
    const SHOWN: &str = "012...789";

    fn copy(policy: SmartCopy, selected: &str) -> (CopyDecision, MockSelection, MockClipboard) {
        let mut selection = MockSelection::new(selected);
        let mut clipboard = MockClipboard::default();
        let decision = intercept_copy(policy, SHOWN, FULL, &mut selection, &mut clipboard);
        (decision, selection, clipboard)
    }

    #[test]
    fn off_never_reads_selection() {
        for selected in ["234", SHOWN] {
            let (decision, selection, clipboard) = copy(SmartCopy::Off, selected);
            assert_eq!(decision, CopyDecision::Default);
            assert_eq!(selection.queries, 0);
            assert!(clipboard.data.is_empty());
        }
    }

    #[test]
    fn partial_overrides_fractal_and_whole() {
        for selected in ["234", SHOWN] {
            let (decision, selection, clipboard) = copy(SmartCopy::Partial, selected);
            assert_eq!(decision, CopyDecision::Override);
            assert_eq!(selection.queries, 1);
            assert_eq!(
                clipboard.data,
                vec![(PLAIN_TEXT_MIME.to_string(), FULL.to_string())]
            );
            assert!(clipboard.prevented);
        }
    }

    #[test]
    fn all_overrides_only_whole_selection() {
        let (decision, selection, clipboard) = copy(SmartCopy::All, "234");
        assert_eq!(decision, CopyDecision::Default);
        assert_eq!(selection.queries, 1);
        assert!(clipboard.data.is_empty());
        assert!(!clipboard.prevented);

        let (decision, _, clipboard) = copy(SmartCopy::All, SHOWN);
        assert_eq!(decision, CopyDecision::Override);
        assert_eq!(clipboard.data[0].1, FULL);
    }

    #[test]
    fn empty_selection_is_left_alone() {
        let (decision, _, clipboard) = copy(SmartCopy::Partial, "");
        assert_eq!(decision, CopyDecision::Default);
        assert!(clipboard.data.is_empty());
    }

    #[test]
    fn policy_parses_from_prop_strings() {
        assert_eq!("false".parse(), Ok(SmartCopy::Off));
        assert_eq!("Partial".parse(), Ok(SmartCopy::Partial));
        assert_eq!("all".parse(), Ok(SmartCopy::All));
        assert!("sometimes".parse::<SmartCopy>().is_err());
    }
}
