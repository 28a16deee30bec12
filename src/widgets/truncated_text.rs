//! Single-line label that truncates in the middle.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::TruncateProps;
use crate::core::anchor::Anchor;
use crate::core::clipboard::{ClipboardSink, CopyDecision, SelectionSource, SmartCopy};
use crate::core::component::Component;
use crate::core::debounce::{Clock, SystemClock};
use crate::core::measure::TerminalMeasurer;
use crate::core::text::width::{grapheme_width, visible_width};
use crate::runtime::controller::TruncateController;

/// Terminal label wrapping a [`TruncateController`].
///
/// The first render mounts the controller with the render width as container. Later width
/// changes (from `render` or `set_viewport_size`) go through the resize debounce. Only the first
/// line of multi-line text is shown.
pub struct TruncateMiddle<C: Clock = SystemClock> {
    controller: TruncateController<TerminalMeasurer, C>,
    padding_x: usize,
    padding_y: usize,
}

impl TruncateMiddle<SystemClock> {
    pub fn new(props: TruncateProps) -> Self {
        Self::with_clock(props, SystemClock)
    }
}

impl<C: Clock> TruncateMiddle<C> {
    pub fn with_clock(props: TruncateProps, clock: C) -> Self {
        let mut controller = TruncateController::new(props, TerminalMeasurer::new(), clock);
        controller.set_single_line(true);
        Self {
            controller,
            padding_x: 0,
            padding_y: 0,
        }
    }

    pub fn with_padding(mut self, padding_x: usize, padding_y: usize) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    pub fn set_text(&mut self, text: &str) {
        self.controller.set_text(text);
    }

    pub fn set_ellipsis(&mut self, ellipsis: impl Into<String>) {
        self.controller.set_ellipsis(ellipsis);
    }

    pub fn set_start(&mut self, anchor: Option<Anchor>) {
        self.controller.set_start(anchor);
    }

    pub fn set_end(&mut self, anchor: Option<Anchor>) {
        self.controller.set_end(anchor);
    }

    pub fn set_smart_copy(&mut self, policy: SmartCopy) {
        self.controller.set_smart_copy(policy);
    }

    /// Tear the label down. It mounts again on the next render.
    pub fn unmount(&mut self) {
        self.controller.unmount();
    }

    pub fn handle_copy(
        &self,
        selection: &mut dyn SelectionSource,
        sink: &mut dyn ClipboardSink,
    ) -> CopyDecision {
        self.controller.handle_copy(selection, sink)
    }

    pub fn truncated_text(&self) -> &str {
        self.controller.truncated_text()
    }

    pub fn controller(&self) -> &TruncateController<TerminalMeasurer, C> {
        &self.controller
    }

    fn available_width(&self, width: usize) -> usize {
        width.saturating_sub(self.padding_x * 2).max(1)
    }

    fn resize_container(&mut self, available: usize) {
        let measurer = self.controller.measurer_mut();
        if measurer.container() == Some(available) {
            return;
        }
        measurer.set_container(available);

        if self.controller.is_mounted() {
            self.controller.on_resize();
        }
    }
}

impl<C: Clock> Component for TruncateMiddle<C> {
    fn render(&mut self, width: usize) -> Vec<String> {
        let available = self.available_width(width);
        if self.controller.is_mounted() {
            self.resize_container(available);
            self.controller.poll();
        } else {
            self.controller.measurer_mut().set_container(available);
            self.controller.mount();
        }

        let mut result = Vec::new();
        let empty_line = " ".repeat(width);

        for _ in 0..self.padding_y {
            result.push(empty_line.clone());
        }

        // Until a pending resize fires the label may still be laid out for the old width.
        let display_text = clip_to_width(self.controller.truncated_text(), available);

        let left_padding = " ".repeat(self.padding_x);
        let right_padding = " ".repeat(self.padding_x);
        let line_with_padding = format!("{left_padding}{display_text}{right_padding}");

        let line_visible_width = visible_width(&line_with_padding);
        let padding_needed = width.saturating_sub(line_visible_width);
        let final_line = format!("{line_with_padding}{}", " ".repeat(padding_needed));

        result.push(final_line);

        for _ in 0..self.padding_y {
            result.push(empty_line.clone());
        }

        result
    }

    fn set_viewport_size(&mut self, cols: usize, _rows: usize) {
        let available = self.available_width(cols);
        self.resize_container(available);
    }

    fn invalidate(&mut self) {
        self.controller.refresh();
    }
}

fn clip_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        used += grapheme_width(grapheme);
        if used > max_width {
            return &text[..idx];
        }
    }
    text
}
