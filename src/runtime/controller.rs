//! Reactive controller: measure on mount, re-split on prop changes, re-measure on debounced
//! resize, stop everything on unmount.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::TruncateProps;
use crate::core::anchor::Anchor;
use crate::core::clipboard::{
    intercept_copy, ClipboardSink, CopyDecision, SelectionSource, SmartCopy,
};
use crate::core::debounce::{CancelHandle, Clock, Debouncer};
use crate::core::measure::{Measurement, Measurer};
use crate::core::split::{split, SplitInput, TruncationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Not mounted.
    Idle,
    Measuring,
    /// Showing the full text.
    Fitted,
    /// Showing a truncated text.
    Truncated,
}

pub struct TruncateController<M: Measurer, C: Clock> {
    props: TruncateProps,
    measurer: M,
    resize: Debouncer<(), C>,
    state: ControllerState,
    measurement: Option<Measurement>,
    result: TruncationResult,
    measure_count: usize,
    single_line: bool,
}

impl<M: Measurer, C: Clock> TruncateController<M, C> {
    pub fn new(props: TruncateProps, measurer: M, clock: C) -> Self {
        let resize = Debouncer::new(props.resize_debounce, clock);
        let result = TruncationResult::untruncated(&props.text);
        Self {
            props,
            measurer,
            resize,
            state: ControllerState::Idle,
            measurement: None,
            result,
            measure_count: 0,
            single_line: false,
        }
    }

    /// Lay out only the first line of the text. Smart copy still writes the full text.
    pub fn set_single_line(&mut self, single_line: bool) {
        self.single_line = single_line;
        self.after_measured_prop_change();
    }

    /// The part of the text that is measured and split.
    pub fn layout_text(&self) -> &str {
        layout_text(&self.props.text, self.single_line)
    }

    pub fn mount(&mut self) {
        self.resize.cancel();
        self.remeasure();
    }

    /// Tear down. A resize scheduled before this point never runs.
    pub fn unmount(&mut self) {
        self.resize.cancel();
        self.measurement = None;
        self.state = ControllerState::Idle;
    }

    pub fn is_mounted(&self) -> bool {
        self.state != ControllerState::Idle
    }

    /// Schedule a debounced re-measure.
    pub fn on_resize(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.resize.schedule(());
    }

    /// Run the scheduled re-measure if its delay has elapsed. Returns whether it ran.
    pub fn poll(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if self.resize.take_due().is_none() {
            return false;
        }
        debug!("debounced resize fired");
        self.remeasure();
        true
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn cancel_handle(&self) -> CancelHandle<()> {
        self.resize.cancel_handle()
    }

    /// Re-measure immediately, bypassing the debounce.
    pub fn refresh(&mut self) {
        if self.is_mounted() {
            self.remeasure();
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.props.text = text.into();
        self.after_measured_prop_change();
    }

    pub fn set_ellipsis(&mut self, ellipsis: impl Into<String>) {
        self.props.ellipsis = ellipsis.into();
        self.after_measured_prop_change();
    }

    pub fn set_start(&mut self, anchor: Option<Anchor>) {
        self.props.start = anchor;
        if self.is_mounted() {
            self.resplit();
        }
    }

    pub fn set_end(&mut self, anchor: Option<Anchor>) {
        self.props.end = anchor;
        if self.is_mounted() {
            self.resplit();
        }
    }

    pub fn set_smart_copy(&mut self, policy: SmartCopy) {
        self.props.smart_copy = policy;
    }

    /// Applies to resizes scheduled from now on.
    pub fn set_resize_debounce(&mut self, delay: Duration) {
        self.props.resize_debounce = delay;
        self.resize.set_delay(delay);
    }

    pub fn handle_copy(
        &self,
        selection: &mut dyn SelectionSource,
        sink: &mut dyn ClipboardSink,
    ) -> CopyDecision {
        intercept_copy(
            self.props.smart_copy,
            &self.result.truncated_text,
            &self.props.text,
            selection,
            sink,
        )
    }

    pub fn truncated_text(&self) -> &str {
        &self.result.truncated_text
    }

    pub fn is_truncated(&self) -> bool {
        self.result.is_truncated
    }

    pub fn result(&self) -> &TruncationResult {
        &self.result
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of measurement passes run so far.
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    pub fn props(&self) -> &TruncateProps {
        &self.props
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Layout changes made through this reference take effect on the next measurement pass.
    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    fn after_measured_prop_change(&mut self) {
        if self.is_mounted() {
            self.remeasure();
        } else {
            self.result = TruncationResult::untruncated(self.layout_text());
        }
    }

    fn remeasure(&mut self) {
        self.state = ControllerState::Measuring;
        self.measure_count += 1;
        let text = layout_text(&self.props.text, self.single_line);
        match self.measurer.measure(text, &self.props.ellipsis) {
            Ok(measurement) => {
                self.measurement = Some(measurement);
                self.resplit();
            }
            Err(err) => {
                warn!(%err, "showing full text");
                self.measurement = None;
                self.result = TruncationResult::untruncated(self.layout_text());
                self.state = ControllerState::Fitted;
            }
        }
    }

    fn resplit(&mut self) {
        let Some(measurement) = self.measurement else {
            self.result = TruncationResult::untruncated(self.layout_text());
            self.state = ControllerState::Fitted;
            return;
        };

        let input = SplitInput {
            text: layout_text(&self.props.text, self.single_line),
            ellipsis: &self.props.ellipsis,
            text_width: measurement.text.width,
            ellipsis_width: measurement.ellipsis.width,
            available_width: measurement.container.width,
            start: self.props.start.as_ref(),
            end: self.props.end.as_ref(),
        };
        let measurer = &self.measurer;
        let result = split(&input, &|fragment: &str| measurer.width_of(fragment));

        self.state = if result.is_truncated {
            ControllerState::Truncated
        } else {
            ControllerState::Fitted
        };
        self.result = result;
    }
}

fn layout_text(text: &str, single_line: bool) -> &str {
    if single_line {
        text.lines().next().unwrap_or("")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{ControllerState, TruncateController};
    use crate::config::TruncateProps;
    use crate::core::anchor::Anchor;
    use crate::core::clipboard::testing::{MockClipboard, MockSelection};
    use crate::core::clipboard::{CopyDecision, SmartCopy};
    use crate::core::debounce::ManualClock;
    use crate::core::measure::{Dimensions, FixedMeasurer, Measurement};

    fn measurement(container: f64) -> Measurement {
        Measurement {
            container: Dimensions::new(container, 20.0),
            ellipsis: Dimensions::new(10.0, 20.0),
            text: Dimensions::new(100.0, 20.0),
        }
    }

    fn controller(
        props: TruncateProps,
        container: f64,
    ) -> (TruncateController<FixedMeasurer, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let measurer = FixedMeasurer::with_measurement(measurement(container));
        (TruncateController::new(props, measurer, clock.clone()), clock)
    }

    #[test]
    fn idle_until_mounted() {
        let (controller, _) = controller(TruncateProps::new("0123456789"), 80.0);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.truncated_text(), "0123456789");
        assert_eq!(controller.measure_count(), 0);
    }

    #[test]
    fn mount_measures_synchronously() {
        let (mut controller, _) = controller(TruncateProps::new("0123456789"), 80.0);
        controller.mount();
        assert_eq!(controller.state(), ControllerState::Truncated);
        assert_eq!(controller.truncated_text(), "012...789");
        assert_eq!(controller.measure_count(), 1);
    }

    #[test]
    fn unavailable_measurement_fails_open() {
        let clock = ManualClock::new();
        let mut controller =
            TruncateController::new(TruncateProps::new("0123456789"), FixedMeasurer::new(), clock);
        controller.mount();
        assert_eq!(controller.state(), ControllerState::Fitted);
        assert_eq!(controller.truncated_text(), "0123456789");
        assert!(!controller.is_truncated());
    }

    #[test]
    fn anchor_change_resplits_without_measuring() {
        let (mut controller, _) = controller(TruncateProps::new("0123456789"), 80.0);
        controller.mount();
        controller.set_start(Some(Anchor::Count(4)));
        assert_eq!(controller.truncated_text(), "0123...789");
        controller.set_end(Some(Anchor::Count(4)));
        assert_eq!(controller.truncated_text(), "0123...6789");
        assert_eq!(controller.measure_count(), 1);
    }

    #[test]
    fn text_change_remeasures_immediately() {
        let (mut controller, _) = controller(TruncateProps::new("0123456789"), 80.0);
        controller.mount();
        controller.set_text("abcdefghij");
        assert_eq!(controller.measure_count(), 2);
        assert_eq!(controller.truncated_text(), "abc...hij");

        controller.set_ellipsis("~");
        assert_eq!(controller.measure_count(), 3);
        assert_eq!(controller.truncated_text(), "abc~hij");
    }

    #[test]
    fn resize_burst_measures_once() {
        let props = TruncateProps::new("0123456789")
            .resize_debounce(std::time::Duration::from_millis(100));
        let (mut controller, clock) = controller(props, 80.0);
        controller.mount();

        for _ in 0..5 {
            controller.on_resize();
            clock.advance_ms(30);
            assert!(!controller.poll());
        }
        controller
            .measurer_mut()
            .set_measurement(measurement(100.0));
        clock.advance_ms(100);
        assert!(controller.poll());
        assert_eq!(controller.measure_count(), 2);
        assert_eq!(controller.state(), ControllerState::Fitted);
        assert_eq!(controller.truncated_text(), "0123456789");
    }

    #[test]
    fn unmount_discards_pending_resize() {
        let (mut controller, clock) = controller(TruncateProps::new("0123456789"), 80.0);
        controller.mount();
        controller.on_resize();
        controller.unmount();
        clock.advance_ms(1_000);
        assert!(!controller.poll());
        assert_eq!(controller.measure_count(), 1);

        controller.cancel_handle().cancel();
        controller.mount();
        clock.advance_ms(1_000);
        assert!(!controller.poll());
        assert_eq!(controller.measure_count(), 2);
    }

    #[test]
    fn copy_uses_displayed_text() {
        let props = TruncateProps::new("0123456789").smart_copy(SmartCopy::All);
        let (mut controller, _) = controller(props, 80.0);
        controller.mount();

        let mut selection = MockSelection::new("012...789");
        let mut clipboard = MockClipboard::default();
        assert_eq!(
            controller.handle_copy(&mut selection, &mut clipboard),
            CopyDecision::Override
        );
        assert_eq!(clipboard.data[0].1, "0123456789");

        controller.set_smart_copy(SmartCopy::Off);
        let mut clipboard = MockClipboard::default();
        assert_eq!(
            controller.handle_copy(&mut selection, &mut clipboard),
            CopyDecision::Default
        );
    }

    #[test]
    fn single_line_layout_copies_full_text() {
        let props = TruncateProps::new("0123456789\r\nsecond").smart_copy(SmartCopy::Partial);
        let (mut controller, _) = controller(props, 80.0);
        controller.set_single_line(true);
        controller.mount();
        assert_eq!(controller.layout_text(), "0123456789");
        assert_eq!(controller.truncated_text(), "012...789");

        let mut selection = MockSelection::new("012");
        let mut clipboard = MockClipboard::default();
        assert_eq!(
            controller.handle_copy(&mut selection, &mut clipboard),
            CopyDecision::Override
        );
        assert_eq!(clipboard.data[0].1, "0123456789\r\nsecond");
    }
}
