//! Timer-based debouncing driven by an explicit clock.
//!
//! Nothing here spawns threads or sleeps: the owner schedules calls and polls for the one that is
//! due, which keeps the whole label single-threaded and lets tests drive time with [`ManualClock`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

struct Pending<A> {
    deadline: Instant,
    args: A,
}

type Slot<A> = Rc<RefCell<Option<Pending<A>>>>;

/// Last-call-wins scheduler: every `schedule` replaces the pending arguments and restarts the
/// delay.
pub struct Debouncer<A, C: Clock> {
    delay: Duration,
    clock: C,
    slot: Slot<A>,
}

impl<A, C: Clock> Debouncer<A, C> {
    pub fn new(delay: Duration, clock: C) -> Self {
        Self {
            delay,
            clock,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn schedule(&self, args: A) {
        let deadline = self.clock.now() + self.delay;
        *self.slot.borrow_mut() = Some(Pending { deadline, args });
    }

    /// Take the pending arguments if their deadline has passed.
    pub fn take_due(&self) -> Option<A> {
        let now = self.clock.now();
        let mut slot = self.slot.borrow_mut();
        match slot.as_ref() {
            Some(pending) if pending.deadline <= now => slot.take().map(|pending| pending.args),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn cancel(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn cancel_handle(&self) -> CancelHandle<A> {
        CancelHandle {
            slot: Rc::downgrade(&self.slot),
        }
    }
}

/// Discards a pending call. Outlives its debouncer safely: cancelling after teardown does nothing.
pub struct CancelHandle<A> {
    slot: Weak<RefCell<Option<Pending<A>>>>,
}

impl<A> CancelHandle<A> {
    pub fn cancel(&self) {
        if let Some(slot) = self.slot.upgrade() {
            slot.borrow_mut().take();
        }
    }
}

impl<A> Clone for CancelHandle<A> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

/// A function wrapped in a [`Debouncer`].
pub struct Debounced<A, C: Clock> {
    inner: Debouncer<A, C>,
    callback: Box<dyn FnMut(A)>,
}

impl<A, C: Clock> Debounced<A, C> {
    pub fn call(&self, args: A) {
        self.inner.schedule(args);
    }

    /// Run the callback with the last arguments if the delay has elapsed.
    pub fn poll(&mut self) -> bool {
        match self.inner.take_due() {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }
}

pub fn debounce<A, C, F>(callback: F, delay: Duration, clock: C) -> (Debounced<A, C>, CancelHandle<A>)
where
    C: Clock,
    F: FnMut(A) + 'static,
{
    let inner = Debouncer::new(delay, clock);
    let cancel = inner.cancel_handle();
    (
        Debounced {
            inner,
            callback: Box::new(callback),
        },
        cancel,
    )
}
