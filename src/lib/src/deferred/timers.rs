use super::MicrotaskQueue;

use log::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier returned by `set_timeout()`/`set_interval()`, used for cancellation.
///
/// Identifiers are allocated from a counter and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Timeout,
    /// Scheduled with `set_interval()`. Still fires only once.
    Interval,
}

/// State of a registered timer. Cancelled timers are not registered any more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Pending,
    Fired,
}

struct TimerEntry {
    kind: TimerKind,
    state: TimerState,
    callback: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct TimerRegistry {
    last_id: u64,
    entries: HashMap<TimerId, TimerEntry>,
}

/// `setTimeout()`/`setInterval()` emulation on top of a `MicrotaskQueue`.
///
/// There is no clock: **delays are ignored**. A scheduled callback runs the next time the
/// microtask queue is drained, and callbacks run in the order they were scheduled,
/// whatever their nominal delays.
///
/// Intervals fire **once**. The callback is never rescheduled.
#[derive(Clone)]
pub struct TimerQueue {
    registry: Rc<RefCell<TimerRegistry>>,
    microtasks: MicrotaskQueue,
}

impl TimerQueue {
    /// Create a timer queue deferring callbacks to `microtasks`.
    pub fn new(microtasks: MicrotaskQueue) -> Self {
        TimerQueue {
            registry: Rc::new(RefCell::new(TimerRegistry::default())),
            microtasks,
        }
    }

    /// Return the queue callbacks are deferred to.
    pub fn microtasks(&self) -> &MicrotaskQueue {
        &self.microtasks
    }

    /// Schedule `callback`. `delay_ms` is ignored.
    pub fn set_timeout(&self, callback: impl FnOnce() + 'static, delay_ms: u64) -> TimerId {
        self.schedule(TimerKind::Timeout, Box::new(callback), delay_ms)
    }

    /// Schedule `callback`, to be called with `args`. `delay_ms` is ignored.
    pub fn set_timeout_with_args<A: 'static>(
        &self,
        callback: impl FnOnce(A) + 'static,
        delay_ms: u64,
        args: A,
    ) -> TimerId {
        self.set_timeout(move || callback(args), delay_ms)
    }

    /// Schedule `callback` to be called once. `delay_ms` is ignored.
    pub fn set_interval(&self, callback: impl FnOnce() + 'static, delay_ms: u64) -> TimerId {
        self.schedule(TimerKind::Interval, Box::new(callback), delay_ms)
    }

    /// Schedule `callback` to be called once with `args`. `delay_ms` is ignored.
    pub fn set_interval_with_args<A: 'static>(
        &self,
        callback: impl FnOnce(A) + 'static,
        delay_ms: u64,
        args: A,
    ) -> TimerId {
        self.set_interval(move || callback(args), delay_ms)
    }

    pub fn clear_timeout(&self, id: TimerId) {
        self.cancel(id)
    }

    pub fn clear_interval(&self, id: TimerId) {
        self.cancel(id)
    }

    /// Unregister a timer. Unknown, fired and already cancelled timers are ignored.
    pub fn cancel(&self, id: TimerId) {
        if self.registry.borrow_mut().entries.remove(&id).is_some() {
            debug!("Timer {} cancelled", id);
        }
    }

    /// Return the state of a registered timer, or `None` if it was cancelled or has fired and
    /// been removed.
    pub fn state(&self, id: TimerId) -> Option<TimerState> {
        self.registry.borrow().entries.get(&id).map(|entry| entry.state)
    }

    /// Number of registered timers.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Return `true` if no timers are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.borrow().entries.is_empty()
    }

    fn schedule(&self, kind: TimerKind, callback: Box<dyn FnOnce()>, delay_ms: u64) -> TimerId {
        let id = {
            let mut registry = self.registry.borrow_mut();
            registry.last_id += 1;
            let id = TimerId(registry.last_id);
            registry.entries.insert(
                id,
                TimerEntry {
                    kind,
                    state: TimerState::Pending,
                    callback: Some(callback),
                },
            );
            id
        };
        debug!("Timer {} scheduled ({:?})", id, kind);
        trace!("Timer {}: delay of {} ms ignored", id, delay_ms);
        let registry = Rc::downgrade(&self.registry);
        self.microtasks.enqueue(move || fire(&registry, id));
        id
    }
}

fn fire(registry: &Weak<RefCell<TimerRegistry>>, id: TimerId) {
    let registry = match registry.upgrade() {
        None => return,
        Some(registry) => registry,
    };
    let (kind, callback) = {
        let mut registry = registry.borrow_mut();
        match registry.entries.get_mut(&id) {
            Some(entry) if entry.state == TimerState::Pending => {
                entry.state = TimerState::Fired;
                (entry.kind, entry.callback.take())
            }
            _ => return,
        }
    };
    if let Some(callback) = callback {
        callback();
    }
    if kind == TimerKind::Timeout {
        registry.borrow_mut().entries.remove(&id);
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerQueue {{ registered: {} }}", self.len())
    }
}
