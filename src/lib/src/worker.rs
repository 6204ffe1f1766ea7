use crate::deferred::*;
use crate::error::*;

use log::*;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The envelope delivered to `onmessage`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent<M> {
    /// Always `"message"`.
    pub type_: &'static str,
    /// The posted message.
    pub data: M,
    /// Always empty.
    pub origin: String,
}

/// The envelope a worker error handler would receive.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    /// Always `"error"`.
    pub type_: &'static str,
    pub message: String,
}

pub type MessageHandler<M> = Rc<dyn Fn(&MessageEvent<M>)>;
pub type ErrorHandler = Rc<dyn Fn(&ErrorEvent)>;

/// A listener for `add_event_listener()`/`remove_event_listener()`.
pub enum Listener<M> {
    /// A `"message"` listener.
    Message(MessageHandler<M>),
    /// An `"error"` listener.
    Error(ErrorHandler),
}

impl<M> Listener<M> {
    /// The event type this listener is registered for.
    pub fn event_type(&self) -> &'static str {
        match self {
            Listener::Message(_) => "message",
            Listener::Error(_) => "error",
        }
    }
}

impl<M> Clone for Listener<M> {
    fn clone(&self) -> Self {
        match self {
            Listener::Message(handler) => Listener::Message(handler.clone()),
            Listener::Error(handler) => Listener::Error(handler.clone()),
        }
    }
}

struct WorkerState<M> {
    terminated: Cell<bool>,
    onmessage: RefCell<Option<MessageHandler<M>>>,
    onerror: RefCell<Option<ErrorHandler>>,
}

/// A single-threaded stand-in for a Web `Worker`.
///
/// Nothing runs in the background: `post_message()` schedules a delivery of the message back to
/// `onmessage` through the timer queue, and the delivery happens when the microtask queue is
/// drained.
pub struct Worker<M> {
    id: u32,
    script_url: String,
    state: Rc<WorkerState<M>>,
    timers: TimerQueue,
}

impl<M: 'static> Worker<M> {
    /// Create a worker whose deliveries are scheduled on `timers`.
    pub fn new(id: u32, script_url: impl Into<String>, timers: TimerQueue) -> Self {
        Worker {
            id,
            script_url: script_url.into(),
            state: Rc::new(WorkerState {
                terminated: Cell::new(false),
                onmessage: RefCell::new(None),
                onerror: RefCell::new(None),
            }),
            timers,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    /// Return `true` once `terminate()` has been called.
    pub fn is_terminated(&self) -> bool {
        self.state.terminated.get()
    }

    pub fn onmessage(&self) -> Option<MessageHandler<M>> {
        self.state.onmessage.borrow().clone()
    }

    pub fn set_onmessage(&self, handler: Option<MessageHandler<M>>) {
        *self.state.onmessage.borrow_mut() = handler;
    }

    pub fn onerror(&self) -> Option<ErrorHandler> {
        self.state.onerror.borrow().clone()
    }

    pub fn set_onerror(&self, handler: Option<ErrorHandler>) {
        *self.state.onerror.borrow_mut() = handler;
    }

    /// Post a message.
    ///
    /// If `onmessage` is set, a delivery is scheduled. At delivery time, the message is dropped if
    /// the worker was terminated or `onmessage` was cleared in the meantime.
    pub fn post_message(&self, message: M) -> Result<(), ShimError> {
        if self.is_terminated() {
            return Err(ShimError::WorkerTerminated);
        }
        if self.state.onmessage.borrow().is_none() {
            debug!("Worker {}: no message handler, message dropped", self.id);
            return Ok(());
        }
        let state = self.state.clone();
        self.timers.set_timeout(
            move || {
                if state.terminated.get() {
                    return;
                }
                let handler = state.onmessage.borrow().clone();
                if let Some(handler) = handler {
                    let event = MessageEvent {
                        type_: "message",
                        data: message,
                        origin: String::new(),
                    };
                    handler(&event);
                }
            },
            0,
        );
        Ok(())
    }

    /// Stop delivering messages. Calling this more than once is harmless.
    pub fn terminate(&self) {
        if !self.state.terminated.replace(true) {
            debug!("Worker {} terminated", self.id);
        }
    }

    /// Set `onmessage` or `onerror`, depending on the listener type.
    pub fn add_event_listener(&self, listener: Listener<M>) {
        match listener {
            Listener::Message(handler) => self.set_onmessage(Some(handler)),
            Listener::Error(handler) => self.set_onerror(Some(handler)),
        }
    }

    /// Clear `onmessage` or `onerror` if, and only if, it is currently set to this very listener.
    pub fn remove_event_listener(&self, listener: &Listener<M>) {
        match listener {
            Listener::Message(handler) => {
                let mut onmessage = self.state.onmessage.borrow_mut();
                if matches!(&*onmessage, Some(current) if Rc::ptr_eq(current, handler)) {
                    *onmessage = None;
                }
            }
            Listener::Error(handler) => {
                let mut onerror = self.state.onerror.borrow_mut();
                if matches!(&*onerror, Some(current) if Rc::ptr_eq(current, handler)) {
                    *onerror = None;
                }
            }
        }
    }
}

impl<M> fmt::Debug for Worker<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Worker {{ id: {}, script_url: {:?}, terminated: {} }}",
            self.id,
            self.script_url,
            self.state.terminated.get()
        )
    }
}
