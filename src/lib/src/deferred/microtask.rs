use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A deferred step.
pub type Microtask = Box<dyn FnOnce()>;

/// The only suspension primitive available to the shim: a FIFO of steps that run after the
/// current synchronous work, when the queue is drained.
///
/// Handles are cheap to clone and share the same queue.
#[derive(Clone, Default)]
pub struct MicrotaskQueue {
    tasks: Rc<RefCell<VecDeque<Microtask>>>,
}

impl MicrotaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step.
    pub fn enqueue(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Run steps until the queue is empty, including steps queued while draining.
    ///
    /// Returns the number of steps that ran.
    pub fn run_until_idle(&self) -> usize {
        let mut count = 0;
        loop {
            // The borrow must end before the task runs, as tasks can queue more tasks.
            let task = self.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    count += 1;
                }
                None => return count,
            }
        }
    }

    /// Number of pending steps.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Return `true` if no steps are pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl fmt::Debug for MicrotaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MicrotaskQueue {{ pending: {} }}", self.len())
    }
}
