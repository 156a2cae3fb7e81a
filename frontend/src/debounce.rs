use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::timers::Scheduler;

/// A function that only runs once calls to it have been quiet for `wait_ms`.
/// With a max wait, a steady stream of calls still runs it at least that often.
pub struct Debounced<A, S: Scheduler> {
    inner: Rc<Inner<A, S>>,
}

struct Inner<A, S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    max_wait_ms: Option<u32>,
    func: Box<dyn Fn(A)>,
    latest: RefCell<Option<A>>,
    trailing: RefCell<Option<S::Pending>>,
    deadline: RefCell<Option<S::Pending>>,
    deadline_armed: Cell<bool>,
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn debounce<A, S, F>(scheduler: S, wait_ms: u32, func: F) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced::new(scheduler, wait_ms, None, Box::new(func))
}

/// Like [`debounce`], but a burst never holds the call back longer than `max_wait_ms`.
pub fn debounce_with_max_wait<A, S, F>(
    scheduler: S,
    wait_ms: u32,
    max_wait_ms: u32,
    func: F,
) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced::new(scheduler, wait_ms, Some(max_wait_ms), Box::new(func))
}

impl<A: 'static, S: Scheduler> Inner<A, S> {
    fn flush(&self) {
        let args = self.latest.borrow_mut().take();
        if let Some(args) = args {
            (self.func)(args);
        }
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    fn new(scheduler: S, wait_ms: u32, max_wait_ms: Option<u32>, func: Box<dyn Fn(A)>) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                wait_ms,
                max_wait_ms,
                func,
                latest: RefCell::new(None),
                trailing: RefCell::new(None),
                deadline: RefCell::new(None),
                deadline_armed: Cell::new(false),
            }),
        }
    }

    /// Replaces the waiting arguments and restarts the quiet period.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        *inner.latest.borrow_mut() = Some(args);

        let weak = Rc::downgrade(inner);
        let trailing = inner.scheduler.after(
            inner.wait_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    // only the other timer may be dropped from inside a timer callback
                    drop(inner.deadline.borrow_mut().take());
                    inner.deadline_armed.set(false);
                    inner.flush();
                }
            }),
        );
        // a fired task left in the slot is simply dropped here
        drop(inner.trailing.borrow_mut().replace(trailing));

        if let Some(max_wait_ms) = inner.max_wait_ms {
            if !inner.deadline_armed.get() {
                inner.deadline_armed.set(true);
                let deadline = inner
                    .scheduler
                    .after(max_wait_ms, Box::new(Self::deadline_task(Rc::downgrade(inner))));
                drop(inner.deadline.borrow_mut().replace(deadline));
            }
        }
    }

    fn deadline_task(weak: Weak<Inner<A, S>>) -> impl FnOnce() + 'static {
        move || {
            if let Some(inner) = weak.upgrade() {
                inner.deadline_armed.set(false);
                inner.flush();
            }
        }
    }
}
