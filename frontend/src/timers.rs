use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};

/// Timer capability handed to the behaviors that wait or animate.
pub trait Scheduler: Clone + 'static {
    /// A scheduled one-shot task. Dropping it cancels the task.
    type Pending: 'static;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Pending;

    /// Lets a pending task run without anyone holding on to it.
    fn detach(&self, pending: Self::Pending);

    /// Runs `task` every `period_ms` until it returns `false`.
    fn every(&self, period_ms: u32, task: Box<dyn FnMut() -> bool>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Scheduler for BrowserTimers {
    type Pending = Timeout;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn detach(&self, pending: Timeout) {
        pending.forget();
    }

    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut() -> bool>) {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let own_slot = slot.clone();
        let interval = Interval::new(period_ms, move || {
            if task() {
                return;
            }
            if let Some(interval) = own_slot.borrow_mut().take() {
                // clears the interval; the closure running right now has to stay alive
                interval.cancel().forget();
            }
        });
        *slot.borrow_mut() = Some(interval);
    }
}
