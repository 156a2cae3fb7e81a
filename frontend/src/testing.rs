//! In-memory stand-ins for the DOM, the viewport and the timers.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::SiteError;
use crate::timers::Scheduler;
use crate::view::View;
use crate::viewport::{Entry, OnChange, Viewport, WatchOptions};

#[derive(Default, Debug)]
pub struct FakeState {
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: Option<String>,
    pub texts_written: Vec<String>,
    pub style_writes: Vec<(String, String)>,
    pub attribute_writes: Vec<(String, String)>,
}

/// Shared handle to a fake element; clones point at the same element.
#[derive(Clone, Default, Debug)]
pub struct FakeView(Rc<RefCell<FakeState>>);

impl PartialEq for FakeView {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FakeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let view = Self::new();
        view.0.borrow_mut().text = text.to_string();
        view
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.0.borrow_mut().value = Some(value.to_string());
        self
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn texts_written(&self) -> Vec<String> {
        self.0.borrow().texts_written.clone()
    }

    pub fn style_writes(&self, property: &str) -> Vec<String> {
        self.0
            .borrow()
            .style_writes
            .iter()
            .filter(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
            .collect()
    }

    pub fn attribute_writes(&self, name: &str) -> usize {
        self.0
            .borrow()
            .attribute_writes
            .iter()
            .filter(|(written, _)| written == name)
            .count()
    }
}

impl View for FakeView {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        let mut state = self.0.borrow_mut();
        if on {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.0.borrow_mut();
        state
            .style_writes
            .push((property.to_string(), value.to_string()));
        if value.is_empty() {
            state.styles.remove(property);
        } else {
            state.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text = text.to_string();
        state.texts_written.push(text.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut state = self.0.borrow_mut();
        state
            .attribute_writes
            .push((name.to_string(), value.to_string()));
        state.attributes.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }
}

struct Watcher {
    options: WatchOptions,
    watched: Vec<FakeView>,
    on_change: OnChange<FakeView>,
}

/// Viewport whose visibility changes are driven by the test.
#[derive(Clone, Default)]
pub struct FakeViewport {
    watchers: Rc<RefCell<Vec<Watcher>>>,
    pub supported: Rc<Cell<bool>>,
}

impl FakeViewport {
    pub fn new() -> Self {
        let viewport = Self::default();
        viewport.supported.set(true);
        viewport
    }

    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Vec<WatchOptions> {
        self.watchers
            .borrow()
            .iter()
            .map(|watcher| watcher.options.clone())
            .collect()
    }

    pub fn is_watching(&self, target: &FakeView) -> bool {
        self.watchers
            .borrow()
            .iter()
            .any(|watcher| watcher.watched.contains(target))
    }

    /// Reports `targets` as entering the viewport, in order, to every
    /// watcher still observing them.
    pub fn show(&self, targets: &[&FakeView]) {
        self.report(targets, true);
    }

    pub fn hide(&self, targets: &[&FakeView]) {
        self.report(targets, false);
    }

    fn report(&self, targets: &[&FakeView], is_intersecting: bool) {
        let count = self.watchers.borrow().len();
        for index in 0..count {
            let batch: Vec<Entry<FakeView>> = {
                let watchers = self.watchers.borrow();
                targets
                    .iter()
                    .filter(|target| watchers[index].watched.contains(**target))
                    .map(|target| Entry {
                        target: (*target).clone(),
                        is_intersecting,
                    })
                    .collect()
            };
            if batch.is_empty() {
                continue;
            }
            let released = {
                let mut watchers = self.watchers.borrow_mut();
                (watchers[index].on_change)(batch)
            };
            let mut watchers = self.watchers.borrow_mut();
            watchers[index]
                .watched
                .retain(|target| !released.contains(target));
        }
    }
}

impl Viewport for FakeViewport {
    type Target = FakeView;

    fn watch(
        &self,
        targets: Vec<FakeView>,
        options: WatchOptions,
        on_change: OnChange<FakeView>,
    ) -> Result<(), SiteError> {
        if !self.supported.get() {
            return Err(SiteError::UnsupportedCapability("IntersectionObserver"));
        }
        self.watchers.borrow_mut().push(Watcher {
            options,
            watched: targets,
            on_change,
        });
        Ok(())
    }
}

enum Work {
    Once(Box<dyn FnOnce()>),
    Every {
        period: u64,
        task: Box<dyn FnMut() -> bool>,
    },
}

struct Job {
    due: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    work: Work,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_seq: u64,
    jobs: Vec<Job>,
}

impl Clock {
    fn push(&mut self, due: u64, cancelled: Rc<Cell<bool>>, work: Work) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.jobs.push(Job {
            due,
            seq,
            cancelled,
            work,
        });
    }

    fn pop_due(&mut self, until: u64) -> Option<Job> {
        self.jobs.retain(|job| !job.cancelled.get());
        let index = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| job.due <= until)
            .min_by_key(|(_, job)| (job.due, job.seq))
            .map(|(index, _)| index)?;
        Some(self.jobs.remove(index))
    }
}

/// Scheduler over a virtual clock that only moves when the test says so.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

pub struct ManualPending {
    cancelled: Rc<Cell<bool>>,
    detached: bool,
}

impl Drop for ManualPending {
    fn drop(&mut self) {
        if !self.detached {
            self.cancelled.set(true);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .jobs
            .iter()
            .filter(|job| !job.cancelled.get())
            .count()
    }

    /// Moves the clock forward, running every task that falls due on the way.
    pub fn advance(&self, ms: u64) {
        let until = self.now() + ms;
        loop {
            let job = self.clock.borrow_mut().pop_due(until);
            let Some(job) = job else { break };
            self.clock.borrow_mut().now = job.due;
            match job.work {
                Work::Once(task) => task(),
                Work::Every { period, mut task } => {
                    if task() {
                        self.clock.borrow_mut().push(
                            job.due + period,
                            job.cancelled,
                            Work::Every { period, task },
                        );
                    }
                }
            }
        }
        self.clock.borrow_mut().now = until;
    }
}

impl Scheduler for ManualScheduler {
    type Pending = ManualPending;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualPending {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + u64::from(delay_ms);
        clock.push(due, cancelled.clone(), Work::Once(task));
        ManualPending {
            cancelled,
            detached: false,
        }
    }

    fn detach(&self, mut pending: ManualPending) {
        pending.detached = true;
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut() -> bool>) {
        let mut clock = self.clock.borrow_mut();
        let period = u64::from(period_ms.max(1));
        let due = clock.now + period;
        clock.push(
            due,
            Rc::new(Cell::new(false)),
            Work::Every { period, task },
        );
    }
}
