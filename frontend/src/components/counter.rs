use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::numbers::parse_int;
use crate::timers::Scheduler;
use crate::view::View;
use crate::viewport::{Entry, Viewport, WatchOptions};

pub const COUNTER_SELECTOR: &str = ".stat-number[data-target], .stat-value[data-target]";
pub const TARGET_ATTRIBUTE: &str = "data-target";
pub const COUNTED_CLASS: &str = "counted";

/// Currency and percent decorations a counter keeps while it counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affixes {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl Affixes {
    /// Read off the placeholder text the element ships with, e.g. `$0` or `0%`.
    pub fn detect(text: &str) -> Self {
        Self {
            prefix: if text.contains('$') { "$" } else { "" },
            suffix: if text.contains('%') { "%" } else { "" },
        }
    }

    fn render(&self, value: i64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub finished: bool,
}

/// Counts from zero up to `target` in fixed increments, one per tick.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    affixes: Affixes,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32, affixes: Affixes) -> Self {
        let ticks = (f64::from(duration_ms) / f64::from(tick_ms.max(1))).max(1.0);
        Self {
            target,
            increment: target as f64 / ticks,
            current: 0.0,
            affixes,
            finished: false,
        }
    }

    pub fn step(&mut self) -> Frame {
        if !self.finished {
            self.current += self.increment;
            self.finished = self.current >= self.target as f64;
        }
        let shown = if self.finished {
            self.target
        } else {
            (self.current.floor() as i64).min(self.target)
        };
        Frame {
            text: self.affixes.render(shown),
            finished: self.finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Starts each counter's animation the first time it is at least half visible.
pub fn observe<P, S>(
    viewport: &P,
    scheduler: S,
    counters: Vec<P::Target>,
    config: &SiteConfig,
) -> Result<(), SiteError>
where
    P: Viewport,
    P::Target: View,
    S: Scheduler,
{
    if counters.is_empty() {
        return Err(SiteError::MissingElement(COUNTER_SELECTOR.to_string()));
    }

    let duration_ms = config.counter_duration_ms;
    let tick_ms = config.counter_tick_ms;
    let on_change = move |entries: Vec<Entry<P::Target>>| -> Vec<P::Target> {
        for entry in entries {
            if !entry.is_intersecting || entry.target.has_class(COUNTED_CLASS) {
                continue;
            }
            let element = entry.target;
            element.set_class(COUNTED_CLASS, true);

            let raw = element.attribute(TARGET_ATTRIBUTE).unwrap_or_default();
            let target = match parse_int(&raw) {
                Ok(target) => target,
                Err(err) => {
                    log::debug!("counter skipped: {}", err);
                    continue;
                }
            };

            let affixes = Affixes::detect(&element.text());
            let animation = Rc::new(RefCell::new(CounterAnimation::new(
                target,
                duration_ms,
                tick_ms,
                affixes,
            )));
            scheduler.every(
                tick_ms,
                Box::new(move || {
                    let frame = animation.borrow_mut().step();
                    element.set_text(&frame.text);
                    !frame.finished
                }),
            );
        }
        Vec::new()
    };

    viewport.watch(
        counters,
        WatchOptions::threshold(config.counter_threshold),
        Box::new(on_change),
    )
}
