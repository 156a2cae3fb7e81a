use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::debounce::debounce_with_max_wait;
use crate::dom;
use crate::error::SiteError;
use crate::timers::Scheduler;
use crate::view::View;

pub const NAVBAR_ID: &str = "navbar";

/// Picks the navbar shadow for a scroll offset and remembers what it last
/// applied so the element is only written when the level changes.
#[derive(Debug, Clone)]
pub struct NavbarShadow {
    threshold: f64,
    raised: String,
    resting: String,
    last_scroll: f64,
    raised_applied: Option<bool>,
}

impl NavbarShadow {
    pub fn new(threshold: f64, raised: &str, resting: &str) -> Self {
        Self {
            threshold,
            raised: raised.to_string(),
            resting: resting.to_string(),
            last_scroll: 0.0,
            raised_applied: None,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.shadow_threshold,
            &config.shadow_raised,
            &config.shadow_resting,
        )
    }

    /// Records the current offset; nothing is written until [`apply`](Self::apply).
    pub fn scrolled(&mut self, offset: f64) {
        self.last_scroll = offset;
    }

    /// Shadow for the last recorded offset, or `None` when it is already showing.
    pub fn update(&mut self) -> Option<&str> {
        let raised = self.last_scroll > self.threshold;
        if self.raised_applied == Some(raised) {
            return None;
        }
        self.raised_applied = Some(raised);
        Some(if raised {
            self.raised.as_str()
        } else {
            self.resting.as_str()
        })
    }

    pub fn apply<V: View>(&mut self, navbar: &V) {
        if let Some(shadow) = self.update() {
            navbar.set_style("box-shadow", shadow);
        }
    }
}

/// Body of the scroll listener. Offsets are recorded on every event; the
/// shadow catches up once scrolling pauses, and at least every
/// `scroll_max_wait_ms` while it doesn't.
pub fn scroll_handler<V, S>(
    navbar: V,
    scheduler: S,
    config: &SiteConfig,
    initial_offset: f64,
) -> impl FnMut(f64)
where
    V: View + 'static,
    S: Scheduler,
{
    let shadow = Rc::new(RefCell::new(NavbarShadow::from_config(config)));
    {
        let mut shadow = shadow.borrow_mut();
        shadow.scrolled(initial_offset);
        shadow.apply(&navbar);
    }

    let settle = {
        let shadow = shadow.clone();
        debounce_with_max_wait(
            scheduler,
            config.scroll_debounce_ms,
            config.scroll_max_wait_ms,
            move |_: ()| shadow.borrow_mut().apply(&navbar),
        )
    };

    move |offset: f64| {
        shadow.borrow_mut().scrolled(offset);
        settle.call(());
    }
}

pub fn attach<S: Scheduler>(
    window: &Window,
    document: &Document,
    scheduler: S,
    config: &SiteConfig,
) -> Result<(), SiteError> {
    let navbar = dom::by_id(document, NAVBAR_ID)?;
    let initial_offset = window.scroll_y().unwrap_or(0.0);
    let mut on_scroll = scroll_handler(navbar, scheduler, config, initial_offset);

    let scroll_source = window.clone();
    dom::listen(window, "scroll", move |_| {
        on_scroll(scroll_source.scroll_y().unwrap_or(0.0));
    })?;

    log::debug!("navbar shadow wired");
    Ok(())
}
