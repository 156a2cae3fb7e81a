use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

pub mod config;
pub mod debounce;
mod dom;
pub mod error;
pub mod numbers;
pub mod timers;
pub mod view;
pub mod viewport;
pub mod components {
    pub mod counter;
    pub mod fade_in;
    pub mod faq;
    pub mod form;
    pub mod lazy_images;
    pub mod nav;
    pub mod navbar;
    pub mod roi;
    pub mod smooth_scroll;
    pub mod widget;
}
#[cfg(test)]
mod testing;

pub use config::SiteConfig;
pub use error::SiteError;

use components::{
    counter, fade_in, faq, form, lazy_images, nav, navbar, roi, smooth_scroll, widget,
};
use timers::BrowserTimers;
use viewport::DomViewport;

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // A second init (module loaded twice) is harmless
    let _ = console_log::init_with_level(config::log_level());
}

/// Wires every behavior into the current page. `config` may be omitted.
#[wasm_bindgen(js_name = initSite)]
pub fn init_site(config: JsValue) -> Result<(), JsValue> {
    let config = SiteConfig::from_js(config)?;
    let window = dom::window()?;
    let document = dom::document()?;
    attach_all(&window, &document, &config);
    info!("site behaviors initialized");
    Ok(())
}

/// Marks empty required fields in `form`; `true` when none are empty.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: &Element) -> bool {
    form::validate_form(form)
}

/// Monthly revenue lost to missed calls, formatted like `$4,330`.
#[wasm_bindgen(js_name = monthlyLoss)]
pub fn monthly_loss(missed_calls_per_week: i32, value_per_customer: f64) -> String {
    let value = if value_per_customer.is_finite() {
        value_per_customer
    } else {
        0.0
    };
    numbers::format_usd(roi::monthly_loss(
        i64::from(missed_calls_per_week),
        value,
        config::WEEKS_PER_MONTH,
    ))
}

fn attach_all(window: &Window, document: &Document, config: &SiteConfig) {
    let viewport = DomViewport::new(window.clone());

    report("navigation toggle", nav::attach(document));
    report(
        "smooth scroll",
        smooth_scroll::attach(window, document, config.header_offset),
    );
    report(
        "navbar shadow",
        navbar::attach(window, document, BrowserTimers, config),
    );
    report(
        "stat counters",
        dom::select_all(document, counter::COUNTER_SELECTOR)
            .and_then(|counters| counter::observe(&viewport, BrowserTimers, counters, config)),
    );
    report("faq accordion", faq::attach(document));
    report("roi calculator", roi::attach(document, config.weeks_per_month));
    report(
        "fade-in",
        dom::select_all(document, fade_in::FADE_SELECTOR)
            .and_then(|targets| fade_in::observe(&viewport, BrowserTimers, targets, config)),
    );
    report(
        "lazy images",
        dom::select_all(document, lazy_images::LAZY_IMAGE_SELECTOR)
            .and_then(|images| lazy_images::observe(&viewport, images)),
    );
    report("widget watcher", widget::watch_load_errors(window));
}

fn report(component: &str, result: Result<(), SiteError>) {
    match result {
        Ok(()) => debug!("{} ready", component),
        Err(err) if err.is_absence() => debug!("{} skipped: {}", component, err),
        Err(err) => warn!("{} not wired: {}", component, err),
    }
}
