use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::SiteError;

/// One visibility change reported for a watched target.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub target: T,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchOptions {
    pub threshold: Option<f64>,
    pub root_margin: Option<String>,
}

impl WatchOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            root_margin: None,
        }
    }

    pub fn with_root_margin(mut self, margin: &str) -> Self {
        self.root_margin = Some(margin.to_string());
        self
    }
}

/// Called with each batch of entries; returns the targets that no longer
/// need watching.
pub type OnChange<T> = Box<dyn FnMut(Vec<Entry<T>>) -> Vec<T>>;

/// Viewport-intersection capability.
pub trait Viewport {
    type Target: Clone + 'static;

    fn watch(
        &self,
        targets: Vec<Self::Target>,
        options: WatchOptions,
        on_change: OnChange<Self::Target>,
    ) -> Result<(), SiteError>;
}

/// [`Viewport`] backed by the browser's `IntersectionObserver`.
#[derive(Clone, Debug)]
pub struct DomViewport {
    window: web_sys::Window,
}

impl DomViewport {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    pub fn supported(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }
}

impl Viewport for DomViewport {
    type Target = Element;

    fn watch(
        &self,
        targets: Vec<Element>,
        options: WatchOptions,
        mut on_change: OnChange<Element>,
    ) -> Result<(), SiteError> {
        if !self.supported() {
            return Err(SiteError::UnsupportedCapability("IntersectionObserver"));
        }

        let report = move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Entry {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            for done in on_change(batch) {
                observer.unobserve(&done);
            }
        };
        let callback =
            Closure::wrap(Box::new(report) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        if let Some(threshold) = options.threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        if let Some(margin) = options.root_margin.as_deref() {
            init.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        // the observer lives as long as the page
        callback.forget();

        for target in &targets {
            observer.observe(target);
        }
        Ok(())
    }
}
