use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::error::SiteError;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Turns in-page anchor clicks into a smooth scroll that stops short of the
/// fixed header.
#[derive(Debug, Clone, Copy)]
pub struct ScrollRouter {
    header_offset: f64,
}

impl ScrollRouter {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// Vertical scroll position for `href`, or `None` when the fragment does
    /// not name an element. `locate` maps a selector to the element's top.
    pub fn destination<F>(&self, href: &str, locate: F) -> Option<f64>
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        let selector = fragment(href)?;
        locate(selector).map(|top| top - self.header_offset)
    }
}

/// The `#id` part of an in-page link; a bare `#` names nothing.
pub fn fragment(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

pub fn attach(window: &Window, document: &Document, header_offset: f64) -> Result<(), SiteError> {
    let router = ScrollRouter::new(header_offset);
    let anchors = dom::select_all(document, ANCHOR_SELECTOR)?;

    for anchor in &anchors {
        let window = window.clone();
        let document = document.clone();
        let href_of = anchor.clone();
        dom::listen(anchor, "click", move |event| {
            event.prevent_default();
            let href = href_of.get_attribute("href").unwrap_or_default();
            let top = router.destination(&href, |selector| {
                // selectors like `#1-intro` are invalid and just miss
                document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                    .map(|element| f64::from(element.offset_top()))
            });
            if let Some(top) = top {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
        })?;
    }

    log::debug!("smooth scroll wired to {} anchors", anchors.len());
    Ok(())
}
