use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList};

use crate::error::SiteError;

pub fn window() -> Result<web_sys::Window, SiteError> {
    web_sys::window().ok_or(SiteError::UnsupportedCapability("window"))
}

pub fn document() -> Result<Document, SiteError> {
    window()?
        .document()
        .ok_or(SiteError::UnsupportedCapability("document"))
}

pub fn by_id(document: &Document, id: &str) -> Result<Element, SiteError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::MissingElement(format!("#{}", id)))
}

pub fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn select_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(root.query_selector_all(selector)?))
}

/// Like [`select_all`], but an empty match is a [`SiteError::MissingElement`].
pub fn require_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    let found = select_all(document, selector)?;
    if found.is_empty() {
        return Err(SiteError::MissingElement(selector.to_string()));
    }
    Ok(found)
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Registers a handler for the lifetime of the page.
pub fn listen<T, F>(target: &T, event: &str, handler: F) -> Result<(), SiteError>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    listen_with_capture(target, event, false, handler)
}

pub fn listen_with_capture<T, F>(
    target: &T,
    event: &str,
    capture: bool,
    handler: F,
) -> Result<(), SiteError>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.as_ref().add_event_listener_with_callback_and_bool(
        event,
        callback.as_ref().unchecked_ref(),
        capture,
    )?;
    callback.forget();
    Ok(())
}
