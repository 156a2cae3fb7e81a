use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Window};

use crate::dom;
use crate::error::SiteError;

/// The scheduling widget is the only iframe on the page.
pub fn is_widget_frame(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("iframe")
}

/// Load errors don't bubble, so this listens in the capture phase and only
/// reports frames; nothing is retried.
pub fn watch_load_errors(window: &Window) -> Result<(), SiteError> {
    dom::listen_with_capture(window, "error", true, |event: Event| {
        let failed_frame = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map(|element| is_widget_frame(&element.tag_name()))
            .unwrap_or(false);
        if failed_frame {
            log::warn!("{}; check the embed URL", SiteError::WidgetLoadFailure);
        }
    })
}
