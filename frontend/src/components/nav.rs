use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Node};

use crate::dom;
use crate::error::SiteError;
use crate::view::View;

pub const HAMBURGER_ID: &str = "hamburger";
pub const MENU_ID: &str = "navMenu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Mobile menu open/closed state, kept as the `active` class on both the
/// hamburger control and the menu panel.
pub struct NavToggle<V> {
    control: V,
    panel: V,
}

impl<V: View> NavToggle<V> {
    pub fn new(control: V, panel: V) -> Self {
        Self { control, panel }
    }

    pub fn is_open(&self) -> bool {
        self.control.has_class(ACTIVE_CLASS)
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Clicks landing anywhere outside the control and the panel close the menu.
    pub fn document_clicked(&self, inside: bool) {
        if !inside {
            self.close();
        }
    }

    fn set_open(&self, open: bool) {
        self.control.set_class(ACTIVE_CLASS, open);
        self.panel.set_class(ACTIVE_CLASS, open);
    }
}

pub fn attach(document: &Document) -> Result<(), SiteError> {
    let control = dom::by_id(document, HAMBURGER_ID)?;
    let panel = dom::by_id(document, MENU_ID)?;
    let toggle = Rc::new(NavToggle::new(control.clone(), panel.clone()));

    {
        let toggle = toggle.clone();
        dom::listen(&control, "click", move |_| toggle.toggle())?;
    }

    for link in dom::select_all(document, NAV_LINK_SELECTOR)? {
        let toggle = toggle.clone();
        dom::listen(&link, "click", move |_| toggle.close())?;
    }

    dom::listen(document, "click", move |event: Event| {
        let inside = event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .map(|node| contains(&control, &node) || contains(&panel, &node))
            .unwrap_or(false);
        toggle.document_clicked(inside);
    })?;

    log::debug!("navigation toggle wired");
    Ok(())
}

fn contains(element: &Element, node: &Node) -> bool {
    element.contains(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeView;

    fn menu() -> (FakeView, FakeView, NavToggle<FakeView>) {
        let control = FakeView::new();
        let panel = FakeView::new();
        let toggle = NavToggle::new(control.clone(), panel.clone());
        (control, panel, toggle)
    }

    #[test]
    fn toggle_flips_both_elements_together() {
        let (control, panel, toggle) = menu();

        toggle.toggle();
        assert!(toggle.is_open());
        assert!(control.has_class("active"));
        assert!(panel.has_class("active"));

        toggle.toggle();
        assert!(!toggle.is_open());
        assert!(!control.has_class("active"));
        assert!(!panel.has_class("active"));
    }

    #[test]
    fn link_click_closes_an_open_menu() {
        let (_, panel, toggle) = menu();
        toggle.toggle();
        toggle.close();
        assert!(!toggle.is_open());
        assert!(!panel.has_class("active"));
    }

    #[test]
    fn outside_click_closes_but_inside_click_does_not() {
        let (_, _, toggle) = menu();
        toggle.toggle();

        toggle.document_clicked(true);
        assert!(toggle.is_open());

        toggle.document_clicked(false);
        assert!(!toggle.is_open());
    }

    #[test]
    fn closing_a_closed_menu_is_harmless() {
        let (control, _, toggle) = menu();
        toggle.close();
        toggle.document_clicked(false);
        assert!(!control.has_class("active"));
    }
}
