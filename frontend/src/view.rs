//! The handful of DOM mutations the behaviors need. Components talk to a
//! [`View`] so their logic runs the same against a real element or a fake.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub trait View {
    fn has_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, on: bool);
    /// An empty `value` clears the property.
    fn set_style(&self, property: &str, value: &str);
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    /// Current value of a form control, `None` for anything else.
    fn value(&self) -> Option<String>;
}

impl View for Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        let _ = self.class_list().toggle_with_force(class, on);
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = Element::set_attribute(self, name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = Element::remove_attribute(self, name);
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            self.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
        }
    }
}
