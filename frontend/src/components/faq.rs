use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::SiteError;
use crate::view::View;

pub const QUESTION_SELECTOR: &str = ".faq-question";
pub const EXPANDED_ATTRIBUTE: &str = "aria-expanded";
pub const ACTIVE_CLASS: &str = "active";

pub struct FaqItem<V> {
    pub question: V,
    /// The element wrapping question and answer; carries the `active` class.
    pub item: V,
}

/// A group of FAQ items with at most one open at a time.
pub struct Accordion<V> {
    items: Vec<FaqItem<V>>,
}

impl<V: View> Accordion<V> {
    /// Takes over the group as the page rendered it, keeping only the first
    /// expanded item open.
    pub fn new(items: Vec<FaqItem<V>>) -> Self {
        let accordion = Self { items };
        if let Some(first) = accordion.expanded() {
            accordion.collapse_all_except(Some(first));
            accordion.set_expanded(first, true);
        }
        accordion
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.items
            .get(index)
            .and_then(|item| item.question.attribute(EXPANDED_ATTRIBUTE))
            .as_deref()
            == Some("true")
    }

    /// Index of the open item, if any.
    pub fn expanded(&self) -> Option<usize> {
        (0..self.items.len()).find(|index| self.is_expanded(*index))
    }

    /// Opens `index`, closing the rest; an already open item closes instead.
    pub fn activate(&self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let was_open = self.is_expanded(index);
        self.collapse_all_except(Some(index));
        self.set_expanded(index, !was_open);
    }

    fn collapse_all_except(&self, keep: Option<usize>) {
        for index in 0..self.items.len() {
            if Some(index) != keep {
                self.set_expanded(index, false);
            }
        }
    }

    fn set_expanded(&self, index: usize, expanded: bool) {
        let item = &self.items[index];
        item.question
            .set_attribute(EXPANDED_ATTRIBUTE, if expanded { "true" } else { "false" });
        item.item.set_class(ACTIVE_CLASS, expanded);
    }
}

/// Enter and Space act like a click on a focused question.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

pub fn attach(document: &Document) -> Result<(), SiteError> {
    let questions = dom::require_all(document, QUESTION_SELECTOR)?;
    let items = questions
        .iter()
        .filter_map(|question| {
            question.parent_element().map(|item| FaqItem {
                question: question.clone(),
                item,
            })
        })
        .collect::<Vec<_>>();
    let accordion = Rc::new(Accordion::new(items));

    for (index, question) in accordion.items.iter().map(|item| &item.question).enumerate() {
        {
            let accordion = accordion.clone();
            dom::listen(question, "click", move |_| accordion.activate(index))?;
        }

        let clickable = question.clone().dyn_into::<HtmlElement>().ok();
        dom::listen(question, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&event.key()) {
                event.prevent_default();
                if let Some(question) = &clickable {
                    question.click();
                }
            }
        })?;
    }

    log::debug!("faq accordion wired with {} items", accordion.len());
    Ok(())
}
