use web_sys::Element;

use crate::dom;
use crate::view::View;

pub const REQUIRED_SELECTOR: &str = "input[required], select[required]";
pub const INVALID_BORDER: &str = "#dc3545";

/// Checks every required field has something other than whitespace in it,
/// marking the empty ones and clearing the mark from the rest.
pub fn validate_fields<V: View>(fields: &[V]) -> bool {
    let mut valid = true;
    for field in fields {
        let filled = field
            .value()
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);
        field.set_style("border-color", if filled { "" } else { INVALID_BORDER });
        valid &= filled;
    }
    valid
}

pub fn validate_form(form: &Element) -> bool {
    match dom::select_all_in(form, REQUIRED_SELECTOR) {
        Ok(fields) => validate_fields(&fields),
        Err(err) => {
            log::warn!("could not read form fields: {}", err);
            false
        }
    }
}
