use std::rc::Rc;

use web_sys::Document;

use crate::dom;
use crate::error::SiteError;
use crate::numbers::{format_usd, parse_float, parse_int};
use crate::view::View;

pub const MISSED_CALLS_ID: &str = "missed-calls";
pub const MISSED_CALLS_VALUE_ID: &str = "missed-calls-value";
pub const CUSTOMER_VALUE_ID: &str = "customer-value";
pub const RESULT_ID: &str = "result-amount";

/// Revenue lost in a month to unanswered calls.
pub fn monthly_loss(
    missed_calls_per_week: i64,
    value_per_customer: f64,
    weeks_per_month: f64,
) -> f64 {
    let weekly = missed_calls_per_week as f64 * value_per_customer;
    weekly * weeks_per_month
}

/// Calculator wired to the slider, the customer value field and the result
/// display. Every recompute reads both inputs fresh.
pub struct RoiCalculator<V> {
    slider: V,
    slider_echo: V,
    customer_value: V,
    result: V,
    weeks_per_month: f64,
}

impl<V: View> RoiCalculator<V> {
    pub fn new(
        slider: V,
        slider_echo: V,
        customer_value: V,
        result: V,
        weeks_per_month: f64,
    ) -> Self {
        Self {
            slider,
            slider_echo,
            customer_value,
            result,
            weeks_per_month,
        }
    }

    pub fn slider_moved(&self) {
        self.slider_echo
            .set_text(&self.slider.value().unwrap_or_default());
        self.recalculate();
    }

    pub fn recalculate(&self) {
        let calls = parse_int(&self.slider.value().unwrap_or_default()).unwrap_or(0);
        let value = parse_float(&self.customer_value.value().unwrap_or_default()).unwrap_or(0.0);
        let loss = monthly_loss(calls, value, self.weeks_per_month);
        self.result.set_text(&format_usd(loss));
    }
}

pub fn attach(document: &Document, weeks_per_month: f64) -> Result<(), SiteError> {
    let slider = dom::by_id(document, MISSED_CALLS_ID)?;
    let slider_echo = dom::by_id(document, MISSED_CALLS_VALUE_ID)?;
    let customer_value = dom::by_id(document, CUSTOMER_VALUE_ID)?;
    let result = dom::by_id(document, RESULT_ID)?;

    let calculator = Rc::new(RoiCalculator::new(
        slider.clone(),
        slider_echo,
        customer_value.clone(),
        result,
        weeks_per_month,
    ));

    {
        let calculator = calculator.clone();
        dom::listen(&slider, "input", move |_| calculator.slider_moved())?;
    }
    {
        let calculator = calculator.clone();
        dom::listen(&customer_value, "input", move |_| calculator.recalculate())?;
    }

    calculator.recalculate();
    log::debug!("roi calculator wired");
    Ok(())
}
