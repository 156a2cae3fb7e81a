use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteError {
    #[error("no element matches `{0}`")]
    MissingElement(String),

    #[error("{0} is not available in this browser")]
    UnsupportedCapability(&'static str),

    #[error("`{0}` is not a number")]
    InvalidNumericInput(String),

    #[error("embedded scheduling widget failed to load")]
    WidgetLoadFailure,

    #[error("browser call failed: {0}")]
    Browser(String),

    #[error("invalid site config: {0}")]
    Config(String),
}

impl SiteError {
    /// Errors that just mean "this part of the page isn't here".
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            SiteError::MissingElement(_) | SiteError::UnsupportedCapability(_)
        )
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_wasm_bindgen::Error> for SiteError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        SiteError::Config(err.to_string())
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
