use log::Level;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::SiteError;

/// Height of the fixed navbar that anchored sections have to clear.
pub const HEADER_OFFSET: f64 = 80.0;
pub const SHADOW_THRESHOLD: f64 = 100.0;
pub const SHADOW_RAISED: &str = "0 4px 20px rgba(26, 54, 93, 0.2)";
pub const SHADOW_RESTING: &str = "0 2px 10px rgba(26, 54, 93, 0.1)";
pub const COUNTER_DURATION_MS: u32 = 2000;
/// Roughly one frame at 60fps.
pub const COUNTER_TICK_MS: u32 = 16;
pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const FADE_THRESHOLD: f64 = 0.1;
pub const FADE_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const FADE_STAGGER_MS: u32 = 100;
pub const SCROLL_DEBOUNCE_MS: u32 = 10;
/// Longest the navbar shadow lags behind while scrolling never pauses.
pub const SCROLL_MAX_WAIT_MS: u32 = 50;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tunables for every behavior on the page. Anything the page leaves out
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub header_offset: f64,
    pub shadow_threshold: f64,
    pub shadow_raised: String,
    pub shadow_resting: String,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub counter_threshold: f64,
    pub weeks_per_month: f64,
    pub fade_threshold: f64,
    pub fade_root_margin: String,
    pub fade_stagger_ms: u32,
    pub scroll_debounce_ms: u32,
    pub scroll_max_wait_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_offset: HEADER_OFFSET,
            shadow_threshold: SHADOW_THRESHOLD,
            shadow_raised: SHADOW_RAISED.to_string(),
            shadow_resting: SHADOW_RESTING.to_string(),
            counter_duration_ms: COUNTER_DURATION_MS,
            counter_tick_ms: COUNTER_TICK_MS,
            counter_threshold: COUNTER_THRESHOLD,
            weeks_per_month: WEEKS_PER_MONTH,
            fade_threshold: FADE_THRESHOLD,
            fade_root_margin: FADE_ROOT_MARGIN.to_string(),
            fade_stagger_ms: FADE_STAGGER_MS,
            scroll_debounce_ms: SCROLL_DEBOUNCE_MS,
            scroll_max_wait_ms: SCROLL_MAX_WAIT_MS,
        }
    }
}

impl SiteConfig {
    /// Reads the object handed to `initSite`. `undefined` and `null` mean defaults.
    pub fn from_js(value: JsValue) -> Result<Self, SiteError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}
