use anyhow::Context;
use serde::Deserialize;

use crate::coordinator::state::Tab;

/// Name of the global the hosting page may set to a JSON configuration string
pub const CONFIG_GLOBAL: &str = "FINANCE_TRACKER_CONFIG";

/// How delete/archive confirmations are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmStyle {
    /// In-page modal dialog
    #[default]
    Modal,
    /// `window.confirm` / `window.prompt`
    Native,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every API path; empty means same origin
    pub api_base_url: String,
    pub confirm_style: ConfirmStyle,
    pub notification_timeout_ms: u32,
    /// Show the learning-period banner and suggestions on the budget tab
    pub learning_period: bool,
    pub initial_tab: Tab,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            confirm_style: ConfirmStyle::default(),
            notification_timeout_ms: 3000,
            learning_period: true,
            initial_tab: Tab::Expenses,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid finance tracker configuration")
    }

    /// Configuration from the page global, defaults when absent or invalid
    pub fn load() -> Self {
        let Some(raw) = read_global(CONFIG_GLOBAL) else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(target: "config", "{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    use wasm_bindgen::JsValue;

    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_key: &str) -> Option<String> {
    None
}
