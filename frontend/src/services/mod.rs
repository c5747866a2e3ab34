pub mod api;
pub mod charts;
pub mod config;
pub mod date_utils;
pub mod dialogs;
pub mod logging;

pub use api::ApiClient;
pub use config::AppConfig;
