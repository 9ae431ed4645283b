pub mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod detail;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::{router, AppState};
pub use client::{Action, MoodClient, Outcome, SharedClient};
pub use config::{ClientConfig, ServerConfig};
pub use errors::{ClientError, ValidationError};
pub use form::FormFields;
pub use storage::load_data;
pub use store::{HttpMoodStore, MoodStore};
pub use ui::{HtmlView, ViewPort};
