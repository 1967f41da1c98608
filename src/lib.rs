//! Cover Relay - a caching image relay
//!
//! Fetches remote cover images on behalf of browsers, retrying through a
//! public proxy when the origin refuses, and keeps a bounded in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod relay;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use relay::ImageRelay;
pub use tasks::spawn_cleanup_task;
