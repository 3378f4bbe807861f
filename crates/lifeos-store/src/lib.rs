pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;
pub mod store;

// Re-exports
pub use client::{LifeOsClient, DEFAULT_TASK_LIMIT};
pub use config::StoreConfig;
pub use error::{ConfigError, Error, Result};
pub use query::{Order, Query};
pub use rest::RestStore;
pub use store::DataStore;
