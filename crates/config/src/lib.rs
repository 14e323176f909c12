//! Configuration types for the causeway coordinator.

mod config;
mod retry;

pub use config::{Config, LoggingConfig, StateManagerConfig};
pub use retry::RetryConfig;
