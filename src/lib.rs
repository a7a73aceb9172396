//! envspec: typed configuration from environment variables, env files and defaults.
//!
//! This module exports the core components for embedding and testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use config::{ConfigTable, Value, current, get, load};
pub use error::ConfigError;
