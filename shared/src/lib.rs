//! Shared configuration and error types for the identity token services
//!
//! This crate provides the pieces every other crate needs at startup:
//! - Configuration types (token signing, logging, environment)
//! - Layered configuration loading
//! - Configuration error types

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenConfig};
pub use errors::{ConfigError, ConfigResult};
