//! Configuration error types
//!
//! Every variant is raised while the process starts up and is fatal: a host
//! that cannot build a valid configuration must not start issuing tokens.

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Signing secret is missing")]
    MissingSigningSecret,

    #[error("Signing secret too short: {actual} bytes (minimum: {minimum})")]
    WeakSigningSecret { actual: usize, minimum: usize },

    #[error("Non-positive TTL: {field} = {value}")]
    NonPositiveTtl { field: String, value: i64 },

    #[error("TTL too long: {field} = {value} (maximum: {maximum})")]
    TtlTooLong { field: String, value: i64, maximum: i64 },

    #[error("Required field is empty: {field}")]
    EmptyField { field: String },

    #[error("Access and refresh audiences must differ (both are {audience:?})")]
    AudienceCollision { audience: String },

    #[error("Development signing secret is not allowed in {environment}")]
    DefaultSigningSecret { environment: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
