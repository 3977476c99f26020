//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{RefreshError, TokenError};

pub use idt_shared::ConfigError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

impl DomainError {
    /// Whether this error should be reported to the client as "refresh denied"
    ///
    /// Covers the refresh failures as well as a refresh token that failed
    /// validation. Configuration and collaborator failures are not denials.
    pub fn is_refresh_denied(&self) -> bool {
        match self {
            DomainError::Refresh(_) => true,
            DomainError::Token(TokenError::TokenGenerationFailed) => false,
            DomainError::Token(_) => true,
            DomainError::Configuration(_) | DomainError::Internal { .. } => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
