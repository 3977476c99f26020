//! Domain-specific error types for token issuing and refresh
//!
//! The messages here are the internal descriptions. Hosts decide what to show
//! to clients; refresh failures are meant to surface as "refresh denied".

use thiserror::Error;

/// Token signing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid audience")]
    InvalidAudience,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Refresh failures
///
/// Both variants deny the refresh; the caller decides whether to prompt for
/// re-authentication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Refresh denied: identity claim missing")]
    IdentityClaimMissing,

    #[error("Refresh denied: user not found: {id}")]
    UserNotFound { id: String },
}
