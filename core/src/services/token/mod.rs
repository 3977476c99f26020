//! Token service module for JWT issuing
//!
//! This module handles all token-related operations including:
//! - Access and refresh token signing (HS256)
//! - Per-kind audience and lifetime resolution
//! - Token validation for hosts and the refresh path

mod factory;
mod payload;
mod policy;
mod validator;

#[cfg(test)]
pub(crate) mod tests;

pub use factory::TokenFactory;
pub use payload::REGISTERED_CLAIMS;
pub use validator::{TokenValidator, ValidatedToken};
