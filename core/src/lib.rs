//! # Identity Tokens Core
//!
//! Issues and refreshes signed identity tokens. This crate contains the
//! claim and token entities, the token factory and validator, the refresh
//! coordinator, the identity lookup interface, and the error types they share.
//!
//! ```no_run
//! use std::sync::Arc;
//! use idt_core::{InMemoryIdentityLookup, RefreshCoordinator, TokenFactory, TokenKind, TokenValidator, User};
//! use idt_shared::TokenConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TokenConfig::new("a-signing-secret-of-at-least-32-bytes");
//! let factory = Arc::new(TokenFactory::new(&config)?);
//! let validator = TokenValidator::new(&config)?;
//!
//! let alice = User::new("42", "alice");
//! let pair = factory.create_token_pair(&alice)?;
//!
//! let lookup = Arc::new(InMemoryIdentityLookup::with_users(vec![alice]));
//! let coordinator = RefreshCoordinator::new(factory, lookup);
//! let claims = validator.validate(pair.refresh_token.content(), TokenKind::Refresh)?.claims;
//! let _access_token = coordinator.refresh_access_token(&claims).await?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
