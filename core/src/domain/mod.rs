//! Domain layer containing claims, tokens and user identities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{claim_types, Claim, ClaimSet, Token, TokenKind, TokenPair, TokenState, User};
