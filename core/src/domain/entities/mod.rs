//! Domain entities representing core business objects.

pub mod claim;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use claim::{claim_types, Claim, ClaimSet};
pub use token::{Token, TokenKind, TokenPair, TokenState};
pub use user::User;
