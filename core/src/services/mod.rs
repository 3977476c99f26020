//! Business services: token issuing, validation and refresh.

pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use refresh::RefreshCoordinator;
pub use token::{TokenFactory, TokenValidator, ValidatedToken};
