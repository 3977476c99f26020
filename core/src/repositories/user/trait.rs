//! Identity lookup trait used to resolve a user by identifier.
//!
//! User records live outside this crate. The refresh path only needs to turn
//! an identifier back into a [`User`], so the contract is this one narrow
//! capability rather than a full repository.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Capability to resolve a user record by its unique identifier
///
/// Implementations own their latency and failure modes; callers neither retry
/// nor time out the lookup.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use idt_core::repositories::IdentityLookup;
/// use idt_core::domain::entities::user::User;
/// use idt_core::errors::DomainError;
///
/// struct DirectoryLookup {
///     // directory client
/// }
///
/// #[async_trait]
/// impl IdentityLookup for DirectoryLookup {
///     async fn get_user(&self, id: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The identifier carried in the identity claim
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given identifier
    /// * `Err(DomainError)` - The lookup itself failed
    async fn get_user(&self, id: &str) -> Result<Option<User>, DomainError>;
}
