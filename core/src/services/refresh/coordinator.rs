//! Refresh coordinator implementation

use std::sync::Arc;

use crate::domain::entities::claim::{claim_types, ClaimSet};
use crate::domain::entities::token::{Token, TokenKind};
use crate::errors::{DomainResult, RefreshError};
use crate::repositories::IdentityLookup;
use crate::services::token::{TokenFactory, TokenValidator};

/// Mints fresh access tokens for holders of a refresh token
///
/// The new token is rebuilt from the looked-up user record (identity and
/// display name). Other claims carried by the refresh token are not copied
/// into it.
pub struct RefreshCoordinator<L: IdentityLookup + ?Sized> {
    factory: Arc<TokenFactory>,
    lookup: Arc<L>,
}

impl<L: IdentityLookup + ?Sized> RefreshCoordinator<L> {
    /// Creates a new refresh coordinator
    ///
    /// # Arguments
    ///
    /// * `factory` - Factory used to mint the new access token
    /// * `lookup` - Resolves the identity claim to a user record
    pub fn new(factory: Arc<TokenFactory>, lookup: Arc<L>) -> Self {
        Self { factory, lookup }
    }

    /// Mints a new access token from an already verified refresh token's claims
    ///
    /// This method:
    /// 1. Finds the identity claim in `claims`
    /// 2. Resolves it through the identity lookup
    /// 3. Creates an access token for the resolved user
    ///
    /// Signature, audience and expiry of the refresh token must have been
    /// checked by the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - New access token
    /// * `Err(RefreshError::IdentityClaimMissing)` - No non-empty identity claim
    /// * `Err(RefreshError::UserNotFound)` - The identity resolves to no user
    /// * `Err(DomainError)` - The lookup failed; passed through unchanged
    pub async fn refresh_access_token(&self, claims: &ClaimSet) -> DomainResult<Token> {
        // An empty identity is refused here instead of being passed to the lookup
        let id = match claims.identity() {
            Some(id) if !id.is_empty() => id,
            _ => {
                tracing::warn!(
                    event = "refresh_denied",
                    reason = "identity_claim_missing",
                    "Refresh claims carry no identity claim"
                );
                return Err(RefreshError::IdentityClaimMissing.into());
            }
        };

        let user = self
            .lookup
            .get_user(id)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = id,
                    error = %e,
                    event = "identity_lookup_failed",
                    "Identity lookup failed during refresh"
                );
                e
            })?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = id,
                    event = "refresh_denied",
                    reason = "user_not_found",
                    "Refresh identity does not resolve to a user"
                );
                RefreshError::UserNotFound { id: id.to_string() }
            })?;

        let dropped = claims
            .iter()
            .filter(|c| {
                c.claim_type != claim_types::NAME_IDENTIFIER && c.claim_type != claim_types::NAME
            })
            .count();
        if dropped > 0 {
            tracing::debug!(
                user_id = %user.id,
                dropped_claims = dropped,
                "Refresh token claims beyond identity and name are not carried over"
            );
        }

        let token = self.factory.create_access_token(&user)?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %token.expires_at(),
            event = "access_token_refreshed",
            "Issued refreshed access token"
        );

        Ok(token)
    }

    /// Validates a raw refresh token and mints a new access token from it
    ///
    /// The token must pass validation as [`TokenKind::Refresh`]; an access
    /// token is rejected on its audience.
    pub async fn refresh_with_token(
        &self,
        validator: &TokenValidator,
        refresh_token: &str,
    ) -> DomainResult<Token> {
        let validated = validator.validate(refresh_token, TokenKind::Refresh)?;
        self.refresh_access_token(&validated.claims).await
    }
}
