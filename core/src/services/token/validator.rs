//! Token validation: signature, issuer, audience and lifetime checks

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Serialize;
use serde_json::{Map, Value};

use idt_shared::TokenConfig;

use crate::domain::entities::claim::ClaimSet;
use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::payload::decode_payload;
use super::policy::PolicyTable;

/// A token that passed validation, with its decoded contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedToken {
    /// Kind the token was validated as
    pub kind: TokenKind,
    /// Caller claims in signing order, repeated types grouped together
    pub claims: ClaimSet,
    pub issuer: String,
    pub audience: String,
    pub not_before: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Verifies tokens minted with the same [`TokenConfig`]
///
/// Rejects tokens with a bad signature, another issuer, the other kind's
/// audience, a `nbf` in the future or an `exp` in the past. No leeway is
/// applied.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validations: [Validation; TokenKind::ALL.len()],
}

impl TokenValidator {
    pub fn new(config: &TokenConfig) -> DomainResult<Self> {
        config.validate()?;

        let policies = PolicyTable::from_config(config);
        let validations = TokenKind::ALL.map(|kind| {
            let mut validation = Validation::new(Algorithm::HS256);
            validation.set_issuer(&[config.issuer.as_str()]);
            validation.set_audience(&[policies.get(kind).audience.as_str()]);
            validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);
            validation.validate_exp = true;
            validation.validate_nbf = true;
            validation.leeway = 0;
            validation
        });

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.signing_secret_bytes()),
            validations,
        })
    }

    /// Validates a token as the given kind and returns its contents
    ///
    /// # Returns
    ///
    /// * `Ok(ValidatedToken)` - Signature, issuer, audience and lifetime hold
    /// * `Err(DomainError::Token)` - The first check that failed
    pub fn validate(&self, token: &str, kind: TokenKind) -> DomainResult<ValidatedToken> {
        let data = decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validations[kind.index()],
        )
        .map_err(|e| {
            let error = map_jwt_error(&e);
            tracing::debug!(
                kind = %kind,
                reason = %error,
                event = "token_rejected",
                "Token failed validation"
            );
            DomainError::Token(error)
        })?;

        let (claims, registered) = decode_payload(data.claims)?;

        Ok(ValidatedToken {
            kind,
            claims,
            issuer: registered.iss,
            audience: registered.aud,
            not_before: to_datetime(registered.nbf)?,
            issued_at: to_datetime(registered.iat)?,
            expires_at: to_datetime(registered.exp)?,
        })
    }
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}

fn map_jwt_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAudience => TokenError::InvalidAudience,
        ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}

fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(timestamp, 0).ok_or(TokenError::InvalidClaims)
}
