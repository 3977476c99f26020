//! Token factory: signs claim sets into access and refresh tokens

use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use idt_shared::TokenConfig;

use crate::domain::entities::claim::ClaimSet;
use crate::domain::entities::token::{Token, TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::payload::{encode_payload, RegisteredClaims};
use super::policy::PolicyTable;

/// Mints signed HS256 tokens from claim sets
///
/// Holds only immutable state built from a validated [`TokenConfig`], so a
/// single instance can be shared across tasks behind an `Arc`.
pub struct TokenFactory {
    issuer: String,
    policies: PolicyTable,
    encoding_key: EncodingKey,
}

impl TokenFactory {
    /// Creates a new token factory
    ///
    /// # Arguments
    ///
    /// * `config` - Token configuration
    ///
    /// # Returns
    ///
    /// A new `TokenFactory`, or `DomainError::Configuration` if the
    /// configuration cannot be used to sign tokens
    pub fn new(config: &TokenConfig) -> DomainResult<Self> {
        config.validate()?;

        if config.is_using_default_secret() {
            tracing::warn!(
                event = "default_signing_secret",
                "Token factory is using the development signing secret"
            );
        }
        if config.refresh_ttl_minutes <= config.access_ttl_minutes {
            tracing::warn!(
                access_ttl_minutes = config.access_ttl_minutes,
                refresh_ttl_minutes = config.refresh_ttl_minutes,
                "Refresh tokens do not outlive access tokens"
            );
        }

        tracing::info!(
            issuer = %config.issuer,
            access_audience = %config.access_audience,
            refresh_audience = %config.refresh_audience,
            access_ttl_minutes = config.access_ttl_minutes,
            refresh_ttl_minutes = config.refresh_ttl_minutes,
            "Token factory initialized"
        );

        Ok(Self {
            issuer: config.issuer.clone(),
            policies: PolicyTable::from_config(config),
            encoding_key: EncodingKey::from_secret(config.signing_secret_bytes()),
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Audience written into tokens of the given kind
    pub fn audience(&self, kind: TokenKind) -> &str {
        &self.policies.get(kind).audience
    }

    /// Lifetime of tokens of the given kind
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.policies.get(kind).ttl
    }

    /// Creates an access token carrying the user's identity and display name
    pub fn create_access_token(&self, user: &User) -> DomainResult<Token> {
        self.sign(&ClaimSet::for_user(user), TokenKind::Access)
    }

    /// Creates an access and refresh token for the user
    ///
    /// Both tokens carry the same minimal claim set and differ only in
    /// audience and expiry.
    pub fn create_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        self.create_token_pair_from_claims(&ClaimSet::for_user(user))
    }

    /// Creates an access and refresh token from a caller-supplied claim set
    ///
    /// The claims are not checked for adequacy; an empty set is signed as-is.
    pub fn create_token_pair_from_claims(&self, claims: &ClaimSet) -> DomainResult<TokenPair> {
        let now = Utc::now();
        let access_token = self.sign_at(claims, TokenKind::Access, now)?;
        let refresh_token = self.sign_at(claims, TokenKind::Refresh, now)?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    pub(crate) fn sign(&self, claims: &ClaimSet, kind: TokenKind) -> DomainResult<Token> {
        self.sign_at(claims, kind, Utc::now())
    }

    /// Signs `claims` as a token of `kind` issued at `now`
    ///
    /// `now` is truncated to whole seconds so that `expires_at` equals the
    /// `exp` claim exactly. Deterministic for a given instant.
    pub(crate) fn sign_at(
        &self,
        claims: &ClaimSet,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> DomainResult<Token> {
        let policy = self.policies.get(kind);
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at + policy.ttl;

        let registered = RegisteredClaims {
            iss: self.issuer.clone(),
            aud: policy.audience.clone(),
            nbf: issued_at.timestamp(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let payload = encode_payload(claims, &registered);

        let content = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(
                    kind = %kind,
                    error = %e,
                    event = "token_signing_failed",
                    "Failed to sign token"
                );
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        tracing::debug!(
            kind = %kind,
            audience = %policy.audience,
            claim_count = claims.len(),
            expires_at = %expires_at,
            event = "token_signed",
            "Signed token"
        );

        Ok(Token::new(content, expires_at))
    }
}

impl fmt::Debug for TokenFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenFactory")
            .field("issuer", &self.issuer)
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}
