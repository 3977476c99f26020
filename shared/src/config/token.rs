//! Token signing configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

/// Minimum signing secret length in bytes (256 bits for HMAC-SHA256)
pub const MIN_SIGNING_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (10 years)
pub const MAX_TTL_MINUTES: i64 = 10 * 365 * 24 * 60;

const DEFAULT_SIGNING_SECRET: &str = "development-secret-please-change-in-production";

/// Token issuing configuration
///
/// Loaded once at startup and never mutated afterwards. Replacing the
/// signing secret means building a new `TokenConfig` and a new factory.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Issuer embedded in every token (`iss`)
    pub issuer: String,

    /// Audience of access tokens (`aud`)
    pub access_audience: String,

    /// Audience of refresh tokens, must differ from `access_audience`
    pub refresh_audience: String,

    /// HMAC-SHA256 key material (UTF-8 bytes of this string)
    pub signing_secret: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,

    /// Refresh token lifetime in minutes
    #[serde(default = "default_refresh_ttl_minutes")]
    pub refresh_ttl_minutes: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("identity-tokens"),
            access_audience: String::from("identity-tokens-api"),
            refresh_audience: String::from("identity-tokens-refresh"),
            signing_secret: String::from(DEFAULT_SIGNING_SECRET),
            access_ttl_minutes: default_access_ttl_minutes(),
            refresh_ttl_minutes: default_refresh_ttl_minutes(),
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with secret
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            ..Default::default()
        }
    }

    /// Set the issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the access and refresh audiences
    pub fn with_audiences(
        mut self,
        access_audience: impl Into<String>,
        refresh_audience: impl Into<String>,
    ) -> Self {
        self.access_audience = access_audience.into();
        self.refresh_audience = refresh_audience.into();
        self
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_ttl_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in minutes
    pub fn with_refresh_ttl_minutes(mut self, minutes: i64) -> Self {
        self.refresh_ttl_minutes = minutes;
        self
    }

    /// Signing key bytes
    pub fn signing_secret_bytes(&self) -> &[u8] {
        self.signing_secret.as_bytes()
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.signing_secret == DEFAULT_SIGNING_SECRET
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration can be used to sign tokens
    /// * `Err(ConfigError)` - The first problem found
    pub fn validate(&self) -> ConfigResult<()> {
        if self.signing_secret.is_empty() {
            return Err(ConfigError::MissingSigningSecret);
        }
        if self.signing_secret.len() < MIN_SIGNING_SECRET_BYTES {
            return Err(ConfigError::WeakSigningSecret {
                actual: self.signing_secret.len(),
                minimum: MIN_SIGNING_SECRET_BYTES,
            });
        }

        for (field, value) in [
            ("access_ttl_minutes", self.access_ttl_minutes),
            ("refresh_ttl_minutes", self.refresh_ttl_minutes),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveTtl {
                    field: field.to_string(),
                    value,
                });
            }
            if value > MAX_TTL_MINUTES {
                return Err(ConfigError::TtlTooLong {
                    field: field.to_string(),
                    value,
                    maximum: MAX_TTL_MINUTES,
                });
            }
        }

        for (field, value) in [
            ("issuer", &self.issuer),
            ("access_audience", &self.access_audience),
            ("refresh_audience", &self.refresh_audience),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    field: field.to_string(),
                });
            }
        }

        if self.access_audience == self.refresh_audience {
            return Err(ConfigError::AudienceCollision {
                audience: self.access_audience.clone(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("issuer", &self.issuer)
            .field("access_audience", &self.access_audience)
            .field("refresh_audience", &self.refresh_audience)
            .field("signing_secret", &"<redacted>")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_minutes", &self.refresh_ttl_minutes)
            .finish()
    }
}

fn default_access_ttl_minutes() -> i64 {
    15
}

fn default_refresh_ttl_minutes() -> i64 {
    7 * 24 * 60 // 7 days
}
