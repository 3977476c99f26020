//! Token entities for JWT-based authentication.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kind of token, deciding its audience and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token presented to resource servers
    Access,
    /// Longer-lived token only accepted by the refresh path
    Refresh,
}

impl TokenKind {
    /// Every kind, in table order
    pub const ALL: [TokenKind; 2] = [TokenKind::Access, TokenKind::Refresh];

    /// Position of this kind in per-kind lookup tables
    pub const fn index(self) -> usize {
        match self {
            TokenKind::Access => 0,
            TokenKind::Refresh => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            _ => Err(format!("Invalid token kind: {}", s)),
        }
    }
}

/// Lifecycle state of an issued token
///
/// There is no revoked state: expiry is the only way a token stops being
/// accepted, and verifiers enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Valid,
    Expired,
}

/// A signed token and its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Compact signed token
    #[serde(rename = "token")]
    content: String,

    /// Expiration timestamp (whole seconds, same as the `exp` claim)
    expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(content: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            content,
            expires_at,
        }
    }

    /// The compact signed token string
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// State of the token at the given instant
    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        if now >= self.expires_at {
            TokenState::Expired
        } else {
            TokenState::Valid
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        self.state_at(Utc::now()) == TokenState::Expired
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Access and refresh tokens issued together at authentication time
///
/// The two tokens carry the same claims but are otherwise independent; nothing
/// links one to the other after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: Token,
    pub refresh_token: Token,
}

impl TokenPair {
    pub fn new(access_token: Token, refresh_token: Token) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
