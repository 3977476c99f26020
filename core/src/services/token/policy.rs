//! Per-kind audience and lifetime table

use chrono::Duration;
use idt_shared::TokenConfig;

use crate::domain::entities::token::TokenKind;

/// Audience and lifetime applied to one kind of token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindPolicy {
    pub audience: String,
    pub ttl: Duration,
}

/// Lookup table from [`TokenKind`] to its [`KindPolicy`]
///
/// Built once from a validated [`TokenConfig`]; indexed by `TokenKind::index`.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    policies: [KindPolicy; TokenKind::ALL.len()],
}

impl PolicyTable {
    /// Builds the table. `config` must already have passed `validate()`.
    pub fn from_config(config: &TokenConfig) -> Self {
        let policies = TokenKind::ALL.map(|kind| match kind {
            TokenKind::Access => KindPolicy {
                audience: config.access_audience.clone(),
                ttl: Duration::minutes(config.access_ttl_minutes),
            },
            TokenKind::Refresh => KindPolicy {
                audience: config.refresh_audience.clone(),
                ttl: Duration::minutes(config.refresh_ttl_minutes),
            },
        });
        Self { policies }
    }

    pub fn get(&self, kind: TokenKind) -> &KindPolicy {
        &self.policies[kind.index()]
    }
}
