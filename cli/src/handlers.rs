//! Command handlers
//!
//! Each handler returns the JSON document `main` prints on stdout. Logs go to
//! stderr so the output stays machine-readable.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use idt_core::{
    ClaimSet, InMemoryIdentityLookup, RefreshCoordinator, TokenFactory, TokenValidator, User,
};
use idt_shared::TokenConfig;

use crate::commands::{Commands, InspectCommand, IssueCommand, RefreshCommand};

pub async fn execute(command: Commands, config: &TokenConfig) -> Result<Value> {
    match command {
        Commands::Issue(cmd) => handle_issue(cmd, config),
        Commands::Inspect(cmd) => handle_inspect(cmd, config),
        Commands::Refresh(cmd) => handle_refresh(cmd, config).await,
    }
}

fn handle_issue(cmd: IssueCommand, config: &TokenConfig) -> Result<Value> {
    let factory = TokenFactory::new(config).context("Failed to create token factory")?;

    let user = User::new(cmd.id, cmd.name);
    let claims = cmd
        .claims
        .into_iter()
        .fold(ClaimSet::for_user(&user), |claims, (claim_type, value)| {
            claims.with(claim_type, value)
        });

    let pair = factory.create_token_pair_from_claims(&claims)?;
    info!(user_id = %user.id, claim_count = claims.len(), "Issued token pair");

    Ok(serde_json::to_value(pair)?)
}

fn handle_inspect(cmd: InspectCommand, config: &TokenConfig) -> Result<Value> {
    let validator = TokenValidator::new(config).context("Failed to create token validator")?;
    let validated = validator
        .validate(&cmd.token, cmd.kind)
        .with_context(|| format!("Token is not a valid {} token", cmd.kind))?;

    Ok(serde_json::to_value(validated)?)
}

async fn handle_refresh(cmd: RefreshCommand, config: &TokenConfig) -> Result<Value> {
    let users = load_users(&cmd.users)?;
    info!(path = %cmd.users.display(), count = users.len(), "Loaded users");

    let factory = Arc::new(TokenFactory::new(config).context("Failed to create token factory")?);
    let validator = TokenValidator::new(config).context("Failed to create token validator")?;
    let lookup = Arc::new(InMemoryIdentityLookup::with_users(users));
    let coordinator = RefreshCoordinator::new(factory, lookup);

    match coordinator.refresh_with_token(&validator, &cmd.token).await {
        Ok(token) => Ok(serde_json::to_value(token)?),
        Err(e) if e.is_refresh_denied() => Err(anyhow::Error::new(e).context("Refresh denied")),
        Err(e) => Err(e.into()),
    }
}

fn load_users(path: &Path) -> Result<Vec<User>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read users file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse users file {}", path.display()))
}
