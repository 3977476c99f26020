//! Command line surface of `tokenctl`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use idt_core::TokenKind;
use idt_shared::Environment;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; defaults to `config.<environment>.toml`
    #[arg(long, global = true, env = "TOKENCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment whose defaults apply (development, staging, production)
    #[arg(long, global = true)]
    pub environment: Option<Environment>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue an access and refresh token pair
    Issue(IssueCommand),
    /// Validate a token and print its contents
    Inspect(InspectCommand),
    /// Exchange a refresh token for a new access token
    Refresh(RefreshCommand),
}

#[derive(clap::Args, Debug)]
pub struct IssueCommand {
    /// User identifier written as the `nameid` claim
    #[arg(long)]
    pub id: String,

    /// Display name written as the `unique_name` claim
    #[arg(long)]
    pub name: String,

    /// Additional claim as `type=value`; may be repeated
    #[arg(long = "claim", value_name = "TYPE=VALUE", value_parser = parse_claim)]
    pub claims: Vec<(String, String)>,
}

#[derive(clap::Args, Debug)]
pub struct InspectCommand {
    /// Compact JWT to validate
    pub token: String,

    /// Kind the token is validated as
    #[arg(long, default_value = "access")]
    pub kind: TokenKind,
}

#[derive(clap::Args, Debug)]
pub struct RefreshCommand {
    /// Refresh token previously issued with the same configuration
    pub token: String,

    /// JSON file holding the known users: `[{"id": "...", "userName": "..."}]`
    #[arg(long)]
    pub users: PathBuf,
}

fn parse_claim(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((claim_type, value)) if !claim_type.trim().is_empty() => {
            Ok((claim_type.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected TYPE=VALUE, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim() {
        assert_eq!(
            parse_claim("role=admin"),
            Ok(("role".to_string(), "admin".to_string()))
        );
        assert_eq!(
            parse_claim("scope=a=b"),
            Ok(("scope".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_claim("note="), Ok(("note".to_string(), String::new())));
        assert!(parse_claim("role").is_err());
        assert!(parse_claim("=admin").is_err());
    }

    #[test]
    fn test_issue_arguments() {
        let cli = Cli::try_parse_from([
            "tokenctl", "issue", "--id", "42", "--name", "alice", "--claim", "role=admin",
            "--claim", "role=auditor",
        ])
        .unwrap();

        let Commands::Issue(cmd) = cli.command else {
            panic!("expected issue command");
        };
        assert_eq!(cmd.id, "42");
        assert_eq!(cmd.name, "alice");
        assert_eq!(cmd.claims.len(), 2);
        assert_eq!(cmd.claims[1], ("role".to_string(), "auditor".to_string()));
    }

    #[test]
    fn test_inspect_kind_defaults_to_access() {
        let cli = Cli::try_parse_from(["tokenctl", "inspect", "abc"]).unwrap();
        let Commands::Inspect(cmd) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(cmd.kind, TokenKind::Access);

        let cli = Cli::try_parse_from(["tokenctl", "inspect", "abc", "--kind", "refresh"]).unwrap();
        let Commands::Inspect(cmd) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(cmd.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_global_environment_flag() {
        let cli = Cli::try_parse_from([
            "tokenctl", "refresh", "tok", "--users", "users.json", "--environment", "production",
        ])
        .unwrap();
        assert_eq!(cli.environment, Some(Environment::Production));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_refresh_requires_users() {
        assert!(Cli::try_parse_from(["tokenctl", "refresh", "tok"]).is_err());
    }
}
