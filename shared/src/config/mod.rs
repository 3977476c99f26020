//! Configuration module
//!
//! - `token` - Token signing configuration (issuer, audiences, secret, TTLs)
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `config.<environment>.toml`, then `IDT_`-prefixed environment variables
//! using `__` as the nesting separator (`IDT_TOKEN__ISSUER`).

pub mod environment;
pub mod token;

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use token::{TokenConfig, MAX_TTL_MINUTES, MIN_SIGNING_SECRET_BYTES};

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "IDT";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token issuing configuration
    pub token: TokenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            token: TokenConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// `.env.<environment>` and `.env` are read first when present.
    pub fn load() -> ConfigResult<Self> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();
        Self::load_for(environment, None)
    }

    /// Load configuration for an explicit environment
    ///
    /// # Arguments
    ///
    /// * `environment` - Environment whose defaults and file are used
    /// * `file` - Configuration file overriding `environment.config_file()`
    ///
    /// The per-environment file is optional; an explicit `file` must exist.
    /// Production refuses to start with the development signing secret.
    pub fn load_for(environment: Environment, file: Option<&Path>) -> ConfigResult<Self> {
        let token = TokenConfig::default();
        let logging = LoggingConfig::for_environment(environment);
        let source = match file {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(PathBuf::from(environment.config_file())).required(false),
        };

        let config = Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("token.issuer", token.issuer)?
            .set_default("token.access_audience", token.access_audience)?
            .set_default("token.refresh_audience", token.refresh_audience)?
            .set_default("token.signing_secret", token.signing_secret)?
            .set_default("token.access_ttl_minutes", token.access_ttl_minutes)?
            .set_default("token.refresh_ttl_minutes", token.refresh_ttl_minutes)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format.as_str())?
            .set_default("logging.colored", logging.colored)?
            .set_default("logging.source_location", logging.source_location)?
            .add_source(source)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        if loaded.environment.is_production() && loaded.token.is_using_default_secret() {
            return Err(ConfigError::DefaultSigningSecret {
                environment: loaded.environment.to_string(),
            });
        }

        Ok(loaded)
    }
}
