use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config_validator::ConfigValidator;
use crate::error::ConfigError;

/// Chirpy service configuration.
///
/// Every option can be given on the command line or through the environment
/// (a `.env` file is loaded first by the binary).
#[derive(Debug, Clone, Parser)]
#[command(name = "chirpy", version, about, long_about = None)]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory served under /app
    #[arg(long, env = "FILEPATH_ROOT", default_value = ".")]
    pub filepath_root: PathBuf,

    /// JSON file holding the chirps
    #[arg(long, env = "DATABASE_PATH", default_value = "database.json")]
    pub database_path: PathBuf,

    /// Default tracing level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            filepath_root: PathBuf::from("."),
            database_path: PathBuf::from("database.json"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse from the process arguments and environment, then validate
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate_server_config(&self.host, self.port)?;
        ConfigValidator::validate_database_path(&self.database_path)?;
        ConfigValidator::validate_filepath_root(&self.filepath_root)?;
        ConfigValidator::validate_log_level(&self.log_level)?;
        Ok(())
    }

    /// Resolve `host:port` to a socket address; host names such as
    /// `localhost` go through the system resolver
    pub async fn resolve_bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::Invalid(format!("Invalid bind address '{}:{}'", self.host, self.port));

        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }
}
