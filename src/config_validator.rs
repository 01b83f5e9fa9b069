use std::path::Path;

use crate::error::ConfigError;

/// Validates configuration values before the server starts
pub struct ConfigValidator;

impl ConfigValidator {
    const LOG_LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// Validates server listen parameters
    pub fn validate_server_config(host: &str, port: u16) -> Result<(), ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::Invalid("Server host cannot be empty".to_string()));
        }

        if port == 0 {
            return Err(ConfigError::Invalid(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_database_path(path: &Path) -> Result<(), ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("Database path cannot be empty".to_string()));
        }

        if path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "Database path '{}' is a directory",
                path.display()
            )));
        }

        Ok(())
    }

    /// The static root must be an existing directory
    pub fn validate_filepath_root(path: &Path) -> Result<(), ConfigError> {
        if !path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "Filepath root '{}' is not a directory",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
        if !Self::LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                level,
                Self::LOG_LEVELS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_server_config() {
        assert!(ConfigValidator::validate_server_config("127.0.0.1", 8080).is_ok());
    }

    #[test]
    fn test_invalid_server_config() {
        assert!(ConfigValidator::validate_server_config("", 8080).is_err());
        assert!(ConfigValidator::validate_server_config("127.0.0.1", 0).is_err());
    }

    #[test]
    fn test_database_path() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ConfigValidator::validate_database_path(&dir.path().join("db.json")).is_ok());
        assert!(ConfigValidator::validate_database_path(dir.path()).is_err());
        assert!(ConfigValidator::validate_database_path(Path::new("")).is_err());
    }

    #[test]
    fn test_filepath_root() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ConfigValidator::validate_filepath_root(dir.path()).is_ok());
        assert!(ConfigValidator::validate_filepath_root(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_log_level() {
        assert!(ConfigValidator::validate_log_level("debug").is_ok());
        assert!(ConfigValidator::validate_log_level("WARN").is_ok());
        assert!(ConfigValidator::validate_log_level("loud").is_err());
    }
}
