//! Process configuration
//!
//! All data-store connection parameters are supplied externally, from the
//! environment or from a JSON config file. Credentials carry no fallback
//! values: a missing variable fails startup before any listener is bound.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

/// Relational database connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

fn default_db_port() -> u16 {
    3306
}

impl DatabaseConfig {
    /// Load from `DB_HOST`, `DB_PORT` (optional), `DB_USER`, `DB_PASSWORD`,
    /// and `DB_NAME`.
    pub fn from_env() -> ConfigResult<Self> {
        let port = match std::env::var("DB_PORT") {
            Ok(raw) if !raw.is_empty() => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_PORT",
                value: raw,
            })?,
            _ => default_db_port(),
        };

        Ok(Self {
            host: require_env("DB_HOST")?,
            port,
            user: require_env("DB_USER")?,
            password: require_env("DB_PASSWORD")?,
            database: require_env("DB_NAME")?,
        })
    }
}

/// Document store parameters for intake form submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeStoreConfig {
    /// Table holding submitted intake forms
    pub table: String,
}

impl IntakeStoreConfig {
    /// Load from `INTAKE_TABLE`.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            table: require_env("INTAKE_TABLE")?,
        })
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub intake: IntakeStoreConfig,
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl AppConfig {
    /// Resolve the whole configuration from the environment.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            intake: IntakeStoreConfig::from_env()?,
            http: HttpServerConfig::from_env(),
        })
    }

    /// Load from a JSON config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Copy with the database password blanked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.database.password = "********".to_string();
        copy
    }
}

fn require_env(name: &'static str) -> ConfigResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "database": {{
                    "host": "db.internal",
                    "user": "svc",
                    "password": "secret",
                    "database": "care"
                }},
                "intake": {{ "table": "IntakeForms" }}
            }}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.intake.table, "IntakeForms");
    }

    #[test]
    fn test_from_file_rejects_missing_credentials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "database": {{ "host": "db.internal" }}, "intake": {{ "table": "t" }} }}"#
        )
        .unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_from_file_missing_file() {
        let result = AppConfig::from_file(Path::new("/nonexistent/carelink.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    // Environment access is process-global, so every env case lives in one
    // test to keep the suite parallel-safe.
    #[test]
    fn test_from_env_requires_every_credential() {
        for name in ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"] {
            std::env::remove_var(name);
        }

        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_HOST")));

        std::env::set_var("DB_HOST", "db.internal");
        std::env::set_var("DB_USER", "svc");
        std::env::set_var("DB_PASSWORD", "secret");
        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_NAME")));

        std::env::set_var("DB_NAME", "care");
        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3306);

        std::env::set_var("DB_PORT", "not-a-port");
        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DB_PORT", .. }));

        for name in ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_redacted_hides_password() {
        let config = AppConfig {
            database: DatabaseConfig {
                host: "db".into(),
                port: 3306,
                user: "svc".into(),
                password: "secret".into(),
                database: "care".into(),
            },
            intake: IntakeStoreConfig { table: "t".into() },
            http: HttpServerConfig::default(),
        };
        assert_eq!(config.redacted().database.password, "********");
        assert_eq!(config.database.password, "secret");
    }
}
