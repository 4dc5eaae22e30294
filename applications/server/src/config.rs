/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_api")]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Mount point of every route, e.g. `/api/v1`
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// default file is not an error. Environment variables prefixed with
    /// `GRUNGE_` override file values, with `__` between section and key
    /// (`GRUNGE_SERVER__PORT=9000`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GRUNGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api.prefix.starts_with('/') || self.api.prefix.len() < 2 {
            return Err(ServerError::Config(format!(
                "API prefix must start with '/' and not be the root, got {:?}",
                self.api.prefix
            )));
        }

        if self.api.prefix.ends_with('/') {
            return Err(ServerError::Config(format!(
                "API prefix must not end with '/', got {:?}",
                self.api.prefix
            )));
        }

        if self.api.default_page_size < 1 || self.api.max_page_size < 1 {
            return Err(ServerError::Config(
                "Page sizes must be positive".to_string(),
            ));
        }

        if self.api.default_page_size > self.api.max_page_size {
            return Err(ServerError::Config(format!(
                "Default page size {} exceeds maximum {}",
                self.api.default_page_size, self.api.max_page_size
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/grunge.db".to_string()
}

fn default_api() -> ApiSettings {
    ApiSettings {
        prefix: default_prefix(),
        default_page_size: default_page_size(),
        max_page_size: default_max_page_size(),
    }
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_page_size() -> i64 {
    50
}

fn default_max_page_size() -> i64 {
    500
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            api: default_api(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.prefix, "/api/v1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn prefix_must_be_rooted() {
        let mut config = ServerConfig::default();
        config.api.prefix = "api".to_string();
        assert!(config.validate().is_err());

        config.api.prefix = "/api/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_page_size_cannot_exceed_max() {
        let mut config = ServerConfig::default();
        config.api.default_page_size = 1000;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grunge.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9191\n\n[api]\ndefault_page_size = 10"
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();

        assert_eq!(config.server.port, 9191);
        assert_eq!(config.api.default_page_size, 10);
        // Untouched keys keep their defaults
        assert_eq!(config.api.max_page_size, 500);
        assert_eq!(config.storage.database_url, "sqlite://./data/grunge.db");
    }
}
