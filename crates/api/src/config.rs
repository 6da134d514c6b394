use std::path::PathBuf;
use std::str::FromStr;

/// Which overlay store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// In-process store; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                var: "OVERLAY_STORE",
                reason: format!("unknown store '{other}', expected 'postgres' or 'memory'"),
            }),
        }
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection string.
    pub database_url: String,
    /// Overrides the database named in `database_url`.
    pub database_name: Option<String>,
    /// Overlay store implementation.
    pub store: StoreBackend,
    /// Directory the media pipeline writes the playlist and segments into.
    pub streams_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `127.0.0.1`                               |
    /// | `PORT`                 | `5000`                                    |
    /// | `CORS_ORIGINS`         | `*`                                       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `DATABASE_URL`         | `postgres://localhost:5432/rtsp_overlay`  |
    /// | `DB_NAME`              | unset                                     |
    /// | `OVERLAY_STORE`        | `postgres`                                |
    /// | `STREAMS_DIR`          | `streams`                                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "127.0.0.1");

        let port = var("PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                reason: e.to_string(),
            })?;

        let database_url = var("DATABASE_URL", "postgres://localhost:5432/rtsp_overlay");
        let database_name = lookup("DB_NAME").filter(|s| !s.trim().is_empty());
        let store = var("OVERLAY_STORE", "postgres").parse::<StoreBackend>()?;
        let streams_dir = PathBuf::from(var("STREAMS_DIR", "streams"));

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            database_name,
            store,
            streams_dir,
        })
    }

    /// Whether every origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert!(config.allows_any_origin());
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.streams_dir, PathBuf::from("streams"));
        assert!(config.database_name.is_none());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("OVERLAY_STORE", "Memory"),
            ("DB_NAME", "overlays_dev"),
            ("STREAMS_DIR", "/var/hls"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.allows_any_origin());
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.database_name.as_deref(), Some("overlays_dev"));
        assert_eq!(config.streams_dir, PathBuf::from("/var/hls"));
    }

    #[test]
    fn invalid_values_are_reported() {
        assert_matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("OVERLAY_STORE", "mongo")]),
            Err(ConfigError::Invalid {
                var: "OVERLAY_STORE",
                ..
            })
        );
    }
}
