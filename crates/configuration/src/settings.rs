use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section and field has a default, so an empty or missing
/// `config.toml` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub limits: LimitSettings,
    pub logging: LoggingSettings,
}

/// Where and how the HTTP API listens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound on request body size, in bytes.
    pub body_limit_bytes: usize,
}

/// Per-user quotas enforced by the chart store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_charts_per_user: usize,
    pub max_points_per_chart: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Settings {
    /// Checks the cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("server.host must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must not be 0".into()));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be at least 1".into(),
            ));
        }
        if self.limits.max_charts_per_user == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_charts_per_user must be at least 1".into(),
            ));
        }
        if self.limits.max_points_per_chart == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_points_per_chart must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// --- Default Implementations ---

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_charts_per_user: 50,
            max_points_per_chart: 10_000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
            file_prefix: "tally.log".to_string(),
        }
    }
}
