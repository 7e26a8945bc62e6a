use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{LimitSettings, LoggingSettings, ServerSettings, Settings};

/// Prefix of the environment variables that override file settings,
/// e.g. `TALLY__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "TALLY";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (if it
/// exists), then `TALLY__*` environment variables. The merged result is
/// validated before it is returned.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    load_with_environment(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(
    path: &Path,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn no_env() -> config::Environment {
        environment().source(Some(Default::default()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            load_with_environment(&dir.path().join("absent.toml"), no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.limits.max_points_per_chart, 10_000);
    }

    #[test]
    fn file_overrides_defaults_per_field() {
        let file = write_toml(
            r#"
            [server]
            port = 8080

            [limits]
            max_charts_per_user = 5
            "#,
        );
        let settings = load_with_environment(file.path(), no_env()).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.limits.max_charts_per_user, 5);
        assert_eq!(settings.limits.max_points_per_chart, 10_000);
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_toml("[server]\nport = 8080\n");
        let env = environment().source(Some(
            [
                ("TALLY__SERVER__PORT".to_string(), "9090".to_string()),
                ("TALLY__LOGGING__FILTER".to_string(), "debug".to_string()),
            ]
            .into_iter()
            .collect(),
        ));
        let settings = load_with_environment(file.path(), env).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.logging.filter, "debug");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_toml("[limits]\nmax_points_per_chart = 0\n");
        let err = load_with_environment(file.path(), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn malformed_toml_is_a_load_error() {
        let file = write_toml("[server\nport = ");
        let err = load_with_environment(file.path(), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
