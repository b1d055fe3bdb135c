use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://milhas.app/";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    pub sharing: SharingConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Defaults to the platform's local data directory
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SharingConfig {
    /// Page that share links point at; the token goes in its `workspace` query parameter
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Start with LATAM, GOL and Azul when no airlines are stored yet
    pub seed_defaults: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("milhas"))
                .unwrap_or_else(|| PathBuf::from(".milhas")),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None)
    }

    /// Layers, lowest first: built-in defaults, `config/default`, `config/{RUN_MODE}`,
    /// `config/local`, the explicit file if given, then `MILHAS__SECTION__KEY` variables.
    pub fn load_with(explicit: Option<&Path>) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            .set_default("sharing.base_url", DEFAULT_BASE_URL)?
            .set_default("catalog.seed_defaults", true)?
            .set_default("logging.filter", "warn")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path));
        }

        builder
            .add_source(config::Environment::with_prefix("MILHAS").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("milhas.toml");
        fs::write(
            &path,
            r#"
            [storage]
            data_dir = "/tmp/milhas-test"

            [sharing]
            base_url = "https://example.com/planner"

            [catalog]
            seed_defaults = false
            "#,
        )
        .unwrap();

        let config = Config::load_with(Some(path.as_path())).unwrap();
        assert_eq!(config.sharing.base_url, "https://example.com/planner");
        assert!(!config.catalog.seed_defaults);
        assert_eq!(
            config.storage.resolved_data_dir(),
            PathBuf::from("/tmp/milhas-test")
        );
        assert!(!config.logging.filter.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_with(Some(dir.path().join("absent.toml").as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_data_dir_ends_in_app_name() {
        let storage = StorageConfig::default();
        assert!(storage.resolved_data_dir().ends_with("milhas")
            || storage.resolved_data_dir().ends_with(".milhas"));
    }
}
