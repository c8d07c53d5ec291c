//! Application configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `LOOTGEN_*` environment variables. Nested keys use a double underscore,
//! e.g. `LOOTGEN_EXPORT__TITLE`.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lootgen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LOOTGEN_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Export document settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// First line of the exported document
    pub title: String,
    /// File name prefix, followed by the export timestamp
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Shadowrun Loot Generator Results".to_string(),
            file_prefix: "shadowrun-loot".to_string(),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON table file; None = bundled tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables_path: Option<PathBuf>,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Tables selected when a session starts
    pub default_selection: Vec<String>,
    /// Fixed seed for reproducible rolls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables_path: None,
            export_dir: PathBuf::from("."),
            default_selection: vec!["goonpockets".to_string()],
            seed: None,
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// The provider stack, without extracting
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration. An explicitly named file must exist; the default
    /// file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match file {
            Some(path) if !path.exists() => return Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file)
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).expect("defaults load");
            assert_eq!(config, Config::default());
            assert_eq!(config.default_selection, vec!["goonpockets".to_string()]);
            assert_eq!(config.export.file_prefix, "shadowrun-loot");
            Ok(())
        });
    }

    #[test]
    fn test_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lootgen.toml",
                r#"
                tables_path = "tables.json"
                default_selection = ["weapons", "ammo"]
                seed = 99

                [export]
                title = "Run Loot"
                "#,
            )?;

            let config = Config::load(None).expect("file loads");
            assert_eq!(config.tables_path, Some(PathBuf::from("tables.json")));
            assert_eq!(config.default_selection, vec!["weapons", "ammo"]);
            assert_eq!(config.seed, Some(99));
            assert_eq!(config.export.title, "Run Loot");
            // Untouched nested field keeps its default
            assert_eq!(config.export.file_prefix, "shadowrun-loot");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "seed = 1\nexport_dir = \"out\"")?;
            jail.set_env("LOOTGEN_SEED", "7");
            jail.set_env("LOOTGEN_EXPORT__FILE_PREFIX", "loot");

            let config = Config::load(Some(Path::new("custom.toml"))).expect("loads");
            assert_eq!(config.seed, Some(7));
            assert_eq!(config.export_dir, PathBuf::from("out"));
            assert_eq!(config.export.file_prefix, "loot");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Missing(_)));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value() {
        Jail::expect_with(|jail| {
            jail.create_file("lootgen.toml", "seed = \"lots\"")?;
            let err = Config::load(None).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
