use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub steam: SteamConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SteamConfig {
    /// Community profile name used when `fetch` runs without `--username`.
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Directory review files land in when `--output-dir` is not given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Overrides the default app name cache location.
    #[serde(default)]
    pub app_names_file: Option<PathBuf>,
    /// Age in days after which the cached app name table is re-downloaded.
    #[serde(default = "default_staleness_days")]
    pub staleness_days: u64,
}

fn default_staleness_days() -> u64 {
    7
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            app_names_file: None,
            staleness_days: default_staleness_days(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists. A missing file means the default
    /// configuration, not an error.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cache.staleness_days == 0 {
            return Err(anyhow::anyhow!("cache.staleness_days must be at least 1"));
        }
        Ok(())
    }

    /// Staleness threshold of the app name cache as a duration.
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache.staleness_days * 24 * 60 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            steam: SteamConfig {
                username: Some("some_user".to_string()),
            },
            archive: ArchiveConfig {
                output_dir: Some(PathBuf::from("/tmp/reviews")),
            },
            cache: CacheConfig {
                app_names_file: None,
                staleness_days: 3,
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.steam.username.as_deref(), Some("some_user"));
        assert_eq!(loaded.archive.output_dir, Some(PathBuf::from("/tmp/reviews")));
        assert_eq!(loaded.cache.staleness_days, 3);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_or_default(&path).unwrap();

        assert_eq!(config.steam.username, None);
        assert_eq!(config.archive.output_dir, None);
        assert_eq!(config.cache.staleness_days, 7);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[steam]\nusername = \"some_user\"\n").unwrap();

        assert_eq!(config.steam.username.as_deref(), Some("some_user"));
        assert_eq!(config.cache.app_names_file, None);
        assert_eq!(config.cache.staleness_days, 7);
    }

    #[test]
    fn test_validate_rejects_zero_staleness() {
        let config = Config {
            cache: CacheConfig {
                app_names_file: None,
                staleness_days: 0,
            },
            ..Config::default()
        };

        let result = config.validate();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("staleness_days"));
    }

    #[test]
    fn test_cache_max_age() {
        let config = Config::default();
        assert_eq!(config.cache_max_age(), Duration::from_secs(7 * 24 * 60 * 60));
    }
}
