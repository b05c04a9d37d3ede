use anyhow::Result;
use dirs;
use std::path::{Path, PathBuf};

/// Base path override from the environment, used in containers and tests.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REVIEWVAULT_BASE_PATH")
        .map(PathBuf::from)
        .ok()
}

pub struct PathManager {
    config_dir: PathBuf,
    cache_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reviewvault");
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join("reviewvault");

        Ok(Self {
            config_dir,
            cache_dir,
        })
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            cache_dir: base.join("cache"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default app name cache location; `cache.app_names_file` overrides it.
    pub fn app_names_file(&self) -> PathBuf {
        self.cache_dir.join("appnames.json")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g. ~/.config/reviewvault on Linux),
        // falling back to the working directory when the platform has none.
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".")))
    }
}
