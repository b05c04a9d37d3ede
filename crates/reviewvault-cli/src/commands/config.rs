use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use review_archive_config::{Config, PathManager};
use serde_json::json;

pub async fn run_show(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let cache_path = config
        .cache
        .app_names_file
        .clone()
        .unwrap_or_else(|| paths.app_names_file());

    match output.format() {
        OutputFormat::Human => {
            if config_file.exists() {
                output.println(format!("Config file: {}", config_file.display()));
            } else {
                output.warn(format!(
                    "No config file at {}, showing defaults",
                    config_file.display()
                ));
            }
            output.println(format!(
                "steam.username: {}",
                config.steam.username.as_deref().unwrap_or("(not set)")
            ));
            output.println(format!(
                "archive.output_dir: {}",
                config
                    .archive
                    .output_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            ));
            output.println(format!("cache.app_names_file: {}", cache_path.display()));
            output.println(format!("cache.staleness_days: {}", config.cache.staleness_days));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "exists": config_file.exists(),
                "steam": {
                    "username": config.steam.username,
                },
                "archive": {
                    "output_dir": config.archive.output_dir,
                },
                "cache": {
                    "app_names_file": cache_path.display().to_string(),
                    "staleness_days": config.cache.staleness_days,
                },
            }));
        }
    }

    Ok(())
}
