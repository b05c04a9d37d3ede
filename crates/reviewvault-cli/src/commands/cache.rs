use crate::output::Output;
use color_eyre::Result;
use review_archive_config::{Config, PathManager};
use review_archive_core::AppNameCache;
use review_archive_sources::SteamClient;

pub async fn run_refresh(output: &Output) -> Result<()> {
    let cache = open_cache()?;
    let client = SteamClient::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?;

    cache
        .refresh(&client)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to refresh the app name cache: {}", e))?;

    let names = cache
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read back the app name cache: {}", e))?;
    output.success(format!(
        "Downloaded {} app names to {}",
        names.len(),
        cache.path().display()
    ));
    Ok(())
}

pub async fn run_clear(output: &Output) -> Result<()> {
    let cache = open_cache()?;

    let removed = cache
        .clear()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear the app name cache: {}", e))?;

    if removed {
        output.success(format!("Cleared app name cache: {}", cache.path().display()));
    } else {
        output.info("No app name cache found to clear");
    }
    Ok(())
}

fn open_cache() -> Result<AppNameCache> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to prepare directories: {}", e))?;

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let cache_path = config
        .cache
        .app_names_file
        .clone()
        .unwrap_or_else(|| paths.app_names_file());
    Ok(AppNameCache::new(cache_path, config.cache_max_age()))
}
