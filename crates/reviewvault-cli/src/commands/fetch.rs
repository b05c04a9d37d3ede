use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use review_archive_config::{Config, PathManager};
use review_archive_core::{format_review, walk, write_review, AppNameCache, NameResolver};
use review_archive_models::Review;
use review_archive_sources::{SteamClient, StorePageLookup};
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run_fetch(
    username: Option<String>,
    all: bool,
    save: bool,
    output_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to prepare directories: {}", e))?;

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {}", e))?;

    let username = username.or(config.steam.username.clone()).ok_or_else(|| {
        color_eyre::eyre::eyre!(
            "No username given. Pass --username or set steam.username in {}",
            config_file.display()
        )
    })?;

    let client = SteamClient::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?;

    let cache_path = config
        .cache
        .app_names_file
        .clone()
        .unwrap_or_else(|| paths.app_names_file());
    let cache = AppNameCache::new(cache_path, config.cache_max_age());
    cache
        .ensure_fresh(&client)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to refresh the app name cache: {}", e))?;
    let names = cache
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load the app name cache: {}", e))?;
    let resolver = NameResolver::new(names, Box::new(StorePageLookup::new(client.clone())));

    info!("Archiving Steam reviews for {}", username);
    let reviews = walk(&client, &resolver, &username, all)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch reviews for {}: {}", username, e))?;

    if reviews.is_empty() {
        output.warn(format!("No reviews found for {}", username));
        return Ok(());
    }

    if save {
        let dir = output_dir
            .or(config.archive.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        save_reviews(&reviews, &dir, output)
    } else {
        print_reviews(&reviews, output)
    }
}

fn save_reviews(reviews: &[Review], dir: &Path, output: &Output) -> Result<()> {
    for review in reviews {
        write_review(review, dir).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to save review {}: {}", review.app_id, e)
        })?;
    }
    output.success(format!(
        "Saved {} review(s) to {}",
        reviews.len(),
        dir.display()
    ));
    Ok(())
}

fn print_reviews(reviews: &[Review], output: &Output) -> Result<()> {
    match output.format() {
        OutputFormat::Human => {
            for review in reviews {
                output.println(format_review(review));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let data = serde_json::to_value(reviews)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize reviews: {}", e))?;
            output.json(&data);
        }
    }
    Ok(())
}
