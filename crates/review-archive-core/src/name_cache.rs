use anyhow::{Context, Result};
use review_archive_models::AppEntry;
use review_archive_sources::{parse_app_list, SteamClient};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// On-disk snapshot of Steam's bulk appid/name table.
///
/// The file holds the raw JSON exactly as downloaded. Staleness is judged
/// by the file's modification time against `max_age`.
pub struct AppNameCache {
    path: PathBuf,
    max_age: Duration,
}

impl AppNameCache {
    pub fn new(path: PathBuf, max_age: Duration) -> Self {
        Self { path, max_age }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure a snapshot exists and is younger than `max_age`, downloading
    /// a fresh table otherwise. A failed download is fatal, not a fallback to
    /// the stale file.
    pub async fn ensure_fresh(&self, client: &SteamClient) -> Result<()> {
        let needs_refresh = match std::fs::metadata(&self.path) {
            Ok(metadata) => {
                let modified = metadata.modified().with_context(|| {
                    format!("Failed to read modification time of {}", self.path.display())
                })?;
                let stale = is_stale(modified, SystemTime::now(), self.max_age);
                if stale {
                    info!("App name cache at {} is stale, refreshing", self.path.display());
                }
                stale
            }
            Err(_) => {
                info!("No app name cache at {}, downloading", self.path.display());
                true
            }
        };

        if needs_refresh {
            self.refresh(client).await?;
        }
        Ok(())
    }

    /// Download the current table and replace the snapshot unconditionally.
    pub async fn refresh(&self, client: &SteamClient) -> Result<()> {
        let body = client
            .fetch_app_list()
            .await
            .context("Failed to download the Steam app list")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &body)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to move cache into {}", self.path.display()))?;

        info!(
            "Saved app name cache ({} bytes) to {}",
            body.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the cached table. A missing snapshot yields an empty table, not
    /// an error; resolution then leans on the fallback lookup instead.
    pub fn load(&self) -> Result<Vec<AppEntry>> {
        if !self.path.exists() {
            warn!(
                "App name cache missing at {}, continuing with an empty table",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read app name cache at {}", self.path.display()))?;
        let entries = parse_app_list(&data)
            .with_context(|| format!("Failed to parse app name cache at {}", self.path.display()))?;
        debug!("Loaded {} app names from cache", entries.len());
        Ok(entries)
    }

    /// Delete the snapshot. Returns whether a file was actually removed.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove app name cache at {}", self.path.display())
            })?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Whether a snapshot modified at `modified` has outlived `max_age` at `now`.
pub fn is_stale(modified: SystemTime, now: SystemTime, max_age: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age > max_age,
        // A modification time in the future counts as fresh.
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    fn app_list_json() -> &'static str {
        r#"{"applist":{"apps":[{"appid":570,"name":"Dota 2"},{"appid":440,"name":"Team Fortress 2"}]}}"#
    }

    #[test]
    fn test_is_stale_recent_file() {
        let now = SystemTime::now();
        let modified = now - Duration::from_secs(60);

        assert!(!is_stale(modified, now, WEEK));
    }

    #[test]
    fn test_is_stale_old_file() {
        let now = SystemTime::now();
        let modified = now - (WEEK + Duration::from_secs(1));

        assert!(is_stale(modified, now, WEEK));
    }

    #[test]
    fn test_is_stale_future_modification_time() {
        let now = SystemTime::now();
        let modified = now + Duration::from_secs(3600);

        assert!(!is_stale(modified, now, WEEK)); // clock skew
    }

    #[test]
    fn test_load_missing_file_returns_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AppNameCache::new(dir.path().join("appnames.json"), WEEK);

        let entries = cache.load().unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appnames.json");
        std::fs::write(&path, app_list_json()).unwrap();
        let cache = AppNameCache::new(path, WEEK);

        let entries = cache.load().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].appid, 570);
        assert_eq!(entries[0].name, "Dota 2");
    }

    #[test]
    fn test_load_rejects_malformed_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appnames.json");
        std::fs::write(&path, "not json").unwrap();
        let cache = AppNameCache::new(path, WEEK);

        let result = cache.load();

        assert!(result.is_err());
    }

    #[test]
    fn test_clear_removes_snapshot_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appnames.json");
        std::fs::write(&path, app_list_json()).unwrap();
        let cache = AppNameCache::new(path.clone(), WEEK);

        assert!(cache.clear().unwrap());
        assert!(!path.exists());
        assert!(!cache.clear().unwrap()); // already gone
    }
}
