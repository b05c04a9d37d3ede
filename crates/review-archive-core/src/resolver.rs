use anyhow::Result;
use review_archive_models::AppEntry;
use review_archive_sources::NameLookup;
use tracing::{debug, warn};

/// Placeholder for apps no resolution path could put a name to.
pub const UNKNOWN_NAME: &str = "unknown";

/// Resolves app ids to display names.
///
/// Lookups scan the bulk table first; ids missing from it go through the
/// fallback strategy exactly once. A name that simply does not exist is
/// answered with [`UNKNOWN_NAME`], while a failing fallback request is an
/// error.
pub struct NameResolver {
    entries: Vec<AppEntry>,
    fallback: Box<dyn NameLookup>,
}

impl NameResolver {
    pub fn new(entries: Vec<AppEntry>, fallback: Box<dyn NameLookup>) -> Self {
        Self { entries, fallback }
    }

    pub async fn resolve(&self, app_id: u32) -> Result<String> {
        if let Some(entry) = self.entries.iter().find(|entry| entry.appid == app_id) {
            debug!("App {} resolved from the cached table: {}", app_id, entry.name);
            return Ok(entry.name.clone());
        }

        debug!("App {} not in the cached table, asking the fallback", app_id);
        match self.fallback.lookup_name(app_id).await? {
            Some(name) => Ok(name),
            None => {
                warn!("No name found for app {}, recording it as \"{}\"", app_id, UNKNOWN_NAME);
                Ok(UNKNOWN_NAME.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use review_archive_sources::SourceError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedLookup {
        name: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl NameLookup for FixedLookup {
        async fn lookup_name(&self, _app_id: u32) -> Result<Option<String>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.name.clone())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl NameLookup for FailingLookup {
        async fn lookup_name(&self, _app_id: u32) -> Result<Option<String>, SourceError> {
            Err(SourceError::Parse("lookup failed".to_string()))
        }
    }

    fn table() -> Vec<AppEntry> {
        vec![
            AppEntry {
                appid: 570,
                name: "Dota 2".to_string(),
            },
            AppEntry {
                appid: 440,
                name: "Team Fortress 2".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_cached_id_never_touches_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = NameResolver::new(
            table(),
            Box::new(FixedLookup {
                name: Some("ignored".to_string()),
                calls: calls.clone(),
            }),
        );

        let name = resolver.resolve(570).await.unwrap();

        assert_eq!(name, "Dota 2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_uncached_id_asks_fallback_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = NameResolver::new(
            table(),
            Box::new(FixedLookup {
                name: Some("Black Mesa".to_string()),
                calls: calls.clone(),
            }),
        );

        let name = resolver.resolve(362890).await.unwrap();

        assert_eq!(name, "Black Mesa");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unnamed_app_gets_the_placeholder() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = NameResolver::new(
            Vec::new(),
            Box::new(FixedLookup {
                name: None,
                calls: calls.clone(),
            }),
        );

        let name = resolver.resolve(99999).await.unwrap();

        assert_eq!(name, UNKNOWN_NAME);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_error_propagates() {
        let resolver = NameResolver::new(Vec::new(), Box::new(FailingLookup));

        let result = resolver.resolve(99999).await;

        assert!(result.unwrap_err().to_string().contains("lookup failed"));
    }
}
