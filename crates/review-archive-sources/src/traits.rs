use crate::error::SourceError;
use async_trait::async_trait;

/// Fetches one page of a user's review listing.
///
/// The pagination walker only depends on this seam, so listing pages can be
/// served from canned fixtures in tests.
#[async_trait]
pub trait ReviewPageFetcher: Send + Sync {
    async fn fetch_listing_page(&self, username: &str, page: u32) -> Result<String, SourceError>;
}

/// Resolves an app id to a display name when the bulk table has no entry.
///
/// `Ok(None)` means the strategy ran but found no name; transport failures
/// propagate as errors.
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn lookup_name(&self, app_id: u32) -> Result<Option<String>, SourceError>;
}
