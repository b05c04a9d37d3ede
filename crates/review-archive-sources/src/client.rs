use crate::applist::APP_LIST_URL;
use crate::error::SourceError;
use crate::traits::ReviewPageFetcher;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("reviewvault/", env!("CARGO_PKG_VERSION"));

/// Listing page URL for one page of a user's published reviews.
pub fn listing_url(username: &str, page: u32) -> String {
    format!(
        "https://steamcommunity.com/id/{}/recommended/?p={}",
        urlencoding::encode(username),
        page
    )
}

/// Store page URL for an app.
pub fn store_url(app_id: u32) -> String {
    format!("https://store.steampowered.com/app/{}", app_id)
}

/// Permalink to one user's review of an app.
pub fn review_url(username: &str, app_id: u32) -> String {
    format!(
        "https://steamcommunity.com/id/{}/recommended/{}/",
        urlencoding::encode(username),
        app_id
    )
}

/// HTTP client for everything Steam-facing.
///
/// Wraps a shared connection pool with a fixed per-request timeout; a timeout
/// is a terminal transport failure, never retried.
#[derive(Clone)]
pub struct SteamClient {
    client: Client,
}

impl SteamClient {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: String) -> Result<String, SourceError> {
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: response.status(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch an app's store page (used for fallback name lookups).
    pub async fn fetch_store_page(&self, app_id: u32) -> Result<String, SourceError> {
        self.get_text(store_url(app_id)).await
    }

    /// Fetch the bulk appid/name table as raw JSON.
    pub async fn fetch_app_list(&self) -> Result<String, SourceError> {
        self.get_text(APP_LIST_URL.to_string()).await
    }
}

#[async_trait]
impl ReviewPageFetcher for SteamClient {
    async fn fetch_listing_page(&self, username: &str, page: u32) -> Result<String, SourceError> {
        self.get_text(listing_url(username, page)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url("some_user", 3),
            "https://steamcommunity.com/id/some_user/recommended/?p=3"
        );
    }

    #[test]
    fn test_listing_url_encodes_username() {
        assert_eq!(
            listing_url("user name", 1),
            "https://steamcommunity.com/id/user%20name/recommended/?p=1"
        );
    }

    #[test]
    fn test_review_and_store_urls() {
        assert_eq!(store_url(570), "https://store.steampowered.com/app/570");
        assert_eq!(
            review_url("some_user", 570),
            "https://steamcommunity.com/id/some_user/recommended/570/"
        );
    }
}
