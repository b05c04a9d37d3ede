use crate::client::SteamClient;
use crate::error::SourceError;
use crate::traits::NameLookup;
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

/// Fallback name strategy: fetch the app's store page and scrape the name
/// header out of it.
pub struct StorePageLookup {
    client: SteamClient,
}

impl StorePageLookup {
    pub fn new(client: SteamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NameLookup for StorePageLookup {
    async fn lookup_name(&self, app_id: u32) -> Result<Option<String>, SourceError> {
        debug!("Looking up app {} on its store page", app_id);
        let body = self.client.fetch_store_page(app_id).await?;
        Ok(extract_app_name(&body))
    }
}

/// Pull the app name out of a store page, if the page carries one.
///
/// Delisted apps and redirects produce pages without the name header; that
/// is a `None`, not an error.
pub fn extract_app_name(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let name = Selector::parse("div#appHubAppName_responsive").unwrap();

    document
        .select(&name)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_app_name() {
        let html = "<html><body><div class=\"apphub_HomeHeader\">\
                    <div id=\"appHubAppName_responsive\" class=\"apphub_AppName\">Dota 2</div>\
                    </div></body></html>";
        assert_eq!(extract_app_name(html), Some("Dota 2".to_string()));
    }

    #[test]
    fn test_extract_app_name_missing() {
        let html = "<html><body><h1>Welcome to Steam</h1></body></html>";
        assert_eq!(extract_app_name(html), None);
    }
}
