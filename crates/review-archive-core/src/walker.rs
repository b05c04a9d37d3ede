use crate::resolver::NameResolver;
use anyhow::{Context, Result};
use review_archive_models::Review;
use review_archive_sources::{parse_listing_page, review_url, store_url, ReviewPageFetcher};
use tracing::info;

/// Walk a user's review listing page by page and assemble full records.
///
/// Pagination stops at the first page without review blocks; with `fetch_all`
/// off only page 1 is fetched. Any transport or parse failure aborts the walk
/// with whatever was collected discarded.
pub async fn walk(
    fetcher: &dyn ReviewPageFetcher,
    resolver: &NameResolver,
    username: &str,
    fetch_all: bool,
) -> Result<Vec<Review>> {
    let mut reviews = Vec::new();
    let mut page = 1u32;

    loop {
        info!("Fetching reviews page {}", page);
        let body = fetcher
            .fetch_listing_page(username, page)
            .await
            .with_context(|| format!("Failed to fetch reviews page {}", page))?;
        let blocks = parse_listing_page(&body)
            .with_context(|| format!("Failed to parse reviews page {}", page))?;

        if blocks.is_empty() {
            info!("No reviews on page {}, stopping pagination", page);
            break;
        }

        for block in blocks {
            let app_name = resolver.resolve(block.app_id).await?;
            reviews.push(Review {
                app_id: block.app_id,
                app_name,
                steam_link: store_url(block.app_id),
                review_link: review_url(username, block.app_id),
                content: block.content,
                posted_on: block.posted_on,
                edited_on: block.edited_on,
                total_playtime: block.total_playtime,
                playtime_at_review: block.playtime_at_review,
            });
        }

        if !fetch_all {
            break;
        }
        page += 1;
    }

    info!("Collected {} reviews for {}", reviews.len(), username);
    Ok(reviews)
}
