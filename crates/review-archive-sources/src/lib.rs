pub mod applist;
pub mod client;
pub mod error;
pub mod listing;
pub mod store;
pub mod traits;

pub use applist::{parse_app_list, APP_LIST_URL};
pub use client::{listing_url, review_url, store_url, SteamClient};
pub use error::SourceError;
pub use listing::{parse_listing_page, ParsedReview};
pub use store::StorePageLookup;
pub use traits::{NameLookup, ReviewPageFetcher};
