use crate::error::SourceError;
use review_archive_models::AppEntry;
use serde::Deserialize;

/// Bulk table of every app known to Steam, roughly 200k entries of
/// `{"appid": ..., "name": ...}`.
pub const APP_LIST_URL: &str =
    "https://api.steampowered.com/ISteamApps/GetAppList/v0002/?format=json";

#[derive(Debug, Deserialize)]
struct AppListResponse {
    applist: AppList,
}

#[derive(Debug, Deserialize)]
struct AppList {
    apps: Vec<AppEntry>,
}

/// Parse the raw JSON body of the bulk app list endpoint.
pub fn parse_app_list(json: &str) -> Result<Vec<AppEntry>, SourceError> {
    let response: AppListResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::Parse(format!("malformed app list: {}", e)))?;
    Ok(response.applist.apps)
}
