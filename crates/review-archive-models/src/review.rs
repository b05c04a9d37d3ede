use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub app_id: u32,
    pub app_name: String, // "unknown" when no resolution path produced a name
    pub steam_link: String,
    pub review_link: String,
    pub content: String, // review body, converted to Markdown
    pub posted_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_on: Option<NaiveDate>, // only set when the edit date differs from the posted date
    pub total_playtime: String, // hours figure kept verbatim, e.g. "1,402.9"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_at_review: Option<String>,
}
