use serde::{Deserialize, Serialize};

/// One entry of the bulk appid/name table published by Steam.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppEntry {
    pub appid: u32,
    pub name: String,
}
