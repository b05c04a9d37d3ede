pub mod config;
pub mod paths;

pub use config::{ArchiveConfig, CacheConfig, Config, SteamConfig};
pub use paths::{base_path_override, PathManager};
