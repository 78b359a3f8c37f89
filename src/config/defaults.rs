use super::{ApiConfig, BrowseConfig, Config, InputConfig, PathsConfig, PlayerConfig};

pub const BASE_URL: &str = crate::archive::ArchiveClient::DEFAULT_BASE_URL;
pub const TIMEOUT_SECS: u64 = 15;
pub const FEATURED_COLLECTION: &str = "TV-FOXNEWSW";

/// Config written on first run.
pub fn defaults() -> Config {
    Config {
        api: ApiConfig::default(),
        input: InputConfig::default(),
        browse: BrowseConfig::default(),
        player: PlayerConfig::default(),
        paths: PathsConfig::default(),
    }
}
