//! Test configuration helpers for loading .env credentials and creating test downloaders

use image_search_dl::{Config, ImageDownloader};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Page size used against the mock search API
pub const MOCK_BATCH_SIZE: usize = 4;

/// Config pointing both APIs at `server`, downloading into `temp_dir`
pub fn mock_config(server: &MockServer, temp_dir: &TempDir) -> Config {
    let mut config = Config::with_api_key("integration-key");
    config.api.search_endpoint = format!("{}/v7.0/images/search", server.uri());
    config.api.visual_search_endpoint = format!("{}/v7.0/images/visualsearch", server.uri());
    config.api.batch_size = MOCK_BATCH_SIZE;
    config.download.destination_dir = temp_dir.path().join("downloads");
    config.download.similar_destination_dir = temp_dir.path().join("similar-downloads");
    config.download.download_timeout = Duration::from_secs(2);
    config
}

/// Create a downloader against `server`
///
/// Returns the downloader and temp directory (keep temp_dir alive for test duration)
pub fn create_mock_downloader(
    server: &MockServer,
    customize: impl FnOnce(&mut Config),
) -> (ImageDownloader, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut config = mock_config(server, &temp_dir);
    customize(&mut config);
    let downloader = ImageDownloader::new(config).expect("failed to create downloader");
    (downloader, temp_dir)
}

/// Load the live search API key from the environment
///
/// Required environment variables:
/// - `IMAGE_SEARCH_API_KEY` - Subscription key for the search API
///
/// Optional environment variables:
/// - `IMAGE_VISUAL_SEARCH_API_KEY` - Separate key for visual search
pub fn load_live_config(temp_dir: &TempDir) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("IMAGE_SEARCH_API_KEY")
        .map_err(|_| ConfigError("IMAGE_SEARCH_API_KEY not set in environment".to_string()))?;

    let mut config = Config::with_api_key(api_key);
    config.api.visual_search_api_key = std::env::var("IMAGE_VISUAL_SEARCH_API_KEY").ok();
    config.download.destination_dir = temp_dir.path().join("downloads");
    config.download.similar_destination_dir = temp_dir.path().join("similar-downloads");
    Ok(config)
}

/// Check whether live credentials are available
pub fn has_live_credentials() -> bool {
    dotenvy::dotenv().ok();
    std::env::var("IMAGE_SEARCH_API_KEY").is_ok()
}
