//! Configuration types for image-search-dl

use crate::error::{Error, Result};
use crate::types::{Aspect, ImageColor, ImageContent, ImageSize, ImageType};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Default image search endpoint (Bing Image Search v7)
pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://api.cognitive.microsoft.com/bing/v7.0/images/search";

/// Default visual search endpoint (Bing Visual Search v7)
pub const DEFAULT_VISUAL_SEARCH_ENDPOINT: &str =
    "https://api.cognitive.microsoft.com/bing/v7.0/images/visualsearch";

/// Maximum number of results the search API returns for a single request
pub const BATCH_SIZE: usize = 150;

/// Browser-like user agent sent with anonymous image downloads
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/49.0.2623.110 Safari/537.36";

/// Remote API access (credentials and endpoints)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Subscription key for the image search API (required, non-empty)
    #[serde(default)]
    pub api_key: String,

    /// Subscription key for the visual search API (falls back to `api_key`)
    #[serde(default)]
    pub visual_search_api_key: Option<String>,

    /// Image search endpoint URL
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Visual search endpoint URL
    #[serde(default = "default_visual_search_endpoint")]
    pub visual_search_endpoint: String,

    /// Page size used to advance the pagination offset (default: 150)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            visual_search_api_key: None,
            search_endpoint: default_search_endpoint(),
            visual_search_endpoint: default_visual_search_endpoint(),
            batch_size: default_batch_size(),
        }
    }
}

/// Download behavior configuration (destination, timeouts, counts)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Destination directory for query downloads (default: "./downloads")
    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,

    /// Destination directory for visual search downloads (default: "./similar-downloads")
    #[serde(default = "default_similar_destination_dir")]
    pub similar_destination_dir: PathBuf,

    /// Timeout for a single image download (default: 5 seconds)
    ///
    /// Search and visual search requests are not bounded by this timeout.
    #[serde(default = "default_download_timeout", with = "duration_serde")]
    pub download_timeout: Duration,

    /// User agent for anonymous image downloads
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Images to download per query (default: 600)
    #[serde(default = "default_count")]
    pub count: usize,

    /// Download as many results as the API reports instead of `count`
    #[serde(default)]
    pub maximum_wanted: bool,

    /// Append the stock-photo exclusion clause to every query (default: true)
    #[serde(default = "default_true")]
    pub filter_stocks: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            destination_dir: default_destination_dir(),
            similar_destination_dir: default_similar_destination_dir(),
            download_timeout: default_download_timeout(),
            user_agent: default_user_agent(),
            count: default_count(),
            maximum_wanted: false,
            filter_stocks: true,
        }
    }
}

/// Search filters shared by every query of a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Image type (default: photo)
    #[serde(default)]
    pub image_type: ImageType,

    /// Image content (default: portrait)
    #[serde(default)]
    pub content: ImageContent,

    /// Image size class (default: large)
    #[serde(default)]
    pub size: ImageSize,

    /// Color filter (default: colorOnly)
    #[serde(default)]
    pub color: ImageColor,

    /// Aspect ratio filter (default: all)
    #[serde(default)]
    pub aspect: Aspect,

    /// Minimal image width in pixels (default: 1000)
    #[serde(default = "default_min_dimension")]
    pub min_width: u32,

    /// Minimal image height in pixels (default: 1000)
    #[serde(default = "default_min_dimension")]
    pub min_height: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            image_type: ImageType::default(),
            content: ImageContent::default(),
            size: ImageSize::default(),
            color: ImageColor::default(),
            aspect: Aspect::default(),
            min_width: default_min_dimension(),
            min_height: default_min_dimension(),
        }
    }
}

/// Main configuration for [`ImageDownloader`](crate::ImageDownloader)
///
/// Fields are organized into logical sub-configs:
/// - [`api`](ApiConfig): credentials, endpoints, page size
/// - [`download`](DownloadConfig): destination, timeout, counts
/// - [`filters`](SearchFilters): search filter template
///
/// `api` and `download` are flattened, so the serialized form has no nesting for them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Credentials and endpoints
    #[serde(flatten)]
    pub api: ApiConfig,

    /// Download behavior settings
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// Search filter template
    #[serde(default)]
    pub filters: SearchFilters,
}

impl Config {
    /// Create a config with the given API key and defaults for everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.api_key = api_key.into();
        config
    }

    /// Destination directory for query downloads
    pub fn destination_dir(&self) -> &PathBuf {
        &self.download.destination_dir
    }

    /// Key used for visual search requests
    pub fn visual_search_api_key(&self) -> &str {
        self.api
            .visual_search_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(&self.api.api_key)
    }

    /// Check the settings the downloader cannot run without
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the API key is empty, the batch size is zero,
    /// or an endpoint is not a valid URL.
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(Error::config("api_key", "API key must not be empty"));
        }
        if self.api.batch_size == 0 {
            return Err(Error::config(
                "batch_size",
                "batch size must be greater than zero",
            ));
        }
        for (key, endpoint) in [
            ("search_endpoint", &self.api.search_endpoint),
            ("visual_search_endpoint", &self.api.visual_search_endpoint),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| Error::config(key, format!("invalid endpoint '{endpoint}': {e}")))?;
        }
        Ok(())
    }
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_visual_search_endpoint() -> String {
    DEFAULT_VISUAL_SEARCH_ENDPOINT.to_string()
}

fn default_batch_size() -> usize {
    BATCH_SIZE
}

fn default_destination_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_similar_destination_dir() -> PathBuf {
    PathBuf::from("similar-downloads")
}

fn default_download_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_count() -> usize {
    600
}

fn default_min_dimension() -> u32 {
    1000
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (as whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
