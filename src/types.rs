//! Core types for image-search-dl

use crate::config::SearchFilters;
use crate::error::{Error, Result, SkipReason};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parse a wire value (e.g. `"animatedGif"`) into one of the filter enums
fn parse_wire<'de, T: Deserialize<'de>>(value: &'de str, key: &str) -> Result<T> {
    let de: serde::de::value::StrDeserializer<'de, serde::de::value::Error> =
        value.into_deserializer();
    T::deserialize(de).map_err(|e| Error::config(key, format!("unknown value '{value}': {e}")))
}

/// Image type (category)
///
/// Drives both the search filter and the local color-mode/extension decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    /// Photographs (default)
    #[default]
    #[serde(rename = "photo")]
    Photo,
    /// Clip art
    #[serde(rename = "clipart")]
    Clipart,
    /// Line drawings
    #[serde(rename = "line")]
    LineArt,
    /// Images with transparent background
    #[serde(rename = "transparent")]
    Transparent,
    /// Shopping results
    #[serde(rename = "shopping")]
    Shopping,
    /// Animated GIFs
    #[serde(rename = "animatedGif")]
    AnimatedGif,
    /// Animated GIFs served over HTTPS
    #[serde(rename = "animatedGifHttps")]
    AnimatedGifSecure,
    /// No type filter
    #[serde(rename = "all")]
    All,
}

impl ImageType {
    /// Every variant, in declaration order
    pub const ALL: [ImageType; 8] = [
        ImageType::Photo,
        ImageType::Clipart,
        ImageType::LineArt,
        ImageType::Transparent,
        ImageType::Shopping,
        ImageType::AnimatedGif,
        ImageType::AnimatedGifSecure,
        ImageType::All,
    ];

    /// Value sent to the search API
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Photo => "photo",
            ImageType::Clipart => "clipart",
            ImageType::LineArt => "line",
            ImageType::Transparent => "transparent",
            ImageType::Shopping => "shopping",
            ImageType::AnimatedGif => "animatedGif",
            ImageType::AnimatedGifSecure => "animatedGifHttps",
            ImageType::All => "all",
        }
    }

    /// Category saved as PNG when the URL carries no extension
    pub fn is_png(&self) -> bool {
        matches!(self, ImageType::Transparent)
    }

    /// Either animated GIF variant
    pub fn is_gif(&self) -> bool {
        matches!(self, ImageType::AnimatedGif | ImageType::AnimatedGifSecure)
    }

    /// Whether normalized output keeps an alpha channel
    pub fn keeps_alpha(&self) -> bool {
        self.is_png() || self.is_gif()
    }

    /// Extension used when the source URL has none
    pub fn default_extension(&self) -> &'static str {
        if self.is_png() {
            ".png"
        } else if self.is_gif() {
            ".gif"
        } else {
            ".jpg"
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, ImageType::All)
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wire(s, "image_type")
    }
}

/// Image content filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageContent {
    /// Faces only
    Face,
    /// Head and shoulders (default)
    #[default]
    Portrait,
    /// No content filter
    Any,
}

impl ImageContent {
    fn is_any(&self) -> bool {
        matches!(self, ImageContent::Any)
    }
}

impl std::str::FromStr for ImageContent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wire(s, "content")
    }
}

/// Image size class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSize {
    /// Large images (default)
    #[default]
    Large,
    /// Medium images
    Medium,
    /// Small images
    Small,
    /// Wallpaper-sized images
    Wallpaper,
    /// No size filter
    All,
}

impl std::str::FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wire(s, "size")
    }
}

/// Color filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageColor {
    /// Color images only (default)
    #[default]
    ColorOnly,
    /// Black and white images only
    Monochrome,
    /// No color filter
    All,
}

impl ImageColor {
    fn is_all(&self) -> bool {
        matches!(self, ImageColor::All)
    }
}

impl std::str::FromStr for ImageColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wire(s, "color")
    }
}

/// Aspect ratio filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aspect {
    /// Square images
    Square,
    /// Wide images
    Wide,
    /// Tall images
    Tall,
    /// No aspect filter (default)
    #[default]
    All,
}

impl Aspect {
    fn is_all(&self) -> bool {
        matches!(self, Aspect::All)
    }
}

impl std::str::FromStr for Aspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wire(s, "aspect")
    }
}

/// Query parameters for one search request
///
/// Serialized directly into the request query string. Filters set to their
/// "all"/"any" value are left out of the request. `offset` is the only field that
/// changes while paging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text query, including the stock exclusion clause when enabled
    #[serde(rename = "q")]
    pub query: String,
    /// Requested number of results
    pub count: usize,
    /// Pagination offset (unset for the first page)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Minimal image height
    pub min_height: u32,
    /// Minimal image width
    pub min_width: u32,
    /// Size class
    pub size: ImageSize,
    /// Image type filter
    #[serde(skip_serializing_if = "ImageType::is_all")]
    pub image_type: ImageType,
    /// Content filter
    #[serde(skip_serializing_if = "ImageContent::is_any")]
    pub image_content: ImageContent,
    /// Color filter
    #[serde(skip_serializing_if = "ImageColor::is_all")]
    pub color: ImageColor,
    /// Aspect filter
    #[serde(skip_serializing_if = "Aspect::is_all")]
    pub aspect: Aspect,
}

impl SearchParams {
    /// Build parameters for `query` from the shared filter template
    pub fn new(query: impl Into<String>, count: usize, filters: &SearchFilters) -> Self {
        Self {
            query: query.into(),
            count,
            offset: None,
            min_height: filters.min_height,
            min_width: filters.min_width,
            size: filters.size,
            image_type: filters.image_type,
            image_content: filters.content,
            color: filters.color,
            aspect: filters.aspect,
        }
    }
}

/// One image descriptor from a search response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Direct URL of the full-size image
    #[serde(default)]
    pub content_url: Option<String>,
}

/// Search API response for one page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Estimated number of matches across all pages
    #[serde(default)]
    pub total_estimated_matches: u64,
    /// Results on this page, in ranking order
    #[serde(default)]
    pub value: Vec<ImageDescriptor>,
}

impl SearchPage {
    /// Content URLs on this page, in order; descriptors without one are ignored
    pub fn content_urls(&self) -> Vec<String> {
        self.value
            .iter()
            .filter_map(|img| img.content_url.clone())
            .collect()
    }
}

/// Result of fetching and saving one image
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Image was normalized and written to `path`
    Saved {
        /// Source URL
        url: String,
        /// File written
        path: PathBuf,
    },
    /// Image was skipped; the batch carries on
    Skipped {
        /// Source URL
        url: String,
        /// Why it was skipped
        reason: SkipReason,
    },
}

impl FetchOutcome {
    /// True if a file was written
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// Aggregated outcome of one query (or one visual search reference)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryReport {
    /// Query text as given by the caller (without the stock exclusion clause)
    pub query: String,
    /// Number of URLs the search returned
    pub urls_found: usize,
    /// Files written, in index order
    pub saved: Vec<PathBuf>,
    /// Skipped URLs with their reasons, in index order
    pub skipped: Vec<(String, SkipReason)>,
}

impl QueryReport {
    /// Empty report for `query`
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Fold one fetch outcome into the report
    pub fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Saved { path, .. } => self.saved.push(path),
            FetchOutcome::Skipped { url, reason } => self.skipped.push((url, reason)),
        }
    }
}

/// Aggregated outcome of a whole batch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One report per query, in processing order
    pub queries: Vec<QueryReport>,
}

impl BatchReport {
    /// Total files written across all queries
    pub fn total_saved(&self) -> usize {
        self.queries.iter().map(|q| q.saved.len()).sum()
    }

    /// Total URLs skipped across all queries
    pub fn total_skipped(&self) -> usize {
        self.queries.iter().map(|q| q.skipped.len()).sum()
    }
}

/// Event emitted while a batch runs
///
/// Subscribe with [`ImageDownloader::subscribe`](crate::ImageDownloader::subscribe) to
/// drive a progress display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Search for a query started
    QueryStarted {
        /// Query text
        query: String,
    },

    /// Search finished and URLs are about to be fetched
    UrlsCollected {
        /// Query text
        query: String,
        /// Number of URLs to fetch
        count: usize,
    },

    /// One image was written
    ImageSaved {
        /// Position within the query
        index: usize,
        /// Source URL
        url: String,
        /// File written
        path: PathBuf,
    },

    /// One image was skipped
    ImageSkipped {
        /// Position within the query
        index: usize,
        /// Source URL
        url: String,
        /// Why it was skipped
        reason: SkipReason,
    },

    /// All URLs of a query were processed
    QueryFinished {
        /// Query text
        query: String,
        /// Files written
        saved: usize,
        /// URLs skipped
        skipped: usize,
    },

    /// Every query of the batch was processed
    BatchFinished {
        /// Number of queries processed
        queries: usize,
        /// Files written across all queries
        saved: usize,
    },
}
