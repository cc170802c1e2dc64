//! # image-search-dl
//!
//! Backend library for bulk image downloads driven by an image search API.
//!
//! ## Design Philosophy
//!
//! image-search-dl is designed to be:
//! - **Sequential and predictable** - one request at a time, in program order
//! - **Failure tolerant** - a broken image or page is logged and skipped, never fatal
//! - **Library-first** - no CLI or UI, callers supply a validated [`Config`]
//! - **Event-driven** - progress is published as [`Event`]s for any display to consume
//!
//! ## Pipeline
//!
//! query source → paginated search → content URLs → image download → normalize → disk
//!
//! ## Quick Start
//!
//! ```no_run
//! use image_search_dl::{Config, ImageDownloader, ImageType, QuerySource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::with_api_key("your-subscription-key");
//!     config.download.count = 50;
//!     config.filters.image_type = ImageType::Transparent;
//!
//!     let downloader = ImageDownloader::new(config)?;
//!     let report = downloader
//!         .run_batch(&QuerySource::List("cats, dogs".to_string()))
//!         .await?;
//!
//!     println!("saved {} images", report.total_saved());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Downloader and batch orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Image decoding, color conversion and re-encoding
pub mod normalizer;
/// Paginated search and visual search clients
pub mod search;
/// Core types and events
pub mod types;
/// Filename helpers
pub mod utils;

// Re-export commonly used types
pub use config::{ApiConfig, Config, DownloadConfig, SearchFilters};
pub use downloader::{ImageDownloader, ImageFetcher, QuerySource, ReferenceSource};
pub use error::{Error, Result, SkipReason};
pub use search::{SearchClient, VisualSearchClient};
pub use types::{
    Aspect, BatchReport, Event, FetchOutcome, ImageColor, ImageContent, ImageSize, ImageType,
    QueryReport, SearchPage, SearchParams,
};
