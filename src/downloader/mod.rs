//! Core downloader implementation split into focused submodules.
//!
//! The `ImageDownloader` struct and its methods are organized by domain:
//! - [`fetch`] - Single-image download with a bounded timeout
//! - [`batch`] - Query sources and the per-query search/fetch loop
//! - [`similar`] - Visual search by reference image

mod batch;
mod fetch;
mod similar;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use batch::QuerySource;
pub use fetch::ImageFetcher;
pub use similar::ReferenceSource;

use crate::config::Config;
use crate::error::{Result, destination_error};
use crate::search::{SearchClient, VisualSearchClient};
use crate::types::Event;
use std::path::Path;
use std::sync::Arc;

/// Main downloader instance (cloneable - all fields are cheap to clone)
///
/// Owns the two long-lived HTTP clients: one for anonymous image downloads (browser-like
/// user agent, bounded timeout) and one carrying the API key for search. Both are reused
/// for every request of a run and released when the last clone is dropped.
#[derive(Clone)]
pub struct ImageDownloader {
    /// Configuration (wrapped in Arc for cheap clones)
    pub(crate) config: Arc<Config>,
    /// Anonymous image download client
    pub(crate) fetcher: ImageFetcher,
    /// Paginated search client (API key header)
    pub(crate) search: SearchClient,
    /// Visual search client (visual search API key header)
    pub(crate) visual: VisualSearchClient,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl ImageDownloader {
    /// Create a new downloader from `config`
    ///
    /// This validates the configuration and builds both HTTP clients. No request is made
    /// and no directory is created until a batch runs.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) for an empty API key or other
    /// invalid settings, and [`Error::Other`](crate::Error::Other) if an HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let fetcher = ImageFetcher::new(
            config.download.download_timeout,
            &config.download.user_agent,
        )?;
        let search = SearchClient::new(
            &config.api.api_key,
            config.api.search_endpoint.clone(),
            config.api.batch_size,
        )?;
        let visual = VisualSearchClient::new(
            config.visual_search_api_key(),
            config.api.visual_search_endpoint.clone(),
        )?;

        // Create broadcast channel with buffer size of 1000 events
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);

        tracing::debug!(
            search_endpoint = %config.api.search_endpoint,
            batch_size = config.api.batch_size,
            "image downloader initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            search,
            visual,
            event_tx,
        })
    }

    /// Subscribe to progress events
    ///
    /// Multiple subscribers are supported. Each subscriber receives all events independently.
    /// Events are buffered, but if a subscriber falls behind by more than 1000 events,
    /// it will receive a `RecvError::Lagged` error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use image_search_dl::{Config, ImageDownloader, QuerySource};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let downloader = ImageDownloader::new(Config::with_api_key("key"))?;
    ///
    ///     let mut events = downloader.subscribe();
    ///     tokio::spawn(async move {
    ///         while let Ok(event) = events.recv().await {
    ///             tracing::info!(?event, "download event");
    ///         }
    ///     });
    ///
    ///     downloader.run_batch(&QuerySource::Single("cats".into())).await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers, the event is silently dropped.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}

/// Create `dir` (and parents) if it does not exist yet
pub(crate) async fn ensure_dir(dir: &Path) -> Result<()> {
    if tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| destination_error(dir, e))?;
    tracing::info!(dir = %dir.display(), "destination directory created");
    Ok(())
}
