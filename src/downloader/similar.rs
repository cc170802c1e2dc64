//! Downloading images similar to a reference image via visual search.

use super::batch::clean_entries;
use super::{ImageDownloader, ensure_dir};
use crate::error::{Result, input_file_error};
use crate::types::{BatchReport, Event, ImageType, QueryReport};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where the reference image URLs come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceSource {
    /// One reference image URL
    Url(String),
    /// File with one reference URL per line
    File(PathBuf),
}

impl ReferenceSource {
    /// Resolve the source into the ordered list of reference URLs
    ///
    /// # Errors
    /// Returns [`Error::Io`](crate::Error::Io) if the reference file cannot be read.
    pub async fn resolve(&self) -> Result<Vec<String>> {
        match self {
            ReferenceSource::Url(url) => Ok(vec![url.trim().to_string()]),
            ReferenceSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| input_file_error(path, e))?;
                Ok(clean_entries(content.lines())
                    .into_iter()
                    .map(|url| url.trim_end().to_string())
                    .collect())
            }
        }
    }
}

impl ImageDownloader {
    /// Download the images similar to every reference of `source`
    ///
    /// Files go to the configured similar-images destination. Each reference restarts
    /// its index at 0.
    ///
    /// # Errors
    /// Returns an error only if the reference file cannot be read or the destination
    /// directory cannot be created.
    pub async fn run_similar(&self, source: &ReferenceSource) -> Result<BatchReport> {
        let references = source.resolve().await?;
        let dir = self.config.download.similar_destination_dir.clone();
        ensure_dir(&dir).await?;

        let mut report = BatchReport::default();
        for reference in &references {
            report
                .queries
                .push(self.download_similar(reference, &dir).await);
        }

        self.emit_event(Event::BatchFinished {
            queries: report.queries.len(),
            saved: report.total_saved(),
        });
        Ok(report)
    }

    /// Find images similar to `reference_url` and download them into `dir`
    ///
    /// Failing to fetch the reference or to run the visual search is logged and yields an
    /// empty report. Similar images are saved with the default (opaque) category.
    pub async fn download_similar(&self, reference_url: &str, dir: &Path) -> QueryReport {
        self.emit_event(Event::QueryStarted {
            query: reference_url.to_string(),
        });

        let similar = self.similar_urls(reference_url).await.unwrap_or_default();
        self.download_all(reference_url, &similar, ImageType::All, dir)
            .await
    }

    /// Fetch the reference image and ask the visual search API for similar images
    async fn similar_urls(&self, reference_url: &str) -> Option<Vec<String>> {
        let reference = match self.fetcher.download_bytes(reference_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %reference_url, error = %e, "failed to get reference image");
                return None;
            }
        };

        match self.visual.find_similar(reference).await {
            Ok(urls) => Some(urls),
            Err(e) => {
                warn!(url = %reference_url, error = %e, "visual search failed");
                None
            }
        }
    }
}
