//! Batch orchestration: resolve queries, search each one, fetch every result.

use super::{ImageDownloader, ensure_dir};
use crate::error::{Result, input_file_error};
use crate::search::build_query;
use crate::types::{BatchReport, Event, FetchOutcome, ImageType, QueryReport, SearchParams};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the queries of a batch come from
///
/// The three sources are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuerySource {
    /// One literal query, used as-is
    Single(String),
    /// Comma-separated queries
    List(String),
    /// File with one query per line
    File(PathBuf),
}

impl QuerySource {
    /// Resolve the source into the ordered list of queries
    ///
    /// List and file entries have leading whitespace removed and empty entries dropped.
    ///
    /// # Errors
    /// Returns [`Error::Io`](crate::Error::Io) if a query file cannot be read.
    pub async fn resolve(&self) -> Result<Vec<String>> {
        match self {
            QuerySource::Single(query) => Ok(vec![query.clone()]),
            QuerySource::List(list) => Ok(clean_entries(list.split(','))),
            QuerySource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| input_file_error(path, e))?;
                Ok(clean_entries(content.lines()))
            }
        }
    }
}

/// Trim leading whitespace (and a stray `\r`) from each entry, dropping empty ones
pub(crate) fn clean_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(|entry| entry.trim_start().trim_end_matches('\r'))
        .filter(|entry| !entry.trim().is_empty())
        .map(str::to_string)
        .collect()
}

impl ImageDownloader {
    /// Run every query of `source` in order, downloading into the configured destination
    ///
    /// Queries run strictly one after another; each one gets its own search and its own
    /// index sequence starting at 0. Per-image and per-query failures are logged and
    /// reflected in the report, never returned as errors.
    ///
    /// # Errors
    /// Returns an error only if the query file cannot be read or the destination
    /// directory cannot be created.
    pub async fn run_batch(&self, source: &QuerySource) -> Result<BatchReport> {
        let queries = source.resolve().await?;
        let dir = self.config.destination_dir().clone();
        ensure_dir(&dir).await?;

        info!(queries = queries.len(), dir = %dir.display(), "starting batch");

        let mut report = BatchReport::default();
        for query in &queries {
            report.queries.push(self.run_query(query, &dir).await);
        }

        self.emit_event(Event::BatchFinished {
            queries: report.queries.len(),
            saved: report.total_saved(),
        });
        info!(
            queries = report.queries.len(),
            saved = report.total_saved(),
            skipped = report.total_skipped(),
            "batch finished"
        );
        Ok(report)
    }

    /// Search for one query and download every result into `dir`
    ///
    /// The query text sent to the API gets the stock exclusion clause appended when
    /// `filter_stocks` is enabled. A failed first search page yields an empty report.
    pub async fn run_query(&self, query: &str, dir: &Path) -> QueryReport {
        self.emit_event(Event::QueryStarted {
            query: query.to_string(),
        });
        info!(query = %query, "searching");

        let download = &self.config.download;
        let params = SearchParams::new(
            build_query(query, download.filter_stocks),
            download.count,
            &self.config.filters,
        );
        let urls = self.search.collect_urls(params, download.maximum_wanted).await;

        self.download_all(query, &urls, self.config.filters.image_type, dir)
            .await
    }

    /// Fetch `urls` in order with their positional index, aggregating the outcomes
    pub(crate) async fn download_all(
        &self,
        label: &str,
        urls: &[String],
        category: ImageType,
        dir: &Path,
    ) -> QueryReport {
        self.emit_event(Event::UrlsCollected {
            query: label.to_string(),
            count: urls.len(),
        });

        let mut report = QueryReport::new(label);
        report.urls_found = urls.len();

        for (index, url) in urls.iter().enumerate() {
            let outcome = self.fetcher.fetch_image(index, url, category, dir).await;
            self.emit_event(match &outcome {
                FetchOutcome::Saved { url, path } => Event::ImageSaved {
                    index,
                    url: url.clone(),
                    path: path.clone(),
                },
                FetchOutcome::Skipped { url, reason } => Event::ImageSkipped {
                    index,
                    url: url.clone(),
                    reason: *reason,
                },
            });
            report.record(outcome);
        }

        self.emit_event(Event::QueryFinished {
            query: label.to_string(),
            saved: report.saved.len(),
            skipped: report.skipped.len(),
        });
        info!(
            query = %label,
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            "query finished"
        );
        report
    }
}
