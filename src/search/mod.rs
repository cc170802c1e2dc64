//! Paginated image search against the remote search API.
//!
//! [`SearchClient`] issues one or more `GET` requests and accumulates the content URLs of
//! each page until the requested count is reached or, in "maximum wanted" mode, until the
//! page bound derived from the API's match estimate is exhausted.
//!
//! Failure handling is deliberately asymmetric:
//! - the first page failing aborts the query (an empty list is returned)
//! - a later page failing is logged and skipped, paging continues

mod visual;

pub use visual::VisualSearchClient;

use crate::error::{Error, Result};
use crate::types::{SearchPage, SearchParams};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

/// Header carrying the API subscription key
pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Negated provider names appended to queries to bias results away from stock sites
pub const STOCK_EXCLUSION: &str =
    " -shutterstock -dreamstime -bigstock -alamy -depositphotos -gettyimages -istock";

/// Build an HTTP client that sends `api_key` with every request
///
/// No timeout is configured; search calls wait for as long as the API takes.
pub(crate) fn api_client(api_key: &str) -> Result<reqwest::Client> {
    let mut value = HeaderValue::from_str(api_key)
        .map_err(|e| Error::config("api_key", format!("API key is not a valid header: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, value);

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Other(format!("Failed to create search HTTP client: {}", e)))
}

/// Client for the paginated image search endpoint
///
/// Holds one HTTP client (with the API key header) that is reused for every page of
/// every query.
#[derive(Clone, Debug)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    batch_size: usize,
}

impl SearchClient {
    /// Create a search client authenticating with `api_key`
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the key cannot be sent as a header value or
    /// `batch_size` is zero.
    pub fn new(api_key: &str, endpoint: impl Into<String>, batch_size: usize) -> Result<Self> {
        Self::from_client(api_client(api_key)?, endpoint, batch_size)
    }

    /// Wrap an already configured HTTP client
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `batch_size` is zero.
    pub fn from_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::config(
                "batch_size",
                "batch size must be greater than zero",
            ));
        }
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            batch_size,
        })
    }

    /// Page size used to advance the offset
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetch a single page of results
    ///
    /// # Errors
    /// Returns an error if the request fails, the API answers with a non-success
    /// status, or the body is not a search response.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchPage> {
        let response = self.http.get(&self.endpoint).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::Search(format!("unexpected search response: {}", e)))
    }

    /// Collect content URLs for one query, paging as needed
    ///
    /// Pages are requested only when `maximum_wanted` is set or `params.count` exceeds
    /// one page. The loop runs `total / batch_size + 1` times, where `total` is the
    /// API's match estimate in maximum mode and `params.count` otherwise. Outside
    /// maximum mode the list is cut to exactly `params.count` as soon as it gets there.
    ///
    /// URLs are returned in API order. Duplicates across pages are kept.
    pub async fn collect_urls(&self, mut params: SearchParams, maximum_wanted: bool) -> Vec<String> {
        params.offset = None;

        let first = match self.search(&params).await {
            Ok(page) => page,
            Err(e) => {
                warn!(query = %params.query, error = %e, "search failed, skipping query");
                return Vec::new();
            }
        };

        let mut urls = first.content_urls();
        let needed = params.count;
        debug!(
            query = %params.query,
            found = urls.len(),
            estimated = first.total_estimated_matches,
            "first search page"
        );

        if !maximum_wanted && needed <= self.batch_size {
            return urls;
        }

        let total = if maximum_wanted {
            usize::try_from(first.total_estimated_matches).unwrap_or(usize::MAX)
        } else {
            needed
        };
        let pages = total / self.batch_size + 1;
        let mut offset = 0usize;

        for page in 0..pages {
            offset = offset.saturating_add(self.batch_size);
            params.offset = Some(offset);

            let result = match self.search(&params).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(query = %params.query, offset, error = %e, "search page failed, skipping");
                    continue;
                }
            };

            let page_urls = result.content_urls();
            debug!(query = %params.query, page, offset, found = page_urls.len(), "search page");
            urls.extend(page_urls);

            if !maximum_wanted && urls.len() >= needed {
                urls.truncate(needed);
                break;
            }
        }

        info!(query = %params.query, urls = urls.len(), "search complete");
        urls
    }
}

/// Query text sent to the API: the user query plus the stock exclusion clause if enabled
pub fn build_query(query: &str, filter_stocks: bool) -> String {
    if filter_stocks {
        format!("{query}{STOCK_EXCLUSION}")
    } else {
        query.to_string()
    }
}
