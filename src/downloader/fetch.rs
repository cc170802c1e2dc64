//! Single-image download.

use crate::error::{Error, Result};
use crate::normalizer;
use crate::types::{FetchOutcome, ImageType};
use crate::utils::indexed_file_name;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Anonymous HTTP client for image downloads
///
/// Every request carries a browser-like user agent and is bounded by the configured
/// timeout (connect, headers and body together).
#[derive(Clone, Debug)]
pub struct ImageFetcher {
    http: reqwest::Client,
}

impl ImageFetcher {
    /// Build the download client
    ///
    /// # Errors
    /// Returns [`Error::Other`] if the HTTP client cannot be created.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create download HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Download the raw bytes behind `url`
    ///
    /// # Errors
    /// Returns [`Error::Network`] for transport failures and timeouts, and
    /// [`Error::HttpStatus`] for non-success responses.
    pub async fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Download one image and write it to `dir` as `{index}._{name}`
    ///
    /// Never fails: download, decode and write errors are logged with the URL (or file
    /// name) and reported as [`FetchOutcome::Skipped`] so the caller can move on.
    pub async fn fetch_image(
        &self,
        index: usize,
        url: &str,
        category: ImageType,
        dir: &Path,
    ) -> FetchOutcome {
        let bytes = match self.download_bytes(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %url, error = %e, "image download failed, skipping");
                return FetchOutcome::Skipped {
                    url: url.to_string(),
                    reason: e.skip_reason(),
                };
            }
        };

        let name = indexed_file_name(index, url, category);
        match normalizer::save_image(bytes, category, dir.join(&name)).await {
            Ok(path) => {
                debug!(url = %url, path = %path.display(), "image saved");
                FetchOutcome::Saved {
                    url: url.to_string(),
                    path,
                }
            }
            Err(e) => {
                warn!(file = %name, url = %url, error = %e, "saving image failed, skipping");
                FetchOutcome::Skipped {
                    url: url.to_string(),
                    reason: e.skip_reason(),
                }
            }
        }
    }
}
