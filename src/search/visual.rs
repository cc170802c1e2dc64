//! Visual search: find images similar to a reference image.

use crate::error::{Error, Result};
use crate::types::ImageDescriptor;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

/// Action type carrying the similar-image list
const VISUAL_SEARCH_ACTION: &str = "VisualSearch";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualSearchResponse {
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tag {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    actions: Vec<Action>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Action {
    #[serde(default)]
    action_type: String,
    #[serde(default)]
    data: Option<ActionData>,
}

#[derive(Debug, Default, Deserialize)]
struct ActionData {
    #[serde(default)]
    value: Vec<ImageDescriptor>,
}

impl VisualSearchResponse {
    /// URLs of the `VisualSearch` action on the unlabeled tag
    fn similar_urls(self) -> Result<Vec<String>> {
        let tag = self
            .tags
            .into_iter()
            .find(|tag| tag.display_name.is_empty())
            .ok_or_else(|| Error::VisualSearch("response has no unlabeled tag".to_string()))?;

        let data = tag
            .actions
            .into_iter()
            .find(|action| action.action_type == VISUAL_SEARCH_ACTION)
            .and_then(|action| action.data)
            .ok_or_else(|| {
                Error::VisualSearch(format!("response has no {VISUAL_SEARCH_ACTION} action"))
            })?;

        Ok(data
            .value
            .into_iter()
            .filter_map(|img| img.content_url)
            .collect())
    }
}

/// Client for the visual search endpoint
#[derive(Clone, Debug)]
pub struct VisualSearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl VisualSearchClient {
    /// Create a visual search client authenticating with `api_key`
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the key cannot be sent as a header value.
    pub fn new(api_key: &str, endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: super::api_client(api_key)?,
            endpoint: endpoint.into(),
        })
    }

    /// Upload `image` and return the content URLs of similar images
    ///
    /// # Errors
    /// Returns an error if the upload fails, the API answers with a non-success status,
    /// or the response does not contain a similar-image list.
    pub async fn find_similar(&self, image: Vec<u8>) -> Result<Vec<String>> {
        let form = Form::new().part("image", Part::bytes(image).file_name("image"));

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: VisualSearchResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::VisualSearch(format!("unexpected response: {}", e)))?;

        let urls = parsed.similar_urls()?;
        debug!(similar = urls.len(), "visual search complete");
        Ok(urls)
    }
}
