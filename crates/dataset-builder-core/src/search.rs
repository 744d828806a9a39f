use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::Result;

/// Header carrying the API subscription key
const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// One page of image search results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub total_estimated_matches: u32,

    #[serde(default)]
    pub value: Vec<ImageResult>,
}

/// A single search hit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub content_url: String,
}

/// Blocking client for the image search API
pub struct SearchClient {
    client: Client,
    subscription_key: String,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(subscription_key: impl Into<String>, config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            subscription_key: subscription_key.into(),
            config: config.clone(),
        })
    }

    /// Underlying HTTP client, shared with image downloads
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Request the page of results starting at `offset`
    pub fn search(&self, query: &str, offset: u32) -> Result<SearchPage> {
        debug!("Searching '{}' at offset {}", query, offset);
        let params = [
            ("q", query.to_string()),
            ("license", self.config.license.clone()),
            ("imageType", self.config.image_type.clone()),
            ("offset", offset.to_string()),
            ("count", self.config.page_size.to_string()),
        ];

        let page = self
            .client
            .get(self.config.endpoint.as_str())
            .header(SUBSCRIPTION_HEADER, self.subscription_key.as_str())
            .query(&params)
            .send()?
            .error_for_status()?
            .json::<SearchPage>()?;

        Ok(page)
    }

    /// Number of results to walk through, capped by the configured maximum
    pub fn estimated_total(&self, page: &SearchPage) -> u32 {
        page.total_estimated_matches.min(self.config.max_images)
    }

    /// Offsets of each page below `total`
    pub fn page_offsets(&self, total: u32) -> impl Iterator<Item = u32> {
        (0..total).step_by(self.config.page_size.max(1) as usize)
    }
}
