use crate::types::{AggregatorError, FetchConfig, RawPost, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_query(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Bounded-deadline HTTP client for the upstream content API.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and decode one JSON resource. The whole send-and-read runs under
    /// the configured deadline; elapsing aborts the in-flight request. The
    /// deadline timer is scoped to this call, so it is released on every exit
    /// path.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let deadline = Duration::from_secs(self.config.timeout_seconds);
        debug!("fetching {}", url);

        let body = timeout(deadline, self.fetch_body(url)).await.map_err(|_| {
            warn!(
                "upstream request to {} exceeded {}s deadline",
                url, self.config.timeout_seconds
            );
            AggregatorError::Timeout {
                seconds: self.config.timeout_seconds,
            }
        })??;

        serde_json::from_slice(&body).map_err(|e| AggregatorError::Parse(e.to_string()))
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("fetched {} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }

    /// One page of the posts collection, with embedded taxonomy and media.
    pub async fn fetch_posts(&self, per_page: usize, order: SortOrder) -> Result<Vec<RawPost>> {
        let url = format!(
            "{}/posts?_embed&per_page={}&order={}&orderby=date",
            self.config.base_url,
            per_page,
            order.as_query()
        );
        self.fetch_json(&url).await
    }

    /// One post by id, with embedded taxonomy and media.
    pub async fn fetch_post(&self, id: u64) -> Result<RawPost> {
        let url = format!("{}/posts/{}?_embed", self.config.base_url, id);
        self.fetch_json(&url).await
    }
}
