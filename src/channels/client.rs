//! HTTP client for the external channel service

use super::models::{ChannelDetail, ChannelList, ChannelNode};
use super::traits::ChannelDirectory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Channel directory backed by the channel service's REST API
pub struct HttpChannelDirectory {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpChannelDirectory {
    /// Create a client. An empty token means unauthenticated requests.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build channel service HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Channel service request failed: GET {}", url))?
            .error_for_status()
            .with_context(|| format!("Channel service returned an error: GET {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid channel service response: GET {}", url))
    }
}

#[async_trait]
impl ChannelDirectory for HttpChannelDirectory {
    async fn children(&self, channel: Uuid) -> Result<Vec<Uuid>> {
        let detail: ChannelDetail = self.get_json(&format!("/channels/{}", channel)).await?;
        Ok(detail.children)
    }

    async fn list_public(&self) -> Result<Vec<ChannelNode>> {
        let list: ChannelList = self.get_json("/channels").await?;
        Ok(list.public)
    }
}
