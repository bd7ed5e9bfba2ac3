//! HTTP upstream client
//!
//! The leaderboard backend takes form-encoded POSTs and answers with the
//! binary layout decoded by [`crate::protocol`].

use async_trait::async_trait;
use bytes::Bytes;

use super::config::UpstreamConfig;
use super::UpstreamClient;
use crate::error::UpstreamError;

const SCORES_PATH: &str = "get_scores.php";
const USER_SEARCH_PATH: &str = "get_user_search_public.php";
const USER_BY_ID_PATH: &str = "get_user_by_id_public.php";

/// [`UpstreamClient`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Build a client from configuration
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    /// Get the client configuration
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<Bytes, UpstreamError> {
        let url = self.config.endpoint(path);
        tracing::trace!(url = %url, "Upstream request");

        let response = self.client.post(&url).form(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::trace!(url = %url, bytes = body.len(), "Upstream response");
        Ok(body)
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn fetch_player_by_id(&self, id: u64) -> Result<Bytes, UpstreamError> {
        self.post_form(USER_BY_ID_PATH, &[("uid", id.to_string())])
            .await
    }

    async fn search_players(&self, query: &str) -> Result<Bytes, UpstreamError> {
        self.post_form(USER_SEARCH_PATH, &[("search", query.to_string())])
            .await
    }

    async fn fetch_scores(&self, offset: u32) -> Result<Bytes, UpstreamError> {
        self.post_form(SCORES_PATH, &[("offset", offset.to_string())])
            .await
    }
}
