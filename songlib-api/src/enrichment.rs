//! Song metadata enrichment
//!
//! New songs are completed from an external metadata source before they are
//! stored. The source sits behind [`MetadataProvider`]. One lookup per
//! create, no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use songlib_common::config::EnrichmentConfig;
use songlib_common::db::SongInput;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("songlib/", env!("CARGO_PKG_VERSION"));

/// Enrichment errors
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Network failure or non-success status
    #[error("Metadata source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Response body is not song metadata
    #[error("Malformed metadata response: {0}")]
    Decode(String),
}

/// Metadata for one song as returned by a provider
///
/// Accepts the song JSON shape; every field is optional and empty values
/// leave the submitted field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SongMetadata {
    #[serde(default, rename = "song_group")]
    pub group: Option<String>,
    #[serde(default, rename = "song_name")]
    pub title: Option<String>,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "link")]
    pub links: Option<String>,
}

impl SongMetadata {
    /// Overlay non-empty metadata fields onto a submitted song
    pub fn apply_to(self, mut input: SongInput) -> SongInput {
        fn overlay(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *target = value;
            }
        }

        overlay(&mut input.group, self.group);
        overlay(&mut input.title, self.title);
        overlay(&mut input.release_date, self.release_date);
        overlay(&mut input.text, self.text);
        overlay(&mut input.links, self.links);
        input
    }
}

/// Source of song metadata
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look up metadata for a song by performer and title
    async fn fetch_metadata(&self, group: &str, title: &str) -> Result<SongMetadata, EnrichmentError>;
}

/// Provider used when no lookup endpoint is configured
///
/// Returns empty metadata, so songs are stored exactly as submitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughMetadata;

#[async_trait]
impl MetadataProvider for PassthroughMetadata {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    async fn fetch_metadata(&self, _group: &str, _title: &str) -> Result<SongMetadata, EnrichmentError> {
        Ok(SongMetadata::default())
    }
}

/// HTTP metadata lookup
///
/// Issues `GET <base_url>?group=<group>&song=<title>` and decodes a single
/// song object from the body.
pub struct HttpMetadataClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::UpstreamUnavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_metadata(&self, group: &str, title: &str) -> Result<SongMetadata, EnrichmentError> {
        debug!(group = %group, title = %title, url = %self.base_url, "Requesting song metadata");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("group", group), ("song", title)])
            .send()
            .await
            .map_err(|e| EnrichmentError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::UpstreamUnavailable(format!(
                "metadata source returned {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| EnrichmentError::UpstreamUnavailable(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| EnrichmentError::Decode(e.to_string()))
    }
}

/// Build the provider selected by configuration
pub fn provider_from_config(
    config: &EnrichmentConfig,
) -> Result<Box<dyn MetadataProvider>, EnrichmentError> {
    match &config.base_url {
        Some(url) => Ok(Box::new(HttpMetadataClient::new(url.clone(), config.timeout())?)),
        None => Ok(Box::new(PassthroughMetadata)),
    }
}
