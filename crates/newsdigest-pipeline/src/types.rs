use std::path::PathBuf;
use std::time::Duration;

use newsdigest_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::PipelineError;

/// Endpoints and tuning for the external services the pipeline calls.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub feed_url: String,
    pub summarizer_url: String,
    pub summarizer_token: Option<String>,
    pub embeddings_url: String,
    pub translate_url: String,
    pub tts_url: String,
    pub target_language: String,
    pub audio_dir: PathBuf,
    /// URL prefix under which `audio_dir` is served.
    pub audio_url_prefix: String,
    pub topics_per_article: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl PipelineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            feed_url: config.feed_url.clone(),
            summarizer_url: config.summarizer_url.clone(),
            summarizer_token: config.summarizer_token.clone(),
            embeddings_url: config.embeddings_url.clone(),
            translate_url: config.translate_url.clone(),
            tts_url: config.tts_url.clone(),
            target_language: config.target_language.clone(),
            audio_dir: config.audio_dir.clone(),
            audio_url_prefix: "/audio".to_string(),
            topics_per_article: config.topics_per_article,
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Build the shared HTTP client used by every external service client.
///
/// # Errors
///
/// Returns [`PipelineError::Http`] if the client cannot be constructed.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PipelineError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, PipelineError> {
    Url::parse(raw).map_err(|e| PipelineError::InvalidUrl(format!("'{raw}': {e}")))
}
