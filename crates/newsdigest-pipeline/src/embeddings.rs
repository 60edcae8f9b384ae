//! TEI (Text Embeddings Inference) client used to rank keyphrase candidates.
//!
//! [`KeywordExtractor`](crate::keywords::KeywordExtractor) embeds an article's
//! text together with its candidate phrases in one call and keeps the phrases
//! whose vectors sit closest to the document vector.

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::PipelineError;
use crate::types::parse_url;

/// Maximum number of texts per /embed call.
pub const BATCH_SIZE: usize = 64;

/// POSTs `{"inputs": [...]}` to a TEI `/embed` endpoint and expects a JSON
/// array of float vectors back, one per input.
pub struct EmbeddingsClient {
    client: Client,
    url: Url,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl EmbeddingsClient {
    /// Create a client for the TEI server at `base_url`; requests go to `{base_url}/embed`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if the URL does not parse.
    pub fn new(client: Client, base_url: &str) -> Result<Self, PipelineError> {
        let url = parse_url(&format!("{}/embed", base_url.trim_end_matches('/')))?;
        Ok(Self { client, url })
    }

    /// Embed `texts`, one vector per input in input order.
    ///
    /// Inputs are sent in batches of [`BATCH_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Embeddings`] if a request fails, the server
    /// answers with a non-success status, or the vector count does not match.
    pub async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let request = EmbedRequest { inputs: chunk };
            let response = self
                .client
                .post(self.url.clone())
                .json(&request)
                .send()
                .await
                .map_err(|e| PipelineError::Embeddings(format!("request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(PipelineError::Embeddings(format!(
                    "server returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| PipelineError::Embeddings(format!("response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(PipelineError::Embeddings(format!(
                    "server returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}
