//! Client for a hosted abstractive summarization model.
//!
//! Speaks the Hugging Face inference API contract: `POST {inputs, parameters}`
//! answered by `[{"summary_text": ...}]`.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::parse_url;

/// Returned in place of a summary when the input has too few words to condense.
pub const SUMMARY_TOO_SHORT: &str = "Summary not available (text too short).";

const MIN_INPUT_WORDS: usize = 10;
const MAX_INPUT_WORDS: usize = 500;
const MAX_SUMMARY_LENGTH: u32 = 100;
const MIN_SUMMARY_LENGTH: u32 = 30;

pub struct SummarizerClient {
    client: Client,
    url: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Serialize)]
struct SummarizeParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

impl SummarizerClient {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if `url` does not parse.
    pub fn new(client: Client, url: &str, token: Option<String>) -> Result<Self, PipelineError> {
        Ok(Self {
            client,
            url: parse_url(url)?,
            token,
        })
    }

    /// Summarize `text`.
    ///
    /// Input shorter than 10 words is not sent; [`SUMMARY_TOO_SHORT`] is returned
    /// instead. Input longer than 500 words is cut to its first 500 words.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Summarizer`] if the request fails, the service
    /// answers with a non-success status, or the response is empty or malformed.
    pub async fn summarize(&self, text: &str) -> Result<String, PipelineError> {
        let Some(input) = prepare_input(text) else {
            return Ok(SUMMARY_TOO_SHORT.to_string());
        };

        let request = SummarizeRequest {
            inputs: &input,
            parameters: SummarizeParameters {
                max_length: MAX_SUMMARY_LENGTH,
                min_length: MIN_SUMMARY_LENGTH,
                do_sample: false,
            },
        };

        let mut builder = self.client.post(self.url.clone()).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PipelineError::Summarizer(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Summarizer(format!(
                "service returned status {}",
                response.status()
            )));
        }

        let outputs: Vec<SummaryOutput> = response
            .json()
            .await
            .map_err(|e| PipelineError::Summarizer(format!("response parse error: {e}")))?;

        let summary = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::Summarizer("service returned no summary".to_string()))?;

        Ok(summary)
    }
}

/// Word-count gate and truncation applied before calling the model.
///
/// Returns `None` when the text is too short to summarize.
fn prepare_input(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < MIN_INPUT_WORDS {
        return None;
    }
    if words.len() > MAX_INPUT_WORDS {
        return Some(words[..MAX_INPUT_WORDS].join(" "));
    }
    Some(text.to_string())
}
