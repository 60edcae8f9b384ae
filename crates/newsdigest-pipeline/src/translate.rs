//! Translation through the public `gtx` translate endpoint.

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::PipelineError;
use crate::types::parse_url;

pub struct Translator {
    client: Client,
    base_url: Url,
}

impl Translator {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if `translate_url` does not parse.
    pub fn new(client: Client, translate_url: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            client,
            base_url: parse_url(translate_url)?,
        })
    }

    fn request_url(&self, text: &str, target_language: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "en")
            .append_pair("tl", target_language)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }

    /// Translate English `text` into `target_language`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Translation`] on request failure, non-success
    /// status, an unexpected response shape, or an empty translation.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        let url = self.request_url(text, target_language);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Translation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Translation(format!(
                "service returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::Translation(format!("response parse error: {e}")))?;

        parse_translation(&body)
    }
}

/// Concatenate the translated segments at `[0][i][0]`.
///
/// # Errors
///
/// Returns [`PipelineError::Translation`] if the shape is unexpected or no text
/// is found.
pub fn parse_translation(body: &Value) -> Result<String, PipelineError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::Translation("unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(PipelineError::Translation(
            "service returned an empty translation".to_string(),
        ));
    }
    Ok(translated)
}
