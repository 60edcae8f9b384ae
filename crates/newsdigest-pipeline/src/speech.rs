//! Text-to-speech synthesis into MP3 files.

use std::path::{Path, PathBuf};

use reqwest::{Client, Url};

use crate::error::PipelineError;
use crate::types::parse_url;

/// Longest text the TTS endpoint accepts per request, in characters.
pub const MAX_CHUNK_CHARS: usize = 100;

pub struct SpeechClient {
    client: Client,
    base_url: Url,
}

impl SpeechClient {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if `tts_url` does not parse.
    pub fn new(client: Client, tts_url: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            client,
            base_url: parse_url(tts_url)?,
        })
    }

    fn chunk_url(&self, chunk: &str, language: &str, total: usize, idx: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("client", "tw-ob")
            .append_pair("tl", language)
            .append_pair("q", chunk)
            .append_pair("total", &total.to_string())
            .append_pair("idx", &idx.to_string())
            .append_pair("textlen", &chunk.chars().count().to_string());
        url
    }

    /// Synthesize `text` and write the concatenated MP3 to `path`.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Speech`] if the text is empty or a chunk request fails.
    /// - [`PipelineError::Io`] if the file cannot be written.
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        language: &str,
        path: &Path,
    ) -> Result<(), PipelineError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(PipelineError::Speech("nothing to synthesize".to_string()));
        }

        let mut audio = Vec::new();
        let total = chunks.len();
        for (idx, chunk) in chunks.iter().enumerate() {
            let url = self.chunk_url(chunk, language, total, idx);
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| PipelineError::Speech(format!("request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(PipelineError::Speech(format!(
                    "chunk {idx} returned status {}",
                    response.status()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| PipelineError::Speech(format!("body read failed: {e}")))?;
            audio.extend_from_slice(&bytes);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &audio).await?;
        tracing::debug!(path = %path.display(), chunks = total, bytes = audio.len(), "wrote audio");
        Ok(())
    }
}

/// Split `text` at whitespace into chunks of at most `max_chars` characters.
///
/// Words longer than `max_chars` are split mid-word.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// `<company>_news_<index>.mp3` with the company reduced to `[A-Za-z0-9._-]`.
#[must_use]
pub fn audio_file_name(company: &str, index: usize) -> String {
    let safe: String = company
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_news_{index}.mp3")
}

/// Full path of an article's audio file inside `audio_dir`.
#[must_use]
pub fn audio_path(audio_dir: &Path, company: &str, index: usize) -> PathBuf {
    audio_dir.join(audio_file_name(company, index))
}
