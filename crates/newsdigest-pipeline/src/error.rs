use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed request failed with status {status}")]
    Fetch { status: u16 },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("summarizer error: {0}")]
    Summarizer(String),

    #[error("embeddings error: {0}")]
    Embeddings(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("speech synthesis error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
