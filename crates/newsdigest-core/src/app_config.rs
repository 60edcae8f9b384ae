use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory where synthesized MP3 files are written and served from.
    pub audio_dir: PathBuf,
    pub feed_url: String,
    pub summarizer_url: String,
    pub summarizer_token: Option<String>,
    pub embeddings_url: String,
    pub translate_url: String,
    pub tts_url: String,
    /// ISO 639-1 code the summaries are translated and spoken in.
    pub target_language: String,
    pub default_max_articles: usize,
    pub topics_per_article: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("audio_dir", &self.audio_dir)
            .field("feed_url", &self.feed_url)
            .field("summarizer_url", &self.summarizer_url)
            .field(
                "summarizer_token",
                &self.summarizer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("embeddings_url", &self.embeddings_url)
            .field("translate_url", &self.translate_url)
            .field("tts_url", &self.tts_url)
            .field("target_language", &self.target_language)
            .field("default_max_articles", &self.default_max_articles)
            .field("topics_per_article", &self.topics_per_article)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
