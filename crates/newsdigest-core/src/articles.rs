use serde::{Deserialize, Serialize};

/// Polarity label assigned to a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// One `<item>` from the news search feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Plain-text description; HTML stripped and entities decoded.
    pub snippet: String,
}

/// Pipeline stage that can degrade without failing the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Summarize,
    Topics,
    Translate,
    Speech,
    Coverage,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Summarize => write!(f, "summarize"),
            Stage::Topics => write!(f, "topics"),
            Stage::Translate => write!(f, "translate"),
            Stage::Speech => write!(f, "speech"),
            Stage::Coverage => write!(f, "coverage"),
        }
    }
}

/// A stage failure recorded alongside the degraded value it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageIssue {
    pub stage: Stage,
    pub message: String,
}

impl StageIssue {
    #[must_use]
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// A fully annotated news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub summary: String,
    pub sentiment: Sentiment,
    /// Keyphrases, most relevant first.
    pub topics: Vec<String>,
    /// Absolute path of the synthesized MP3, if speech succeeded.
    pub audio: Option<String>,
    /// HTTP path the audio is served under.
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<StageIssue>,
}

impl Article {
    /// Whether the given stage failed for this article.
    #[must_use]
    pub fn has_issue(&self, stage: Stage) -> bool {
        self.issues.iter().any(|issue| issue.stage == stage)
    }
}
