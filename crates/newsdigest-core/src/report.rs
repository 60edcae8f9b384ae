use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::articles::{Sentiment, StageIssue};

/// Per-label article counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Body of the `/compare-sentiment/` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentComparison {
    pub company: String,
    pub total_articles: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub analysis_summary: String,
}

/// Cross-article sentiment and topic comparison for one company query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeReport {
    pub company: String,
    pub total_articles: usize,
    pub sentiment_distribution: SentimentDistribution,
    /// Re-summarization of all article summaries joined together.
    pub coverage_summary: String,
    pub common_topics: BTreeSet<String>,
    /// One entry per article, in article order.
    pub unique_topics_per_article: Vec<BTreeSet<String>>,
    pub overall_sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<StageIssue>,
}
