//! Cross-article aggregation: sentiment tallies and topic overlap.

use std::collections::BTreeSet;

use newsdigest_core::{Article, Sentiment, SentimentComparison, SentimentDistribution};

#[must_use]
pub fn sentiment_distribution(articles: &[Article]) -> SentimentDistribution {
    let mut dist = SentimentDistribution::default();
    for article in articles {
        dist.record(article.sentiment);
    }
    dist
}

/// Majority of Positive vs Negative; ties and all-neutral sets are Neutral.
#[must_use]
pub fn overall_sentiment(dist: &SentimentDistribution) -> Sentiment {
    match dist.positive.cmp(&dist.negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Topics shared by every article, and each article's topics found in no other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicOverlap {
    pub common: BTreeSet<String>,
    pub unique: Vec<BTreeSet<String>>,
}

#[must_use]
pub fn topic_overlap(topic_lists: &[Vec<String>]) -> TopicOverlap {
    let sets: Vec<BTreeSet<String>> = topic_lists
        .iter()
        .map(|topics| topics.iter().cloned().collect())
        .collect();

    let common = match sets.split_first() {
        Some((first, rest)) => rest.iter().fold(first.clone(), |acc, set| {
            acc.intersection(set).cloned().collect()
        }),
        None => BTreeSet::new(),
    };

    let unique = sets
        .iter()
        .enumerate()
        .map(|(i, set)| {
            set.iter()
                .filter(|topic| {
                    !sets
                        .iter()
                        .enumerate()
                        .any(|(j, other)| j != i && other.contains(*topic))
                })
                .cloned()
                .collect()
        })
        .collect();

    TopicOverlap { common, unique }
}

/// One-line description used by `/compare-sentiment/`.
#[must_use]
pub fn analysis_summary(company: &str, dist: &SentimentDistribution) -> String {
    format!(
        "{company} has {} positive, {} negative, and {} neutral articles.",
        dist.positive, dist.negative, dist.neutral
    )
}

/// Sentiment tally for already-processed articles.
#[must_use]
pub fn compare_sentiment(company: &str, articles: &[Article]) -> SentimentComparison {
    let dist = sentiment_distribution(articles);
    SentimentComparison {
        company: company.to_string(),
        total_articles: articles.len(),
        sentiment_distribution: dist,
        analysis_summary: analysis_summary(company, &dist),
    }
}

/// All summaries joined with single spaces, in article order.
#[must_use]
pub fn coverage_text(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| a.summary.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
