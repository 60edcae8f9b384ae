//! News pipeline orchestration.

use std::path::PathBuf;

use newsdigest_core::{Article, ComparativeReport, FeedItem, Stage, StageIssue};

use crate::embeddings::EmbeddingsClient;
use crate::error::PipelineError;
use crate::feed::FeedClient;
use crate::keywords::KeywordExtractor;
use crate::report::{coverage_text, overall_sentiment, sentiment_distribution, topic_overlap};
use crate::scorer::analyze_sentiment;
use crate::speech::{audio_file_name, audio_path, SpeechClient};
use crate::summarizer::SummarizerClient;
use crate::translate::Translator;
use crate::types::{build_http_client, PipelineConfig};

/// Every external client the pipeline needs, built once and shared across requests.
pub struct NewsPipeline {
    feed: FeedClient,
    summarizer: SummarizerClient,
    keywords: KeywordExtractor,
    translator: Translator,
    speech: SpeechClient,
    target_language: String,
    audio_dir: PathBuf,
    audio_url_prefix: String,
    topics_per_article: usize,
}

impl NewsPipeline {
    /// Build all service clients over one shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the HTTP client cannot be built or any
    /// configured URL is invalid.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let client = build_http_client(config.request_timeout_secs, &config.user_agent)?;

        Ok(Self {
            feed: FeedClient::new(client.clone(), &config.feed_url)?,
            summarizer: SummarizerClient::new(
                client.clone(),
                &config.summarizer_url,
                config.summarizer_token.clone(),
            )?,
            keywords: KeywordExtractor::new(EmbeddingsClient::new(
                client.clone(),
                &config.embeddings_url,
            )?),
            translator: Translator::new(client.clone(), &config.translate_url)?,
            speech: SpeechClient::new(client, &config.tts_url)?,
            target_language: config.target_language.clone(),
            audio_dir: config.audio_dir.clone(),
            audio_url_prefix: config.audio_url_prefix.trim_end_matches('/').to_string(),
            topics_per_article: config.topics_per_article,
        })
    }

    /// Fetch up to `max_articles` feed items for `company` and annotate each one.
    ///
    /// Articles are processed in feed order, one at a time. Only a feed failure
    /// is returned as an error; later stage failures are recorded on the
    /// affected article as [`StageIssue`]s.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the feed cannot be fetched or parsed.
    pub async fn process_company(
        &self,
        company: &str,
        max_articles: usize,
    ) -> Result<Vec<Article>, PipelineError> {
        let items = self.feed.fetch(company, max_articles).await?;
        tracing::info!(company, count = items.len(), "processing news articles");

        let mut articles = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            articles.push(self.process_article(company, i + 1, item).await);
        }
        Ok(articles)
    }

    async fn process_article(&self, company: &str, index: usize, item: FeedItem) -> Article {
        let mut issues = Vec::new();

        let summary = match self.summarizer.summarize(&item.snippet).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(company, index, error = %e, "summarization failed; using snippet");
                issues.push(StageIssue::new(Stage::Summarize, e.to_string()));
                item.snippet.clone()
            }
        };

        let sentiment = analyze_sentiment(&summary);

        let topics = match self.keywords.extract(&summary, self.topics_per_article).await {
            Ok(topics) => topics,
            Err(e) => {
                tracing::warn!(company, index, error = %e, "topic extraction failed");
                issues.push(StageIssue::new(Stage::Topics, e.to_string()));
                Vec::new()
            }
        };

        let (audio, audio_url) = match self.synthesize(company, index, &summary).await {
            Ok((path, url)) => (Some(path), Some(url)),
            Err(issue) => {
                tracing::warn!(
                    company,
                    index,
                    stage = %issue.stage,
                    error = %issue.message,
                    "audio unavailable"
                );
                issues.push(issue);
                (None, None)
            }
        };

        Article {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            summary,
            sentiment,
            topics,
            audio,
            audio_url,
            issues,
        }
    }

    /// Translate the summary and write its audio. Returns `(absolute path, url)`.
    async fn synthesize(
        &self,
        company: &str,
        index: usize,
        summary: &str,
    ) -> Result<(String, String), StageIssue> {
        let translated = self
            .translator
            .translate(summary, &self.target_language)
            .await
            .map_err(|e| StageIssue::new(Stage::Translate, e.to_string()))?;

        let path = audio_path(&self.audio_dir, company, index);
        self.speech
            .synthesize_to_file(&translated, &self.target_language, &path)
            .await
            .map_err(|e| StageIssue::new(Stage::Speech, e.to_string()))?;

        let absolute = std::path::absolute(&path).unwrap_or(path);
        Ok((
            absolute.display().to_string(),
            format!("{}/{}", self.audio_url_prefix, audio_file_name(company, index)),
        ))
    }

    /// Build the comparative report, re-summarizing the joined summaries.
    ///
    /// If that summarization fails, the joined text is kept and a
    /// [`Stage::Coverage`] issue is recorded.
    pub async fn comparative_report(
        &self,
        company: &str,
        articles: &[Article],
    ) -> ComparativeReport {
        let dist = sentiment_distribution(articles);
        let mut issues = Vec::new();

        let joined = coverage_text(articles);
        let coverage_summary = if articles.is_empty() {
            String::new()
        } else {
            match self.summarizer.summarize(&joined).await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!(company, error = %e, "coverage summarization failed");
                    issues.push(StageIssue::new(Stage::Coverage, e.to_string()));
                    joined
                }
            }
        };

        let topic_lists: Vec<Vec<String>> = articles.iter().map(|a| a.topics.clone()).collect();
        let overlap = topic_overlap(&topic_lists);

        ComparativeReport {
            company: company.to_string(),
            total_articles: articles.len(),
            sentiment_distribution: dist,
            coverage_summary,
            common_topics: overlap.common,
            unique_topics_per_article: overlap.unique,
            overall_sentiment: overall_sentiment(&dist),
            issues,
        }
    }
}
