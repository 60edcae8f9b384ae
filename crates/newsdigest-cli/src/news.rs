//! News command handlers for the CLI.

use newsdigest_core::{AppConfig, Article, ComparativeReport};
use newsdigest_pipeline::{compare_sentiment, NewsPipeline, PipelineConfig};
use serde::Serialize;

const MAX_ARTICLES_LIMIT: usize = 50;

#[derive(Serialize)]
struct ReportOutput<'a> {
    articles: &'a [Article],
    report: &'a ComparativeReport,
}

/// Requested article count, defaulted from config and clamped to `1..=50`.
pub(crate) fn resolve_max_articles(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_ARTICLES_LIMIT)
}

fn validate_company(company: &str) -> anyhow::Result<&str> {
    let company = company.trim();
    if company.is_empty() {
        anyhow::bail!("company must not be blank");
    }
    Ok(company)
}

/// Build the pipeline and process `company`, making sure the audio directory exists.
async fn load_articles(
    config: &AppConfig,
    company: &str,
    max_articles: Option<usize>,
) -> anyhow::Result<(NewsPipeline, Vec<Article>)> {
    let company = validate_company(company)?;
    tokio::fs::create_dir_all(&config.audio_dir).await?;

    let pipeline = NewsPipeline::new(&PipelineConfig::from_app_config(config))?;
    let limit = resolve_max_articles(max_articles, config.default_max_articles);
    let articles = pipeline.process_company(company, limit).await?;

    let degraded = articles.iter().filter(|a| !a.issues.is_empty()).count();
    tracing::info!(company, articles = articles.len(), degraded, "processed articles");
    Ok((pipeline, articles))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `fetch`: print annotated articles.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    company: &str,
    max_articles: Option<usize>,
) -> anyhow::Result<()> {
    let (_, articles) = load_articles(config, company, max_articles).await?;
    print_json(&articles)
}

/// `compare`: print the sentiment comparison.
pub(crate) async fn run_compare(
    config: &AppConfig,
    company: &str,
    max_articles: Option<usize>,
) -> anyhow::Result<()> {
    let (_, articles) = load_articles(config, company, max_articles).await?;
    print_json(&compare_sentiment(company.trim(), &articles))
}

/// `report`: print articles and the comparative report.
pub(crate) async fn run_report(
    config: &AppConfig,
    company: &str,
    max_articles: Option<usize>,
) -> anyhow::Result<()> {
    let (pipeline, articles) = load_articles(config, company, max_articles).await?;
    let report = pipeline.comparative_report(company.trim(), &articles).await;
    print_json(&ReportOutput {
        articles: &articles,
        report: &report,
    })
}
