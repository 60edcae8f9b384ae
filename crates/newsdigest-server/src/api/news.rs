use axum::{
    extract::{Query, State},
    Extension, Json,
};
use newsdigest_core::{Article, ComparativeReport, SentimentComparison};
use newsdigest_pipeline::{compare_sentiment, PipelineError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_max_articles, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct NewsQuery {
    pub company: Option<String>,
    pub max_articles: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ReportResponse {
    pub articles: Vec<Article>,
    pub report: ComparativeReport,
}

fn map_pipeline_error(request_id: String, company: &str, error: &PipelineError) -> ApiError {
    tracing::error!(company, error = %error, "news feed fetch failed");
    ApiError::new(request_id, "fetch_failed", "Failed to fetch news articles.")
}

/// Validate the query and run the pipeline. Returns the trimmed company name.
async fn load_articles(
    state: &AppState,
    req_id: &RequestId,
    query: NewsQuery,
) -> Result<(String, Vec<Article>), ApiError> {
    let company = query.company.as_deref().map(str::trim).unwrap_or_default();
    if company.is_empty() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "company must not be blank",
        ));
    }

    let max_articles =
        normalize_max_articles(query.max_articles.as_deref(), state.default_max_articles)
            .map_err(|e| {
                ApiError::new(
                    req_id.0.clone(),
                    "validation_error",
                    format!("max_articles must be an integer: {e}"),
                )
            })?;
    let articles = state
        .pipeline
        .process_company(company, max_articles)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), company, &e))?;

    Ok((company.to_string(), articles))
}

pub(super) async fn fetch_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let (_, articles) = load_articles(&state, &req_id, query).await?;
    Ok(Json(articles))
}

pub(super) async fn compare_sentiment_handler(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<SentimentComparison>, ApiError> {
    let (company, articles) = load_articles(&state, &req_id, query).await?;
    Ok(Json(compare_sentiment(&company, &articles)))
}

pub(super) async fn comparative_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let (company, articles) = load_articles(&state, &req_id, query).await?;
    let report = state.pipeline.comparative_report(&company, &articles).await;
    Ok(Json(ReportResponse { articles, report }))
}
