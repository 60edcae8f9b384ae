mod news;

use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use newsdigest_pipeline::NewsPipeline;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const MAX_ARTICLES_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<NewsPipeline>,
    pub default_max_articles: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "fetch_failed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Requested article count, defaulted and clamped to `1..=50`.
///
/// A missing or blank value takes `default`.
///
/// # Errors
///
/// Returns the parse error when `requested` is not an integer.
pub(super) fn normalize_max_articles(
    requested: Option<&str>,
    default: usize,
) -> Result<usize, std::num::ParseIntError> {
    let default = i64::try_from(default).unwrap_or(MAX_ARTICLES_LIMIT);
    let requested = match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<i64>()?,
        None => default,
    };
    let clamped = requested.clamp(1, MAX_ARTICLES_LIMIT);
    Ok(usize::try_from(clamped).unwrap_or(1))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState, audio_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/health", get(health))
        .route("/fetch-news/", get(news::fetch_news))
        .route("/compare-sentiment/", get(news::compare_sentiment_handler))
        .route("/comparative-report/", get(news::comparative_report))
        .nest_service("/audio", ServeDir::new(audio_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use newsdigest_pipeline::PipelineConfig;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONE_ITEM_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item>
    <title>Acme wins award</title>
    <link>https://news.example.com/acme-award</link>
    <description>Acme wins design award</description>
  </item>
</channel></rss>"#;

    fn test_app(server: &MockServer, audio_dir: &Path) -> Router {
        let base = server.uri();
        let config = PipelineConfig {
            feed_url: format!("{base}/rss/search"),
            summarizer_url: format!("{base}/summarize"),
            summarizer_token: None,
            embeddings_url: format!("{base}/tei"),
            translate_url: format!("{base}/translate"),
            tts_url: format!("{base}/tts"),
            target_language: "hi".to_string(),
            audio_dir: audio_dir.to_path_buf(),
            audio_url_prefix: "/audio".to_string(),
            topics_per_article: 3,
            request_timeout_secs: 5,
            user_agent: "newsdigest-test".to_string(),
        };
        let pipeline = NewsPipeline::new(&config).expect("pipeline");
        build_app(
            AppState {
                pipeline: Arc::new(pipeline),
                default_max_articles: 5,
            },
            audio_dir,
        )
    }

    async fn mount_feed(server: &MockServer, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/rss/search"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn normalize_max_articles_applies_defaults_and_bounds() {
        let normalize = |requested, default| {
            normalize_max_articles(requested, default).expect("numeric input")
        };
        assert_eq!(normalize(None, 5), 5);
        assert_eq!(normalize(Some(""), 5), 5);
        assert_eq!(normalize(Some("0"), 5), 1);
        assert_eq!(normalize(Some("-3"), 5), 1);
        assert_eq!(normalize(Some("1000"), 5), 50);
        assert_eq!(normalize(Some(" 12 "), 5), 12);
        assert_eq!(normalize(None, 500), 50);
    }

    #[test]
    fn normalize_max_articles_rejects_non_numeric() {
        assert!(normalize_max_articles(Some("abc"), 5).is_err());
        assert!(normalize_max_articles(Some("2.5"), 5).is_err());
    }

    #[tokio::test]
    async fn non_numeric_max_articles_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ONE_ITEM_FEED))
            .expect(0)
            .mount(&server)
            .await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        for uri in [
            "/fetch-news/?company=Acme&max_articles=abc",
            "/compare-sentiment/?company=Acme&max_articles=many",
            "/comparative-report/?company=Acme&max_articles=1.5",
        ] {
            let (status, json) = get_json(test_app(&server, audio_dir.path()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["error"]["code"], "validation_error", "{uri}");
            assert!(json["meta"]["request_id"].is_string(), "{uri}");
        }
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = ApiError::new("req-1", "fetch_failed", "upstream").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let response = ApiError::new("req-1", "boom", "unknown").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_returns_ok_and_echoes_request_id() {
        let server = MockServer::start().await;
        let audio_dir = tempfile::tempdir().expect("tempdir");
        let app = test_app(&server, audio_dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(REQUEST_ID_HEADER, "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-abc")
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-abc");
    }

    #[tokio::test]
    async fn generated_request_id_is_set() {
        let server = MockServer::start().await;
        let audio_dir = tempfile::tempdir().expect("tempdir");
        let response = test_app(&server, audio_dir.path())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("x-request-id header");
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }

    #[tokio::test]
    async fn blank_company_is_rejected() {
        let server = MockServer::start().await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        for uri in [
            "/fetch-news/?company=%20%20",
            "/fetch-news/",
            "/compare-sentiment/?company=",
            "/comparative-report/?company=",
        ] {
            let (status, json) = get_json(test_app(&server, audio_dir.path()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["error"]["code"], "validation_error", "{uri}");
        }
    }

    #[tokio::test]
    async fn feed_failure_returns_bad_gateway() {
        let server = MockServer::start().await;
        mount_feed(&server, 503, "unavailable").await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        let (status, json) =
            get_json(test_app(&server, audio_dir.path()), "/fetch-news/?company=Acme").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "fetch_failed");
        assert_eq!(json["error"]["message"], "Failed to fetch news articles.");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn fetch_news_returns_article_array() {
        let server = MockServer::start().await;
        mount_feed(&server, 200, ONE_ITEM_FEED).await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        let (status, json) = get_json(
            test_app(&server, audio_dir.path()),
            "/fetch-news/?company=Acme&max_articles=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let articles = json.as_array().expect("array body");
        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article["title"], "Acme wins award");
        assert_eq!(article["link"], "https://news.example.com/acme-award");
        assert_eq!(article["summary"], newsdigest_pipeline::SUMMARY_TOO_SHORT);
        assert!(article["sentiment"].is_string());
        assert!(article["topics"].is_array());
        // Embedding, translation and speech services are not mocked here.
        assert!(article["audio"].is_null());
        assert!(article["issues"].as_array().is_some_and(|i| !i.is_empty()));
    }

    #[tokio::test]
    async fn compare_sentiment_returns_distribution() {
        let server = MockServer::start().await;
        mount_feed(&server, 200, ONE_ITEM_FEED).await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        let (status, json) = get_json(
            test_app(&server, audio_dir.path()),
            "/compare-sentiment/?company=%20Acme%20",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["company"], "Acme");
        assert_eq!(json["total_articles"], 1);
        let dist = &json["sentiment_distribution"];
        let total = dist["Positive"].as_u64().expect("Positive")
            + dist["Negative"].as_u64().expect("Negative")
            + dist["Neutral"].as_u64().expect("Neutral");
        assert_eq!(total, 1);
        assert!(json["analysis_summary"]
            .as_str()
            .is_some_and(|s| s.starts_with("Acme has ")));
    }

    #[tokio::test]
    async fn comparative_report_wraps_articles_and_report() {
        let server = MockServer::start().await;
        mount_feed(&server, 200, ONE_ITEM_FEED).await;
        let audio_dir = tempfile::tempdir().expect("tempdir");

        let (status, json) = get_json(
            test_app(&server, audio_dir.path()),
            "/comparative-report/?company=Acme",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["articles"].as_array().map(Vec::len), Some(1));
        let report = &json["report"];
        assert_eq!(report["company"], "Acme");
        assert_eq!(report["total_articles"], 1);
        assert!(report["common_topics"].is_array());
        assert_eq!(
            report["unique_topics_per_article"].as_array().map(Vec::len),
            Some(1)
        );
        assert!(report["overall_sentiment"].is_string());
    }

    #[tokio::test]
    async fn index_serves_page() {
        let server = MockServer::start().await;
        let audio_dir = tempfile::tempdir().expect("tempdir");
        let response = test_app(&server, audio_dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let html = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(html.contains("Get News Summary"));
    }

    #[tokio::test]
    async fn audio_directory_is_served() {
        let server = MockServer::start().await;
        let audio_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(audio_dir.path().join("Acme_news_1.mp3"), b"ID3data").expect("write");

        let response = test_app(&server, audio_dir.path())
            .oneshot(
                Request::builder()
                    .uri("/audio/Acme_news_1.mp3")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        assert_eq!(&body[..], b"ID3data");
    }
}
