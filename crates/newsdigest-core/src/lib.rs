//! Shared configuration and domain types for newsdigest.

mod app_config;
mod articles;
mod config;
mod error;
mod report;

pub use app_config::{AppConfig, Environment};
pub use articles::{Article, FeedItem, Sentiment, Stage, StageIssue};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use report::{ComparativeReport, SentimentComparison, SentimentDistribution};
