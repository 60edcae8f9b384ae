//! News analysis pipeline.
//!
//! Fetches a company's news search feed, summarizes each article through a
//! hosted model, scores sentiment with a local lexicon, ranks keyphrases by
//! embedding similarity, and renders a translated audio digest. Aggregates the
//! annotated articles into a comparative report.

pub mod embeddings;
pub mod error;
pub mod feed;
pub mod keywords;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod speech;
pub mod summarizer;
pub mod translate;
pub mod types;

pub use error::PipelineError;
pub use pipeline::NewsPipeline;
pub use report::compare_sentiment;
pub use scorer::analyze_sentiment;
pub use summarizer::SUMMARY_TOO_SHORT;
pub use types::{build_http_client, PipelineConfig};
