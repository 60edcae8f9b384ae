use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search";
pub(crate) const DEFAULT_SUMMARIZER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";
pub(crate) const DEFAULT_EMBEDDINGS_URL: &str = "http://localhost:8080";
pub(crate) const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub(crate) const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; a variable that is present must parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_blank = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(var, "value must not be blank".to_string()));
        }
        Ok(trimmed.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "timeout must be at least 1 second".to_string()));
        }
        Ok(value)
    };

    let parse_count = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "value must be at least 1".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("NEWSDIGEST_ENV", "development"));
    let bind_addr = parse_addr("NEWSDIGEST_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("NEWSDIGEST_LOG_LEVEL", "info");
    let audio_dir = PathBuf::from(non_blank("NEWSDIGEST_AUDIO_DIR", "./tts_audio")?);

    let feed_url = non_blank("NEWSDIGEST_FEED_URL", DEFAULT_FEED_URL)?;
    let summarizer_url = non_blank("NEWSDIGEST_SUMMARIZER_URL", DEFAULT_SUMMARIZER_URL)?;
    let summarizer_token = lookup("NEWSDIGEST_SUMMARIZER_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let embeddings_url = non_blank("NEWSDIGEST_EMBEDDINGS_URL", DEFAULT_EMBEDDINGS_URL)?;
    let translate_url = non_blank("NEWSDIGEST_TRANSLATE_URL", DEFAULT_TRANSLATE_URL)?;
    let tts_url = non_blank("NEWSDIGEST_TTS_URL", DEFAULT_TTS_URL)?;
    let target_language = non_blank("NEWSDIGEST_TARGET_LANGUAGE", "hi")?;

    let default_max_articles = parse_count("NEWSDIGEST_DEFAULT_MAX_ARTICLES", "5")?;
    let topics_per_article = parse_count("NEWSDIGEST_TOPICS_PER_ARTICLE", "3")?;
    let request_timeout_secs = parse_secs("NEWSDIGEST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEWSDIGEST_USER_AGENT", "newsdigest/0.1 (news-summaries)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        audio_dir,
        feed_url,
        summarizer_url,
        summarizer_token,
        embeddings_url,
        translate_url,
        tts_url,
        target_language,
        default_max_articles,
        topics_per_article,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
