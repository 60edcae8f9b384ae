//! News search RSS client and feed parser.

use newsdigest_core::FeedItem;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use reqwest::{Client, Url};

use crate::error::PipelineError;
use crate::types::parse_url;

/// Client for an RSS search endpoint (Google News by default).
pub struct FeedClient {
    client: Client,
    base_url: Url,
}

impl FeedClient {
    /// Creates a client that searches `feed_url?q=<company>`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if `feed_url` does not parse.
    pub fn new(client: Client, feed_url: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            client,
            base_url: parse_url(feed_url)?,
        })
    }

    /// Search URL for a company; the name is form-encoded so spaces become `+`.
    #[must_use]
    pub fn search_url(&self, company: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("q", company);
        url
    }

    /// Fetch the search feed for `company` and return at most `max_results` items.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Http`] on network failure.
    /// - [`PipelineError::Fetch`] if the endpoint answers with a non-success status.
    /// - [`PipelineError::Xml`] if the body is not well-formed XML.
    pub async fn fetch(
        &self,
        company: &str,
        max_results: usize,
    ) -> Result<Vec<FeedItem>, PipelineError> {
        let url = self.search_url(company);
        tracing::debug!(%url, "fetching news feed");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let items = parse_rss_feed(&body, max_results)?;
        tracing::debug!(company, count = items.len(), "parsed news feed");
        Ok(items)
    }
}

/// Parse an RSS XML body into [`FeedItem`]s.
///
/// Extracts `<title>`, `<link>`, and `<description>` from each `<item>`.
/// Items without a link are skipped. Stops after `max_results` items.
///
/// # Errors
///
/// Returns [`PipelineError::Xml`] if the XML is malformed.
pub fn parse_rss_feed(xml: &str, max_results: usize) -> Result<Vec<FeedItem>, PipelineError> {
    let mut items = Vec::new();
    if max_results == 0 {
        return Ok(items);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    description.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if link.is_empty() {
                        continue;
                    }
                    items.push(FeedItem {
                        title: collapse_whitespace(&title),
                        link: link.trim().to_string(),
                        snippet: clean_snippet(&description),
                    });
                    if items.len() >= max_results {
                        break;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = text_content(&e);
                    if in_description {
                        // Inline markup splits a description into several text nodes.
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        match current_tag.as_str() {
                            "title" => title = text,
                            "link" => link = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        description = text;
                    } else {
                        match current_tag.as_str() {
                            "title" => title = text,
                            "link" => link = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PipelineError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

/// Unescape XML text; HTML-only entities such as `&nbsp;` fall back to an HTML decoder.
fn text_content(e: &BytesText<'_>) -> String {
    match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(_) => {
            let raw = String::from_utf8_lossy(e);
            html_escape::decode_html_entities(&raw).into_owned()
        }
    }
}

/// Turn a description (usually escaped HTML) into plain snippet text.
pub(crate) fn clean_snippet(raw: &str) -> String {
    let stripped = strip_html(raw);
    let decoded = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Strip HTML tags from a string.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`, so text such
/// as `margins < 5%` is kept.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut chars = html.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!')) =>
            {
                in_tag = true;
            }
            '>' if in_tag => {
                out.push(' ');
                in_tag = false;
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
