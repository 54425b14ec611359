//! Data models for fetched articles and the rendered digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A raw article record as returned by the news search API
//! - [`SearchResponse`]: The envelope around a page of search results
//! - [`Digest`] / [`DigestEntry`]: The summarized selection handed to the renderers
//!
//! Field names follow the NewsAPI JSON schema (camelCase on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used when an article has no title.
pub const DEFAULT_TITLE: &str = "No Title";
/// Placeholder used when an article has no source name.
pub const DEFAULT_SOURCE: &str = "Unknown Source";
/// Link target used when an article has no URL.
pub const DEFAULT_URL: &str = "#";

/// The publisher block nested in every NewsAPI article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A raw news article as returned by the search endpoint.
///
/// Every field is optional on the wire. Accessors such as [`Article::title`]
/// substitute the placeholders used in the rendered digest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Publication timestamp; malformed values are read as missing.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// The headline, or [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    /// The publisher name, or [`DEFAULT_SOURCE`].
    pub fn source_name(&self) -> &str {
        non_blank(self.source.as_ref().and_then(|s| s.name.as_deref())).unwrap_or(DEFAULT_SOURCE)
    }

    /// The article link, or [`DEFAULT_URL`].
    pub fn link(&self) -> &str {
        non_blank(self.url.as_deref()).unwrap_or(DEFAULT_URL)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Lowercased title followed directly by the lowercased description.
    ///
    /// Missing fields contribute nothing (no placeholder text), so a banned
    /// phrase can never match the placeholder itself.
    pub fn headline_text(&self) -> String {
        let mut text = self.title.as_deref().unwrap_or_default().to_lowercase();
        text.push_str(&self.description().to_lowercase());
        text
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// Response envelope of the `/v2/everything` and `/v2/top-headlines` endpoints.
///
/// Errors are reported in-band with `status == "error"` plus `code` and `message`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One summarized article in the digest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestEntry {
    /// 1-based position in the digest.
    pub index: usize,
    pub title: String,
    pub source_name: String,
    pub url: String,
    pub summary: String,
}

/// The final summarized selection, ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub title: String,
    pub generated_at: DateTime<chrono::Local>,
    pub entries: Vec<DigestEntry>,
}

#[cfg(test)]
impl Article {
    /// Minimal article for pipeline tests.
    pub fn fixture(url: &str, title: &str, description: &str) -> Self {
        Article {
            source: Some(ArticleSource {
                id: None,
                name: Some("Example Wire".to_string()),
            }),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "source": { "id": "bbc-news", "name": "BBC News" },
            "author": "Jane Doe",
            "title": "Markets rally",
            "description": "Stocks climbed on Tuesday.",
            "url": "https://www.bbc.co.uk/news/1",
            "urlToImage": null,
            "publishedAt": "2024-01-03T10:15:00Z",
            "content": "Stocks climbed on Tuesday after... [+1234 chars]"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title(), "Markets rally");
        assert_eq!(article.source_name(), "BBC News");
        assert_eq!(article.link(), "https://www.bbc.co.uk/news/1");
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2024-01-03T10:15:00+00:00"
        );
    }

    #[test]
    fn test_article_placeholders() {
        let article: Article = serde_json::from_str(r#"{ "source": { "id": null, "name": null } }"#).unwrap();
        assert_eq!(article.title(), DEFAULT_TITLE);
        assert_eq!(article.source_name(), DEFAULT_SOURCE);
        assert_eq!(article.link(), DEFAULT_URL);
        assert_eq!(article.description(), "");
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_malformed_timestamp_is_missing() {
        let article: Article =
            serde_json::from_str(r#"{ "title": "x", "publishedAt": "yesterday" }"#).unwrap();
        assert!(article.published_at.is_none());
        assert_eq!(article.title(), "x");
    }

    #[test]
    fn test_headline_text_lowercases_and_concatenates() {
        let article = Article::fixture("https://example.com/a", "Big NEWS", " Today");
        assert_eq!(article.headline_text(), "big news today");

        let bare = Article::default();
        assert_eq!(bare.headline_text(), "");
    }

    #[test]
    fn test_search_response_error_envelope() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "error");
        assert_eq!(resp.code.as_deref(), Some("apiKeyInvalid"));
        assert!(resp.articles.is_empty());
    }

    #[test]
    fn test_digest_entry_serialization() {
        let entry = DigestEntry {
            index: 1,
            title: "Title".to_string(),
            source_name: "Wire".to_string(),
            url: "https://example.com".to_string(),
            summary: "Summary".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"source_name\":\"Wire\""));
    }
}
