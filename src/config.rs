//! Run configuration: selection lists, endpoint settings and secrets.
//!
//! Everything except secrets can be supplied through an optional YAML file
//! (`--config digest.yaml`). Missing keys fall back to the compiled-in
//! defaults, so an empty file is a valid configuration. Secrets only come
//! from the command line or the environment.
//!
//! ```yaml
//! selection:
//!   topics: ["ai", "climate OR weather"]
//!   banned_phrases: ["quiz"]
//!   watch_keywords: ["apple", "openai"]
//!   order: recency
//! summary:
//!   fallback: source_text
//! publish:
//!   timeout_secs: 45
//! ```

use crate::errors::ConfigError;
use crate::utils::base_url;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// How the Sort/Cap stage orders the balanced selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Most recent `published_at` first; undated articles last.
    Recency,
    /// Uniformly random permutation.
    Shuffle,
    /// Keep the order produced by the earlier stages.
    Provider,
}

/// `sortBy` parameter of the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PublishedAt,
    Popularity,
    Relevancy,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Popularity => "popularity",
            SortBy::Relevancy => "relevancy",
        }
    }
}

/// What a failed summary is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFallback {
    /// The fixed text "Summary not available."
    Placeholder,
    /// The cleaned text that was sent for summarization.
    SourceText,
}

/// Fixed lists and counts that drive the selection pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// One search request is issued per topic, in this order. An empty list
    /// switches the fan-out to a single top-headlines request.
    pub topics: Vec<String>,
    pub banned_sources: Vec<String>,
    pub banned_phrases: Vec<String>,
    pub watch_keywords: Vec<String>,
    /// Topic-Balance stops accepting articles at this count.
    pub target_count: usize,
    /// Sort/Cap truncates to this count.
    pub max_articles: usize,
    pub order: OrderPolicy,
    /// Seed for [`OrderPolicy::Shuffle`]; unseeded runs are not reproducible.
    pub shuffle_seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            topics: to_strings(&[
                "artificial intelligence",
                "technology",
                "science",
                "business",
                "world",
                "health",
                "sports",
            ]),
            banned_sources: to_strings(&["[removed]", "biztoc.com", "yahoo entertainment"]),
            banned_phrases: to_strings(&[
                "quiz",
                "crossword",
                "horoscope",
                "wordle",
                "sponsored",
                "deal of the day",
                "[removed]",
            ]),
            watch_keywords: to_strings(&[
                "trump", "openai", "apple", "google", "microsoft", "nvidia", "tesla", "ukraine",
                "israel", "china",
            ]),
            target_count: 10,
            max_articles: 10,
            order: OrderPolicy::Recency,
            shuffle_seed: None,
        }
    }
}

/// News search endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub language: String,
    pub sort_by: SortBy,
    pub page_size: u32,
    /// Country for the top-headlines request used when no topics are set.
    pub country: String,
    pub timeout_secs: u64,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            language: "en".to_string(),
            sort_by: SortBy::PublishedAt,
            page_size: 5,
            country: "us".to_string(),
            timeout_secs: 30,
        }
    }
}

impl NewsApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Hosted summarization model settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub base_url: String,
    pub model: String,
    pub max_length: u32,
    pub min_length: u32,
    /// `content` shorter than this is ignored in favour of `description`.
    pub min_content_chars: usize,
    pub fallback: SummaryFallback,
    pub concurrency: usize,
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "facebook/bart-large-cnn".to_string(),
            max_length: 130,
            min_length: 40,
            min_content_chars: 100,
            fallback: SummaryFallback::Placeholder,
            concurrency: 4,
            timeout_secs: 60,
        }
    }
}

impl SummaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// WordPress publishing settings. The site and credentials are secrets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl PublishConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete non-secret configuration for one run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selection: SelectionConfig,
    pub news_api: NewsApiConfig,
    pub summary: SummaryConfig,
    pub publish: PublishConfig,
}

impl Config {
    /// Load the YAML file at `path` and validate it.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        info!(topics = config.selection.topics.len(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // serde_yaml reads an empty document as unit, not as an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.target_count == 0 {
            return Err(invalid("selection.target_count", "must be at least 1"));
        }
        if self.selection.max_articles == 0 {
            return Err(invalid("selection.max_articles", "must be at least 1"));
        }
        if !(1..=100).contains(&self.news_api.page_size) {
            return Err(invalid("news_api.page_size", "must be between 1 and 100"));
        }
        if self.news_api.timeout_secs == 0 {
            return Err(invalid("news_api.timeout_secs", "must be at least 1"));
        }
        if let Err(e) = base_url(&self.news_api.base_url) {
            return Err(invalid("news_api.base_url", &e.to_string()));
        }
        if let Err(e) = base_url(&self.summary.base_url) {
            return Err(invalid("summary.base_url", &e.to_string()));
        }
        if self.summary.min_length > self.summary.max_length {
            return Err(invalid(
                "summary.min_length",
                "must not exceed summary.max_length",
            ));
        }
        if self.summary.concurrency == 0 {
            return Err(invalid("summary.concurrency", "must be at least 1"));
        }
        if self.summary.timeout_secs == 0 {
            return Err(invalid("summary.timeout_secs", "must be at least 1"));
        }
        if self.publish.timeout_secs == 0 {
            return Err(invalid("publish.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Credentials for the WordPress publishing sink.
#[derive(Debug, Clone)]
pub struct WordPressCredentials {
    pub site_url: String,
    pub username: String,
    pub password: String,
}

/// Turn an optional secret into a value, or the fatal configuration error.
pub fn require_secret(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingSecret(name))
}
