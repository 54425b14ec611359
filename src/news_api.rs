//! News search client and topic fan-out.
//!
//! Talks to a NewsAPI-compatible service:
//!
//! | Endpoint | Used for |
//! |----------|----------|
//! | `/v2/everything` | one search per configured topic |
//! | `/v2/top-headlines` | single request when no topics are configured |
//!
//! Requests are issued one topic at a time, each with an explicit timeout.
//! A failing topic (transport error, timeout, HTTP error status, or an
//! in-band `"status": "error"` body) is logged and contributes no articles;
//! the rest of the run continues.

use crate::config::NewsApiConfig;
use crate::errors::FetchError;
use crate::models::{Article, SearchResponse};
use crate::utils::{base_url, truncate_for_log};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the news search endpoint.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    base_url: Url,
    api_key: String,
    config: NewsApiConfig,
}

impl NewsClient {
    pub fn new(config: &NewsApiConfig, api_key: String) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url(&config.base_url)?,
            api_key,
            config: config.clone(),
        })
    }

    /// Search recent articles for a single topic (plain term or `OR` expression).
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, topic: &str) -> Result<Vec<Article>, FetchError> {
        let query = [
            ("q", topic.to_string()),
            ("sortBy", self.config.sort_by.as_str().to_string()),
            ("language", self.config.language.clone()),
            ("pageSize", self.config.page_size.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        self.fetch("v2/everything", &query).await
    }

    /// Top headlines for the configured country.
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(&self) -> Result<Vec<Article>, FetchError> {
        let query = [
            ("country", self.config.country.clone()),
            ("pageSize", self.config.page_size.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        self.fetch("v2/top-headlines", &query).await
    }

    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Article>, FetchError> {
        let endpoint = self.base_url.join(path)?;
        // reqwest errors embed the request URL, which carries the API key.
        let resp = self
            .http
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;

        let parsed = serde_json::from_str::<SearchResponse>(&body);
        if !status.is_success() {
            return Err(match parsed {
                Ok(SearchResponse {
                    code: Some(code),
                    message,
                    ..
                }) => FetchError::Api {
                    code,
                    message: message.unwrap_or_default(),
                },
                _ => FetchError::Status {
                    status: status.as_u16(),
                    body: truncate_for_log(&body, 300),
                },
            });
        }

        let parsed = parsed.map_err(|e| FetchError::Status {
            status: status.as_u16(),
            body: format!("unreadable response ({e}): {}", truncate_for_log(&body, 300)),
        })?;
        if parsed.status != "ok" {
            return Err(FetchError::Api {
                code: parsed.code.unwrap_or_else(|| parsed.status.clone()),
                message: parsed.message.unwrap_or_default(),
            });
        }

        debug!(
            count = parsed.articles.len(),
            total_results = ?parsed.total_results,
            "News API response"
        );
        Ok(parsed.articles)
    }
}

/// Issue one search per topic, in order, and concatenate the results.
///
/// Provider order is kept within each topic. A failed topic is logged and
/// skipped. With no topics, a single top-headlines request is made instead.
#[instrument(level = "info", skip_all, fields(topics = topics.len()))]
pub async fn fan_out(client: &NewsClient, topics: &[String]) -> Vec<Article> {
    if topics.is_empty() {
        return match client.top_headlines().await {
            Ok(articles) => {
                info!(count = articles.len(), "Fetched top headlines");
                articles
            }
            Err(e) => {
                error!(error = %e, "Top headlines fetch failed");
                Vec::new()
            }
        };
    }

    let per_topic: Vec<Vec<Article>> = stream::iter(topics)
        .then(|topic| async move {
            match client.search(topic).await {
                Ok(articles) => {
                    info!(%topic, count = articles.len(), "Fetched topic");
                    articles
                }
                Err(e) => {
                    warn!(%topic, error = %e, "Topic fetch failed; contributing no articles");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    let articles: Vec<Article> = per_topic.into_iter().flatten().collect();
    info!(count = articles.len(), "Fan-out complete");
    articles
}
