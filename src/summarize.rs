//! Article summarization through a hosted model.
//!
//! The pipeline only depends on the [`Summarize`] trait:
//! - [`HostedSummarizer`]: Hugging Face style inference endpoint
//!   (`POST {base}/models/{model}`), e.g. `facebook/bart-large-cnn`
//! - [`PassThrough`]: returns the input unchanged, used for `--no-summarize`
//!
//! No retries are attempted. A failed call surfaces as
//! [`SummarizeError`] and the caller decides on the fallback text.

use crate::config::SummaryConfig;
use crate::errors::SummarizeError;
use crate::models::Article;
use crate::utils::{base_url, clean_text, truncate_for_log};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// Length bounds handed to the model, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryLength {
    pub max_length: u32,
    pub min_length: u32,
}

impl From<&SummaryConfig> for SummaryLength {
    fn from(config: &SummaryConfig) -> Self {
        Self {
            max_length: config.max_length,
            min_length: config.min_length,
        }
    }
}

/// Something that can condense a piece of text.
pub trait Summarize {
    /// Summarize `text` within `length`. Sampling is always disabled.
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizeError>;
}

/// Returns the text it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Summarize for PassThrough {
    async fn summarize(&self, text: &str, _length: SummaryLength) -> Result<String, SummarizeError> {
        Ok(text.to_string())
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Summaries(Vec<SummaryOutput>),
    Failure { error: String },
}

/// Client for a hosted summarization model.
#[derive(Debug, Clone)]
pub struct HostedSummarizer {
    http: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HostedSummarizer {
    pub fn new(config: &SummaryConfig, token: Option<String>) -> Result<Self, SummarizeError> {
        let base = base_url(&config.base_url)
            .map_err(|e| SummarizeError::Unavailable(format!("invalid base URL: {e}")))?;
        let endpoint = base
            .join(&format!("models/{}", config.model))
            .map_err(|e| SummarizeError::Unavailable(format!("invalid model path: {e}")))?;
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }
}

impl Summarize for HostedSummarizer {
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint, chars = text.chars().count()))]
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizeError> {
        let t0 = Instant::now();
        let body = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                max_length: length.max_length,
                min_length: length.min_length,
                do_sample: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await?;
        let status = resp.status();
        let raw = resp.text().await?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, %status, "Summarization call returned");

        match serde_json::from_str::<InferenceResponse>(&raw) {
            Ok(InferenceResponse::Failure { error }) => Err(SummarizeError::Unavailable(error)),
            Ok(InferenceResponse::Summaries(_)) if !status.is_success() => Err(
                SummarizeError::Unavailable(format!("status {status}")),
            ),
            Ok(InferenceResponse::Summaries(outputs)) => outputs
                .into_iter()
                .map(|o| o.summary_text.trim().to_string())
                .find(|s| !s.is_empty())
                .ok_or_else(|| SummarizeError::Unavailable("empty summary".to_string())),
            Err(e) => {
                warn!(%status, error = %e, body = %truncate_for_log(&raw, 200), "Unreadable summarization response");
                Err(SummarizeError::Unavailable(format!("status {status}: unreadable response")))
            }
        }
    }
}

/// The text worth summarizing for an article.
///
/// The body (`content`) is preferred when, once cleaned, it is longer than
/// `min_content_chars`; otherwise the description is used. Both are stripped
/// of markup and of the `[+N chars]` truncation marker.
pub fn source_text(article: &Article, min_content_chars: usize) -> String {
    let content = clean_text(article.content());
    if content.chars().count() > min_content_chars {
        content
    } else {
        clean_text(article.description())
    }
}
