//! Turns the selected articles into a summarized [`Digest`].

use crate::config::{SummaryConfig, SummaryFallback};
use crate::models::{Article, Digest, DigestEntry};
use crate::summarize::{Summarize, SummaryLength, source_text};
use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

/// Shown when an article cannot be summarized.
pub const SUMMARY_PLACEHOLDER: &str = "Summary not available.";

/// Digest headline for a given day, e.g. `Pocket-Sized News Digest – May 06, 2025`.
pub fn digest_title(at: &DateTime<Local>) -> String {
    format!("Pocket-Sized News Digest – {}", at.format("%B %d, %Y"))
}

/// Summarize every selected article and assemble the digest.
///
/// Up to `config.concurrency` summaries are requested at once; entries keep
/// the selection order. Summarization failures never drop an article.
#[instrument(level = "info", skip_all, fields(articles = articles.len()))]
pub async fn build_digest<S: Summarize>(
    summarizer: &S,
    articles: &[Article],
    config: &SummaryConfig,
    generated_at: DateTime<Local>,
) -> Digest {
    let length = SummaryLength::from(config);

    let entries: Vec<DigestEntry> = stream::iter(articles.iter().enumerate())
        .map(|(i, article)| async move {
            let summary = summarize_article(summarizer, article, config, length).await;
            DigestEntry {
                index: i + 1,
                title: article.title().to_string(),
                source_name: article.source_name().to_string(),
                url: article.link().to_string(),
                summary,
            }
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    info!(entries = entries.len(), "Digest assembled");
    Digest {
        title: digest_title(&generated_at),
        generated_at,
        entries,
    }
}

async fn summarize_article<S: Summarize>(
    summarizer: &S,
    article: &Article,
    config: &SummaryConfig,
    length: SummaryLength,
) -> String {
    let text = source_text(article, config.min_content_chars);
    if text.is_empty() {
        debug!(url = %article.link(), "Nothing to summarize");
        return SUMMARY_PLACEHOLDER.to_string();
    }

    match summarizer.summarize(&text, length).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!(url = %article.link(), error = %e, "Summarization failed; using fallback");
            match config.fallback {
                SummaryFallback::Placeholder => SUMMARY_PLACEHOLDER.to_string(),
                SummaryFallback::SourceText => text,
            }
        }
    }
}
