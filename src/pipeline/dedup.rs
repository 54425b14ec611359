//! Dedup stage: one article per canonical URL, first occurrence wins.

use crate::models::{Article, DEFAULT_URL};
use itertools::Itertools;
use url::Url;

/// Identity used to collapse duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    Url(String),
    /// Articles without a usable URL never collide with anything.
    Synthetic(usize),
}

/// Canonical form of an article URL, or `None` when there is nothing usable.
///
/// Absolute URLs are normalized by the URL parser (scheme and host case,
/// default ports, empty paths). Anything else that is not blank or the `#`
/// placeholder is compared as the trimmed string.
pub fn canonical_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == DEFAULT_URL {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Keep the first article for each distinct canonical URL, preserving order.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .enumerate()
        .unique_by(|(position, article)| match canonical_url(article.url.as_deref()) {
            Some(url) => Identity::Url(url),
            None => Identity::Synthetic(*position),
        })
        .map(|(_, article)| article)
        .collect()
}
