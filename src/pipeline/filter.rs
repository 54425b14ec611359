//! Filter stage: drop articles from banned sources or mentioning banned phrases.

use crate::models::Article;
use tracing::debug;

/// Keep articles whose source is not banned and whose headline text does not
/// contain a banned phrase.
///
/// A source matches when its lowercased name equals a lowercased banned
/// source exactly. A phrase matches when it is a substring of the lowercased
/// `title + description`. Order is preserved and kept articles are untouched.
pub fn filter_banned(
    articles: Vec<Article>,
    banned_sources: &[String],
    banned_phrases: &[String],
) -> Vec<Article> {
    let sources = lowercase_all(banned_sources);
    let phrases = lowercase_all(banned_phrases);

    articles
        .into_iter()
        .filter(|article| {
            let source = article.source_name().to_lowercase();
            if sources.iter().any(|banned| *banned == source) {
                debug!(url = %article.link(), %source, "Dropping article from banned source");
                return false;
            }
            let text = article.headline_text();
            if let Some(phrase) = phrases.iter().find(|p| text.contains(p.as_str())) {
                debug!(url = %article.link(), %phrase, "Dropping article with banned phrase");
                return false;
            }
            true
        })
        .collect()
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
