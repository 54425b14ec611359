//! Topic-Balance stage: avoid several articles about the same watched subject.

use crate::models::Article;
use std::collections::HashSet;
use tracing::debug;

/// Walk `articles` in order and drop those that mention an already-covered
/// watch-list keyword.
///
/// An article is checked against its lowercased title and description. If any
/// keyword it mentions has been seen, the whole article is dropped, even when
/// it also mentions keywords that are still unseen, and nothing is marked.
/// Otherwise every keyword it mentions becomes seen and the article is kept.
/// Articles mentioning no keyword are always kept. The walk stops as soon as
/// `target` articles have been kept.
pub fn balance_topics(articles: Vec<Article>, watch_keywords: &[String], target: usize) -> Vec<Article> {
    let keywords: Vec<String> = watch_keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept = Vec::with_capacity(target.min(articles.len()));

    for article in articles {
        if kept.len() >= target {
            break;
        }

        let title = article.title.as_deref().unwrap_or_default().to_lowercase();
        let description = article.description().to_lowercase();
        let mentioned: Vec<&str> = keywords
            .iter()
            .map(String::as_str)
            .filter(|k| title.contains(k) || description.contains(k))
            .collect();

        if let Some(repeat) = mentioned.iter().find(|k| seen.contains(**k)) {
            debug!(url = %article.link(), keyword = %repeat, "Dropping article on an already covered topic");
            continue;
        }

        seen.extend(mentioned);
        kept.push(article);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title()).collect()
    }

    #[test]
    fn test_repeated_keyword_is_dropped() {
        let input = vec![
            Article::fixture("https://example.com/1", "Apple unveils new iPhone", ""),
            Article::fixture("https://example.com/2", "Rain expected this weekend", ""),
            Article::fixture("https://example.com/3", "Analysts react", "Apple shares fall"),
        ];
        let out = balance_topics(input, &keywords(&["apple"]), 10);
        assert_eq!(
            titles(&out),
            vec!["Apple unveils new iPhone", "Rain expected this weekend"]
        );
    }

    #[test]
    fn test_articles_without_keywords_are_kept() {
        let input: Vec<Article> = (0..5)
            .map(|i| Article::fixture(&format!("https://example.com/{i}"), "Local news", "Nothing watched"))
            .collect();
        let out = balance_topics(input, &keywords(&["apple", "tesla"]), 10);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_one_seen_keyword_drops_article_with_unseen_keyword() {
        let input = vec![
            Article::fixture("https://example.com/1", "Tesla earnings", ""),
            Article::fixture("https://example.com/2", "Tesla and Nvidia partner", ""),
            Article::fixture("https://example.com/3", "Nvidia chips sell out", ""),
        ];
        let out = balance_topics(input, &keywords(&["nvidia", "tesla"]), 10);
        // The dropped second article did not mark "nvidia" as seen.
        assert_eq!(titles(&out), vec!["Tesla earnings", "Nvidia chips sell out"]);
    }

    #[test]
    fn test_all_mentioned_keywords_are_marked() {
        let input = vec![
            Article::fixture("https://example.com/1", "OpenAI and Microsoft deal", ""),
            Article::fixture("https://example.com/2", "Microsoft layoffs", ""),
            Article::fixture("https://example.com/3", "OpenAI board", ""),
        ];
        let out = balance_topics(input, &keywords(&["openai", "microsoft"]), 10);
        assert_eq!(titles(&out), vec!["OpenAI and Microsoft deal"]);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let input = vec![
            Article::fixture("https://example.com/1", "CHINA trade talks", ""),
            Article::fixture("https://example.com/2", "Exports to china slow", ""),
        ];
        let out = balance_topics(input, &keywords(&["China"]), 10);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_never_exceeds_target() {
        let input: Vec<Article> = (0..25)
            .map(|i| Article::fixture(&format!("https://example.com/{i}"), &format!("Story {i}"), ""))
            .collect();
        let out = balance_topics(input, &keywords(&["apple"]), 10);
        assert_eq!(out.len(), 10);
        assert_eq!(out[9].title(), "Story 9");

        let out = balance_topics(Vec::new(), &keywords(&["apple"]), 10);
        assert!(out.is_empty());
    }

    #[test]
    fn test_stops_before_evaluating_remaining_articles() {
        let input = vec![
            Article::fixture("https://example.com/1", "One", ""),
            Article::fixture("https://example.com/2", "Two", ""),
            Article::fixture("https://example.com/3", "Apple", ""),
        ];
        let out = balance_topics(input, &keywords(&["apple"]), 2);
        assert_eq!(titles(&out), vec!["One", "Two"]);
    }
}
