//! Sort/Cap stage.

use crate::config::OrderPolicy;
use crate::models::Article;
use rand::Rng;
use rand::seq::SliceRandom;

/// Order the selection according to `policy`, then keep the first `max`.
///
/// [`OrderPolicy::Recency`] is a stable sort on `published_at`, newest first,
/// with undated articles after every dated one. `rng` is only consulted by
/// [`OrderPolicy::Shuffle`].
pub fn order_and_cap<R: Rng + ?Sized>(
    mut articles: Vec<Article>,
    policy: OrderPolicy,
    max: usize,
    rng: &mut R,
) -> Vec<Article> {
    match policy {
        OrderPolicy::Recency => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        OrderPolicy::Shuffle => articles.shuffle(rng),
        OrderPolicy::Provider => {}
    }
    articles.truncate(max);
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn dated(url: &str, published_at: Option<DateTime<Utc>>) -> Article {
        let mut article = Article::fixture(url, url, "");
        article.published_at = published_at;
        article
    }

    fn day(d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
    }

    fn urls(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.link()).collect()
    }

    #[test]
    fn test_recency_newest_first() {
        let input = vec![dated("jan1", day(1)), dated("jan3", day(3)), dated("jan2", day(2))];
        let out = order_and_cap(input, OrderPolicy::Recency, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(urls(&out), vec!["jan3", "jan2", "jan1"]);
    }

    #[test]
    fn test_recency_ties_keep_input_order_and_undated_go_last() {
        let input = vec![
            dated("undated", None),
            dated("a", day(2)),
            dated("b", day(2)),
            dated("old", day(1)),
            dated("c", day(2)),
        ];
        let out = order_and_cap(input, OrderPolicy::Recency, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(urls(&out), vec!["a", "b", "c", "old", "undated"]);
    }

    #[test]
    fn test_cap_truncates() {
        let input: Vec<Article> = (1..=15).map(|d| dated(&format!("d{d}"), day(d))).collect();
        let out = order_and_cap(input, OrderPolicy::Recency, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(out.len(), 10);
        assert_eq!(out[0].link(), "d15");
        assert_eq!(out[9].link(), "d6");
    }

    #[test]
    fn test_shuffle_keeps_membership() {
        let input: Vec<Article> = (0..8).map(|i| dated(&format!("u{i}"), None)).collect();
        let expected: HashSet<String> = input.iter().map(|a| a.link().to_string()).collect();

        let out = order_and_cap(input, OrderPolicy::Shuffle, 10, &mut rand::rng());
        let got: HashSet<String> = out.iter().map(|a| a.link().to_string()).collect();
        assert_eq!(out.len(), 8);
        assert_eq!(got, expected);
    }

    #[test]
    fn test_shuffle_then_cap() {
        let input: Vec<Article> = (0..20).map(|i| dated(&format!("u{i}"), None)).collect();
        let all: HashSet<String> = input.iter().map(|a| a.link().to_string()).collect();

        let out = order_and_cap(input, OrderPolicy::Shuffle, 10, &mut rand::rng());
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|a| all.contains(a.link())));
    }

    #[test]
    fn test_provider_keeps_order() {
        let input = vec![dated("x", day(1)), dated("y", day(3)), dated("z", day(2))];
        let out = order_and_cap(input, OrderPolicy::Provider, 2, &mut StdRng::seed_from_u64(1));
        assert_eq!(urls(&out), vec!["x", "y"]);
    }
}
