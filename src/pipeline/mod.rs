//! Article selection pipeline.
//!
//! Each stage is a pure function from an ordered list of articles to a new
//! ordered list:
//!
//! 1. [`filter`]: drop banned sources and banned phrases
//! 2. [`dedup`]: one article per canonical URL, first occurrence wins
//! 3. [`balance`]: suppress repeated watch-list topics, up to a target count
//! 4. [`order`]: recency sort or shuffle, then cap
//!
//! [`select`] runs them in that order with the lists from [`SelectionConfig`].

pub mod balance;
pub mod dedup;
pub mod filter;
pub mod order;

use crate::config::SelectionConfig;
use crate::models::Article;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

pub use balance::balance_topics;
pub use dedup::dedup_by_url;
pub use filter::filter_banned;
pub use order::order_and_cap;

/// Run every selection stage over the fan-out output.
#[instrument(level = "info", skip_all, fields(raw = raw.len()))]
pub fn select(raw: Vec<Article>, config: &SelectionConfig) -> Vec<Article> {
    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    select_with_rng(raw, config, &mut rng)
}

/// [`select`] with a caller-provided random source for the shuffle policy.
pub fn select_with_rng(raw: Vec<Article>, config: &SelectionConfig, rng: &mut StdRng) -> Vec<Article> {
    let raw_count = raw.len();

    let filtered = filter_banned(raw, &config.banned_sources, &config.banned_phrases);
    let filtered_count = filtered.len();

    let unique = dedup_by_url(filtered);
    let unique_count = unique.len();

    let balanced = balance_topics(unique, &config.watch_keywords, config.target_count);
    let balanced_count = balanced.len();

    let selected = order_and_cap(balanced, config.order, config.max_articles, rng);

    info!(
        raw = raw_count,
        filtered = filtered_count,
        unique = unique_count,
        balanced = balanced_count,
        selected = selected.len(),
        order = ?config.order,
        "Selected articles"
    );
    selected
}
