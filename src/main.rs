//! # Pocket News Digest
//!
//! Fetches recent headlines for a list of topics from a NewsAPI-compatible
//! service, selects a balanced set of articles, summarizes each one with a
//! hosted summarization model and writes the result as a Jekyll Markdown post
//! or an HTML page, optionally publishing it to WordPress.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... pocket_news_digest -o ./_posts
//! ```
//!
//! ## Architecture
//!
//! 1. **Fan-out**: one search request per topic, failures isolated per topic
//! 2. **Selection**: filter banned content, dedup by URL, balance topics, sort and cap
//! 3. **Summarization**: one model call per selected article
//! 4. **Output**: digest file, optional JSON copy, optional WordPress post

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod digest;
mod errors;
mod models;
mod news_api;
mod outputs;
mod pipeline;
mod summarize;
mod utils;

use cli::Cli;
use config::Config;
use digest::build_digest;
use news_api::{NewsClient, fan_out};
use outputs::{file, html, json, wordpress};
use summarize::{HostedSummarizer, PassThrough};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("pocket_news_digest starting up");

    let args = Cli::parse();
    debug!(output_dir = %args.output_dir.display(), format = ?args.format, "Parsed CLI arguments");

    let result = run(&args).await;

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(?elapsed, secs = elapsed.as_secs(), "Execution complete"),
        Err(e) => error!(?elapsed, error = %e, "Execution aborted"),
    }
    result
}

#[instrument(level = "info", skip_all)]
async fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    // ---- Configuration (the only fatal error class) ----
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;
    let news_api_key = args.news_api_key()?;
    let wordpress_credentials = args.wordpress_credentials()?;

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // Build both HTTP clients before any request goes out.
    let client = NewsClient::new(&config.news_api, news_api_key)?;
    let summarizer = if args.no_summarize {
        None
    } else {
        Some(HostedSummarizer::new(&config.summary, args.hf_api_token.clone())?)
    };

    // ---- Fetch and select ----
    let raw = fan_out(&client, &config.selection.topics).await;
    let selected = pipeline::select(raw, &config.selection);
    if selected.is_empty() {
        warn!("No articles survived selection; the digest will be empty");
    }

    // ---- Summarize ----
    let generated_at = Local::now();
    let digest = match &summarizer {
        Some(summarizer) => build_digest(summarizer, &selected, &config.summary, generated_at).await,
        None => build_digest(&PassThrough, &selected, &config.summary, generated_at).await,
    };

    // ---- Outputs ----
    match file::write_digest(&digest, &args.output_dir, args.format).await {
        Ok(path) => info!(path = %path.display(), "Daily digest generated"),
        Err(e) => error!(path = %args.output_dir.display(), error = %e, "Failed writing digest file"),
    }

    if let Some(dir) = &args.json_output_dir {
        write_json_copy(&digest, dir).await;
    }

    if let Some(credentials) = wordpress_credentials {
        let published = match wordpress::WordPressPublisher::new(credentials, config.publish.timeout()) {
            Ok(publisher) => {
                wordpress::publish_digest(&publisher, &digest.title, &html::digest_body_html(&digest)).await
            }
            Err(e) => {
                error!(error = %e, "Cannot set up publishing; local digest is kept");
                false
            }
        };
        info!(published, "Publishing step finished");
    }

    Ok(())
}

async fn write_json_copy(digest: &models::Digest, dir: &Path) {
    if let Err(e) = json::write_digest_json(digest, dir).await {
        error!(path = %dir.display(), error = %e, "Failed to write JSON digest");
    }
}
