//! Utility functions for text cleanup, slugs, logging and the file system.
//!
//! - Text cleanup for article bodies returned by the news API
//! - Slugification for Jekyll file names
//! - String truncation for logging
//! - Base URL parsing for HTTP clients
//! - File system validation for output directories

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// NewsAPI cuts `content` short and appends e.g. `… [+2817 chars]`.
static TRUNCATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*…?\s*\[\+\d+\s+chars\]").unwrap());

/// Make API-provided text fit for summarization and display.
///
/// Removes the truncation marker, strips HTML markup (decoding entities on
/// the way), and collapses whitespace.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("<p>Hi &amp; bye</p> [+12 chars]"), "Hi & bye");
/// ```
pub fn clean_text(raw: &str) -> String {
    let without_marker = TRUNCATION_MARKER.replace_all(raw, "");
    let plain = if without_marker.contains('<') || without_marker.contains('&') {
        Html::parse_fragment(&without_marker)
            .root_element()
            .text()
            .collect::<String>()
    } else {
        without_marker.into_owned()
    };
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters and get `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Convert a title to a URL-friendly slug.
///
/// Lowercases, drops anything that is not alphanumeric, a space or a hyphen,
/// then joins the remaining words with single hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Hello World"), "hello-world");
/// assert_eq!(slugify_title("Digest – May 6, 2025"), "digest-may-6-2025");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .split(|c: char| c == ' ' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a service base URL so that relative joins append to its path.
///
/// `Url::join` replaces the last path segment unless the path ends in `/`,
/// so `https://host/prefix` is turned into `https://host/prefix/`.
pub fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
