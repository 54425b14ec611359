//! Local file sink.

use super::OutputFormat;
use super::{html, markdown};
use crate::models::Digest;
use crate::utils::slugify_title;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Jekyll-compliant file name, e.g.
/// `2025-09-06-pocket-sized-news-digest-september-06-2025.md`.
pub fn digest_filename(digest: &Digest, format: OutputFormat) -> String {
    format!(
        "{}-{}.{}",
        digest.generated_at.format("%Y-%m-%d"),
        slugify_title(&digest.title),
        format.extension()
    )
}

/// Render the digest in the requested format.
pub fn render(digest: &Digest, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        OutputFormat::Markdown => markdown::digest_to_markdown(digest)?,
        OutputFormat::Html => html::digest_to_html(digest),
    })
}

/// Render and write the digest into `output_dir`, returning the file path.
///
/// The directory must already exist (see `utils::ensure_writable_dir`). An
/// existing file for the same day is overwritten.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), ?format))]
pub async fn write_digest(
    digest: &Digest,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, Box<dyn Error>> {
    let rendered = render(digest, format)?;
    let path = output_dir.join(digest_filename(digest, format));
    fs::write(&path, rendered).await?;
    info!(path = %path.display(), entries = digest.entries.len(), "Wrote digest");
    Ok(path)
}
