//! JSON copy of the digest for other tools.
//!
//! Files are named by date: `{json_output_dir}/{YYYY-MM-DD}.json`. A later
//! run on the same day replaces the earlier file.

use crate::models::Digest;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the digest as pretty-printed JSON, creating the directory if needed.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_digest_json(digest: &Digest, json_output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(format!("{}.json", digest.generated_at.format("%Y-%m-%d")));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON digest");
    Ok(path)
}
