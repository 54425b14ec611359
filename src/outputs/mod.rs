//! Digest rendering and output sinks.
//!
//! # Submodules
//!
//! - [`markdown`]: Jekyll post with YAML front matter
//! - [`html`]: standalone styled page, or a body fragment for publishing
//! - [`file`]: writes the rendered digest under a Jekyll-style file name
//! - [`json`]: optional machine-readable copy of the digest
//! - [`wordpress`]: publishes the digest through the WordPress REST API
//!
//! # Output Structure
//!
//! ```text
//! _posts/
//! ├── 2025-09-06-pocket-sized-news-digest-september-06-2025.md
//! └── 2025-09-06.json        # with --json-output-dir _posts
//! ```

use clap::ValueEnum;

pub mod file;
pub mod html;
pub mod json;
pub mod markdown;
pub mod wordpress;

/// Format of the local digest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}
