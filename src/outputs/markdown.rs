//! Markdown rendering as a Jekyll post.
//!
//! ```text
//! ---
//! layout: post
//! title: Pocket-Sized News Digest – May 06, 2025
//! date: 2025-05-06T07:30:00+02:00
//! ---
//!
//! Your daily dose of ...
//!
//! ---
//!
//! ### 1. Headline
//! > **Source:** [Publisher](https://...)
//!
//! Summary paragraph.
//! ```

use crate::models::Digest;
use serde::Serialize;
use std::fmt::Write;

const INTRO: &str = "Your daily dose of the most important news, summarized and delivered straight to you.";
const EMPTY_NOTICE: &str = "No articles could be fetched today. Please check the news API.";

#[derive(Serialize)]
struct FrontMatter<'a> {
    layout: &'a str,
    title: &'a str,
    date: String,
}

/// Render the digest as a Markdown document with YAML front matter.
pub fn digest_to_markdown(digest: &Digest) -> Result<String, serde_yaml::Error> {
    let front_matter = serde_yaml::to_string(&FrontMatter {
        layout: "post",
        title: &digest.title,
        date: digest.generated_at.to_rfc3339(),
    })?;

    let mut md = String::new();
    // Writing into a String cannot fail.
    let _ = write!(md, "---\n{front_matter}---\n\n{INTRO}\n\n---\n\n");

    if digest.entries.is_empty() {
        let _ = writeln!(md, "{EMPTY_NOTICE}\n");
        return Ok(md);
    }

    for entry in &digest.entries {
        let _ = writeln!(md, "### {}. {}", entry.index, entry.title);
        let _ = writeln!(
            md,
            "> **Source:** [{}]({})\n",
            escape_link_text(&entry.source_name),
            entry.url.replace(' ', "%20")
        );
        let _ = writeln!(md, "{}\n", entry.summary);
    }
    Ok(md)
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DigestEntry;
    use chrono::{Local, TimeZone};

    fn digest(entries: Vec<DigestEntry>) -> Digest {
        Digest {
            title: "Pocket-Sized News Digest – September 06, 2025".to_string(),
            generated_at: Local.with_ymd_and_hms(2025, 9, 6, 7, 30, 0).unwrap(),
            entries,
        }
    }

    fn entry(index: usize, title: &str) -> DigestEntry {
        DigestEntry {
            index,
            title: title.to_string(),
            source_name: "Example Wire".to_string(),
            url: format!("https://example.com/{index}"),
            summary: format!("Summary {index}."),
        }
    }

    fn front_matter_of(md: &str) -> serde_yaml::Value {
        let yaml = md.trim_start_matches("---\n").split("---\n").next().unwrap();
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_front_matter() {
        let md = digest_to_markdown(&digest(vec![])).unwrap();
        assert!(md.starts_with("---\nlayout: post\n"));
        assert!(md.contains(INTRO));

        let parsed = front_matter_of(&md);
        assert_eq!(parsed["layout"].as_str(), Some("post"));
        assert_eq!(
            parsed["title"].as_str(),
            Some("Pocket-Sized News Digest – September 06, 2025")
        );
        assert!(parsed["date"].as_str().unwrap().starts_with("2025-09-06T07:30:00"));
    }

    #[test]
    fn test_entries_rendered_in_order() {
        let md = digest_to_markdown(&digest(vec![entry(1, "First"), entry(2, "Second")])).unwrap();
        let first = md.find("### 1. First").unwrap();
        let second = md.find("### 2. Second").unwrap();
        assert!(first < second);
        assert!(md.contains("> **Source:** [Example Wire](https://example.com/1)\n\nSummary 1.\n"));
        assert!(!md.contains(EMPTY_NOTICE));
    }

    #[test]
    fn test_empty_digest_notice() {
        let md = digest_to_markdown(&digest(vec![])).unwrap();
        assert!(md.contains(EMPTY_NOTICE));
        assert!(!md.contains("###"));
    }

    #[test]
    fn test_title_with_quotes_keeps_front_matter_valid() {
        let mut d = digest(vec![]);
        d.title = "Digest: \"quoted\" edition".to_string();
        let md = digest_to_markdown(&d).unwrap();
        let parsed = front_matter_of(&md);
        assert_eq!(parsed["title"].as_str(), Some("Digest: \"quoted\" edition"));
    }
}
