//! HTML rendering: a standalone page for local files and a body fragment for
//! publishing.

use crate::models::Digest;
use quick_xml::escape::escape;
use std::fmt::Write;

const STYLE: &str = r#"body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; background: #f4f5f7; color: #1f2933; margin: 0; padding: 2rem 1rem; }
main { max-width: 760px; margin: 0 auto; }
h1 { font-size: 1.8rem; margin-bottom: 0.25rem; }
.generated { color: #616e7c; margin-top: 0; }
article { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); padding: 1rem 1.25rem; margin: 1rem 0; }
article h2 { font-size: 1.15rem; margin: 0 0 0.4rem; }
.source { font-size: 0.9rem; color: #52606d; margin: 0 0 0.6rem; }
.source a { color: #2680c2; text-decoration: none; }"#;

const EMPTY_NOTICE: &str = "No articles could be fetched today. Please check the news API.";

/// Render the digest as a complete HTML document.
pub fn digest_to_html(digest: &Digest) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<main>\n\
         <h1>{title}</h1>\n<p class=\"generated\">Generated {generated}</p>\n{body}</main>\n</body>\n</html>\n",
        title = escape(digest.title.as_str()),
        generated = digest.generated_at.format("%Y-%m-%d %H:%M"),
        body = digest_body_html(digest),
    );
    html
}

/// Render only the article cards, for embedding in a blog post.
pub fn digest_body_html(digest: &Digest) -> String {
    if digest.entries.is_empty() {
        return format!("<p>{EMPTY_NOTICE}</p>\n");
    }

    let mut html = String::new();
    for entry in &digest.entries {
        let _ = write!(
            html,
            "<article>\n<h2>{index}. {title}</h2>\n\
             <p class=\"source\">Source: <a href=\"{href}\">{source}</a></p>\n\
             <p>{summary}</p>\n</article>\n",
            index = entry.index,
            title = escape(entry.title.as_str()),
            href = escape(safe_href(&entry.url)),
            source = escape(entry.source_name.as_str()),
            summary = escape(entry.summary.as_str()),
        );
    }
    html
}

/// Only http(s) links are emitted; anything else becomes `#`.
fn safe_href(url: &str) -> &str {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.trim_start()
    } else {
        "#"
    }
}
