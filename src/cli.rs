//! Command-line interface definitions for Pocket News Digest.
//!
//! Secrets can be given as flags but are normally read from the environment.
//! Flags that also exist in the YAML config (topics, order) override it.

use crate::config::{Config, OrderPolicy, WordPressCredentials, require_secret};
use crate::errors::ConfigError;
use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Pocket News Digest application.
///
/// # Examples
///
/// ```sh
/// # Markdown post into ./_posts using the default topics
/// NEWS_API_KEY=... pocket_news_digest
///
/// # HTML page for two topics, newest first
/// pocket_news_digest -f html -o ./site --topic ai --topic "climate OR weather"
///
/// # Also publish to WordPress
/// pocket_news_digest --publish --wp-site-url https://blog.example.com
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the digest file
    #[arg(short, long, default_value = "_posts")]
    pub output_dir: PathBuf,

    /// Digest file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Optional path to a YAML selection/endpoint config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the digest as JSON into this directory
    #[arg(long)]
    pub json_output_dir: Option<PathBuf>,

    /// Search topic; repeat for several. Replaces the configured topics
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,

    /// Ordering applied before capping the selection
    #[arg(long, value_enum)]
    pub order: Option<OrderPolicy>,

    /// Use article descriptions as-is instead of calling the summarization model
    #[arg(long)]
    pub no_summarize: bool,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Token for the hosted summarization model
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub hf_api_token: Option<String>,

    /// Publish the digest to WordPress after writing it
    #[arg(long)]
    pub publish: bool,

    /// WordPress site URL (required with --publish)
    #[arg(long, env = "WP_SITE_URL")]
    pub wp_site_url: Option<String>,

    /// WordPress user name (required with --publish)
    #[arg(long, env = "WP_USERNAME")]
    pub wp_username: Option<String>,

    /// WordPress application password (required with --publish)
    #[arg(long, env = "WP_APP_PASSWORD", hide_env_values = true)]
    pub wp_app_password: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the file/default configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if !self.topics.is_empty() {
            config.selection.topics = self.topics.clone();
        }
        if let Some(order) = self.order {
            config.selection.order = order;
        }
    }

    pub fn news_api_key(&self) -> Result<String, ConfigError> {
        require_secret(self.news_api_key.clone(), "NEWS_API_KEY")
    }

    /// WordPress credentials when publishing is requested, `None` otherwise.
    pub fn wordpress_credentials(&self) -> Result<Option<WordPressCredentials>, ConfigError> {
        if !self.publish {
            return Ok(None);
        }
        Ok(Some(WordPressCredentials {
            site_url: require_secret(self.wp_site_url.clone(), "WP_SITE_URL")?,
            username: require_secret(self.wp_username.clone(), "WP_USERNAME")?,
            password: require_secret(self.wp_app_password.clone(), "WP_APP_PASSWORD")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pocket_news_digest"]);

        assert_eq!(cli.output_dir, PathBuf::from("_posts"));
        assert_eq!(cli.format, OutputFormat::Markdown);
        assert!(cli.topics.is_empty());
        assert!(!cli.publish);
        assert!(!cli.no_summarize);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "pocket_news_digest",
            "-o",
            "/tmp/site",
            "-f",
            "html",
            "-t",
            "ai",
            "-t",
            "climate OR weather",
        ]);

        assert_eq!(cli.output_dir, PathBuf::from("/tmp/site"));
        assert_eq!(cli.format, OutputFormat::Html);
        assert_eq!(cli.topics, vec!["ai", "climate OR weather"]);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::parse_from(["pocket_news_digest", "--topic", "ai", "--order", "shuffle"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.selection.topics, vec!["ai"]);
        assert_eq!(config.selection.order, OrderPolicy::Shuffle);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::parse_from(["pocket_news_digest"]);
        let mut config = Config::default();
        let topics = config.selection.topics.clone();
        cli.apply_overrides(&mut config);

        assert_eq!(config.selection.topics, topics);
        assert_eq!(config.selection.order, OrderPolicy::Recency);
    }

    #[test]
    fn test_secrets_from_flags() {
        let cli = Cli::parse_from([
            "pocket_news_digest",
            "--news-api-key",
            "key",
            "--publish",
            "--wp-site-url",
            "https://blog.example.com",
            "--wp-username",
            "editor",
            "--wp-app-password",
            "secret",
        ]);

        assert_eq!(cli.news_api_key().unwrap(), "key");
        let creds = cli.wordpress_credentials().unwrap().unwrap();
        assert_eq!(creds.site_url, "https://blog.example.com");
        assert_eq!(creds.username, "editor");
    }

    #[test]
    fn test_wordpress_not_required_without_publish() {
        let cli = Cli::parse_from(["pocket_news_digest", "--wp-username", "editor"]);
        assert!(cli.wordpress_credentials().unwrap().is_none());
    }
}
