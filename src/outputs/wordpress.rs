//! Publishing sink for the WordPress REST API.
//!
//! Posts are created with `POST {site}/wp-json/wp/v2/posts`, authenticated
//! with HTTP Basic auth (an application password), and published immediately.

use crate::config::WordPressCredentials;
use crate::errors::PublishError;
use crate::utils::{base_url, truncate_for_log};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;

const POSTS_PATH: &str = "wp-json/wp/v2/posts";

#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
}

/// The fields of the created post that are worth logging.
#[derive(Debug, Deserialize)]
pub struct PublishedPost {
    pub id: u64,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WordPressPublisher {
    http: Client,
    endpoint: Url,
    credentials: WordPressCredentials,
}

impl WordPressPublisher {
    pub fn new(credentials: WordPressCredentials, timeout: Duration) -> Result<Self, PublishError> {
        // Keeps any sub-directory install path.
        let endpoint = base_url(&credentials.site_url)?.join(POSTS_PATH)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    /// Create and publish a post.
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint, %title))]
    pub async fn publish(&self, title: &str, content: &str) -> Result<PublishedPost, PublishError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&NewPost {
                title,
                content,
                status: "publish",
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body: truncate_for_log(&body, 300),
            });
        }
        Ok(resp.json::<PublishedPost>().await?)
    }
}

/// Publish and report success as a boolean; failures are logged, never raised.
pub async fn publish_digest(publisher: &WordPressPublisher, title: &str, content: &str) -> bool {
    match publisher.publish(title, content).await {
        Ok(post) => {
            info!(id = post.id, link = ?post.link, "Published digest");
            true
        }
        Err(e) => {
            error!(error = %e, "Publishing failed; local digest is kept");
            false
        }
    }
}
