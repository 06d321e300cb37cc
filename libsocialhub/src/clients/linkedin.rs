//! Simulated LinkedIn API

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{native_id, MetricsSource, SeededMetrics};
use crate::error::PlatformError;

pub const SHARE_TYPE_SHARE: &str = "SHARE";
pub const SHARE_TYPE_ARTICLE: &str = "ARTICLE";

/// A share or article as the LinkedIn API stores it
///
/// Articles keep the title on the first line of `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub id: String,
    pub text: String,
    pub link_url: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    /// `SHARE` or `ARTICLE`
    pub share_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareAnalytics {
    pub share_id: String,
    pub views: u64,
    pub reactions: u64,
    pub comments: u64,
    pub shares: u64,
}

struct LinkedInState {
    connected: bool,
    shares: Vec<Share>,
    metrics: Box<dyn MetricsSource>,
}

pub struct LinkedInApi {
    state: Mutex<LinkedInState>,
}

impl LinkedInApi {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(SeededMetrics::from_entropy()))
    }

    pub fn with_metrics(metrics: Box<dyn MetricsSource>) -> Self {
        Self {
            state: Mutex::new(LinkedInState {
                connected: false,
                shares: Vec::new(),
                metrics,
            }),
        }
    }

    pub async fn establish_connection(
        &self,
        _client_id: &str,
        _client_secret: &str,
        _auth_token: &str,
    ) -> bool {
        let mut state = self.state.lock().await;
        state.connected = true;
        debug!("Connected to the LinkedIn API");
        true
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connected
    }

    pub async fn share(
        &self,
        text: &str,
        link_url: &str,
        image_url: &str,
    ) -> Result<Share, PlatformError> {
        self.store(native_id("li_"), text.to_string(), link_url, image_url, SHARE_TYPE_SHARE)
            .await
    }

    pub async fn publish_article(
        &self,
        title: &str,
        body: &str,
        cover_image: &str,
    ) -> Result<Share, PlatformError> {
        self.store(
            native_id("article_"),
            format!("{}\n{}", title, body),
            "",
            cover_image,
            SHARE_TYPE_ARTICLE,
        )
        .await
    }

    async fn store(
        &self,
        id: String,
        text: String,
        link_url: &str,
        image_url: &str,
        share_type: &str,
    ) -> Result<Share, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let share = Share {
            id,
            text,
            link_url: link_url.to_string(),
            image_url: image_url.to_string(),
            published_at: Utc::now(),
            share_type: share_type.to_string(),
        };
        state.shares.push(share.clone());

        debug!(share_id = %share.id, share_type, "LinkedIn content shared");
        Ok(share)
    }

    pub async fn remove_share(&self, share_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let before = state.shares.len();
        state.shares.retain(|s| s.id != share_id);
        Ok(state.shares.len() != before)
    }

    pub async fn analytics(&self, share_id: &str) -> Result<ShareAnalytics, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let m = &mut state.metrics;
        Ok(ShareAnalytics {
            share_id: share_id.to_string(),
            views: m.next_below(3_000),
            reactions: m.next_below(300),
            comments: m.next_below(50),
            shares: m.next_below(100),
        })
    }

    pub async fn list_shares(&self) -> Vec<Share> {
        self.state.lock().await.shares.clone()
    }
}

impl Default for LinkedInApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_connected() -> PlatformError {
    PlatformError::NotAuthenticated("Not connected to the LinkedIn API".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_article_keeps_title_on_first_line() {
        let api = LinkedInApi::new();
        api.establish_connection("id", "secret", "token").await;

        let article = api
            .publish_article("Quarterly update", "Body text", "cover.png")
            .await
            .unwrap();

        assert!(article.id.starts_with("article_"));
        assert_eq!(article.text, "Quarterly update\nBody text");
        assert_eq!(article.share_type, SHARE_TYPE_ARTICLE);
        assert_eq!(article.image_url, "cover.png");
    }

    #[tokio::test]
    async fn test_remove_share() {
        let api = LinkedInApi::new();
        api.establish_connection("id", "secret", "token").await;

        let share = api.share("hello", "", "").await.unwrap();
        assert!(share.id.starts_with("li_"));
        assert!(api.remove_share(&share.id).await.unwrap());
        assert!(api.list_shares().await.is_empty());
    }

    #[tokio::test]
    async fn test_requires_connection() {
        let api = LinkedInApi::new();
        assert!(api.share("hello", "", "").await.is_err());
        assert!(api.analytics("li_1").await.is_err());
    }
}
