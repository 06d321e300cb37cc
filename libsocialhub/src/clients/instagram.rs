//! Simulated Instagram API

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{native_id, MetricsSource, SeededMetrics};
use crate::error::PlatformError;

pub const POST_TYPE_POST: &str = "POST";
pub const POST_TYPE_STORY: &str = "STORY";

/// A feed post or story as the Instagram API stores it
#[derive(Debug, Clone, PartialEq)]
pub struct InstagramPost {
    pub id: String,
    pub caption: String,
    pub media_url: String,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// `POST` or `STORY`
    pub post_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInsights {
    pub post_id: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
    pub saves: u64,
}

struct InstagramState {
    authenticated: bool,
    posts: Vec<InstagramPost>,
    metrics: Box<dyn MetricsSource>,
}

pub struct InstagramApi {
    state: Mutex<InstagramState>,
}

impl InstagramApi {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(SeededMetrics::from_entropy()))
    }

    pub fn with_metrics(metrics: Box<dyn MetricsSource>) -> Self {
        Self {
            state: Mutex::new(InstagramState {
                authenticated: false,
                posts: Vec::new(),
                metrics,
            }),
        }
    }

    pub async fn authenticate(&self, username: &str, _access_token: &str) -> bool {
        let mut state = self.state.lock().await;
        state.authenticated = true;
        debug!(username, "Authenticated with the Instagram API");
        true
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.authenticated
    }

    pub async fn publish_media(
        &self,
        caption: &str,
        media_url: &str,
        tags: &[String],
    ) -> Result<InstagramPost, PlatformError> {
        self.store(native_id("ig_"), caption, media_url, tags, POST_TYPE_POST)
            .await
    }

    /// Stories carry no caption or tags
    pub async fn publish_story(
        &self,
        media_url: &str,
        _sticker: &str,
    ) -> Result<InstagramPost, PlatformError> {
        self.store(native_id("story_"), "", media_url, &[], POST_TYPE_STORY)
            .await
    }

    async fn store(
        &self,
        id: String,
        caption: &str,
        media_url: &str,
        tags: &[String],
        post_type: &str,
    ) -> Result<InstagramPost, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.authenticated {
            return Err(not_authenticated());
        }

        let post = InstagramPost {
            id,
            caption: caption.to_string(),
            media_url: media_url.to_string(),
            tags: tags.to_vec(),
            timestamp: Utc::now(),
            post_type: post_type.to_string(),
        };
        state.posts.push(post.clone());

        debug!(post_id = %post.id, post_type, "Instagram media published");
        Ok(post)
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.authenticated {
            return Err(not_authenticated());
        }

        let before = state.posts.len();
        state.posts.retain(|p| p.id != post_id);
        Ok(state.posts.len() != before)
    }

    pub async fn insights(&self, post_id: &str) -> Result<PostInsights, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.authenticated {
            return Err(not_authenticated());
        }

        let m = &mut state.metrics;
        Ok(PostInsights {
            post_id: post_id.to_string(),
            reach: m.next_below(5_000),
            likes: m.next_below(1_000),
            comments: m.next_below(200),
            saves: m.next_below(150),
        })
    }

    pub async fn list_posts(&self) -> Vec<InstagramPost> {
        self.state.lock().await.posts.clone()
    }
}

impl Default for InstagramApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_authenticated() -> PlatformError {
    PlatformError::NotAuthenticated("Not authenticated with the Instagram API".to_string())
}
