//! Simulated TikTok API

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{native_id, MetricsSource, SeededMetrics};
use crate::error::PlatformError;

#[derive(Debug, Clone, PartialEq)]
pub struct TikTokVideo {
    pub id: String,
    pub description: String,
    pub video_url: String,
    pub hashtags: Vec<String>,
    pub music: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub video_id: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

struct TikTokState {
    logged_in: bool,
    videos: Vec<TikTokVideo>,
    metrics: Box<dyn MetricsSource>,
}

pub struct TikTokApi {
    state: Mutex<TikTokState>,
}

impl TikTokApi {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(SeededMetrics::from_entropy()))
    }

    pub fn with_metrics(metrics: Box<dyn MetricsSource>) -> Self {
        Self {
            state: Mutex::new(TikTokState {
                logged_in: false,
                videos: Vec::new(),
                metrics,
            }),
        }
    }

    pub async fn login(&self, username: &str, _session_token: &str) -> bool {
        let mut state = self.state.lock().await;
        state.logged_in = true;
        debug!(username, "Logged in to TikTok");
        true
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.logged_in
    }

    pub async fn post_video(
        &self,
        description: &str,
        video_url: &str,
        hashtags: &[String],
        music: &str,
    ) -> Result<TikTokVideo, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.logged_in {
            return Err(not_logged_in());
        }

        let video = TikTokVideo {
            id: native_id("tt_"),
            description: description.to_string(),
            video_url: video_url.to_string(),
            hashtags: hashtags.to_vec(),
            music: music.to_string(),
            uploaded_at: Utc::now(),
        };
        state.videos.push(video.clone());

        debug!(video_id = %video.id, "TikTok video posted");
        Ok(video)
    }

    pub async fn delete_video(&self, video_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.logged_in {
            return Err(not_logged_in());
        }

        let before = state.videos.len();
        state.videos.retain(|v| v.id != video_id);
        Ok(state.videos.len() != before)
    }

    pub async fn stats(&self, video_id: &str) -> Result<VideoStats, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.logged_in {
            return Err(not_logged_in());
        }

        let m = &mut state.metrics;
        Ok(VideoStats {
            video_id: video_id.to_string(),
            views: m.next_below(50_000),
            likes: m.next_below(5_000),
            comments: m.next_below(500),
            shares: m.next_below(1_000),
        })
    }

    pub async fn list_videos(&self) -> Vec<TikTokVideo> {
        self.state.lock().await.videos.clone()
    }
}

impl Default for TikTokApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_logged_in() -> PlatformError {
    PlatformError::NotAuthenticated("Not logged in to TikTok".to_string())
}
