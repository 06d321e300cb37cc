//! Simulated Twitter (X) API

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{native_id, MetricsSource, SeededMetrics};
use crate::error::PlatformError;

/// A tweet as the Twitter API stores it
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub media: Vec<String>,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetMetrics {
    pub tweet_id: String,
    pub impressions: u64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

struct TwitterState {
    connected: bool,
    tweets: Vec<Tweet>,
    metrics: Box<dyn MetricsSource>,
}

pub struct TwitterApi {
    state: Mutex<TwitterState>,
}

impl TwitterApi {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(SeededMetrics::from_entropy()))
    }

    pub fn with_metrics(metrics: Box<dyn MetricsSource>) -> Self {
        Self {
            state: Mutex::new(TwitterState {
                connected: false,
                tweets: Vec::new(),
                metrics,
            }),
        }
    }

    pub async fn connect(&self, _api_key: &str, _api_secret: &str) -> bool {
        let mut state = self.state.lock().await;
        state.connected = true;
        debug!("Connected to the Twitter API");
        true
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connected
    }

    pub async fn create_tweet(
        &self,
        text: &str,
        media: &[String],
        hashtags: &[String],
    ) -> Result<Tweet, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let tweet = Tweet {
            id: native_id("tw_"),
            text: text.to_string(),
            media: media.to_vec(),
            hashtags: hashtags.to_vec(),
            created_at: Utc::now(),
        };
        state.tweets.push(tweet.clone());

        debug!(tweet_id = %tweet.id, "Tweet created");
        Ok(tweet)
    }

    pub async fn remove_tweet(&self, tweet_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let before = state.tweets.len();
        state.tweets.retain(|t| t.id != tweet_id);
        let removed = state.tweets.len() != before;
        if removed {
            debug!(tweet_id, "Tweet removed");
        }
        Ok(removed)
    }

    pub async fn metrics(&self, tweet_id: &str) -> Result<TweetMetrics, PlatformError> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(not_connected());
        }

        let m = &mut state.metrics;
        Ok(TweetMetrics {
            tweet_id: tweet_id.to_string(),
            impressions: m.next_below(10_000),
            likes: m.next_below(500),
            retweets: m.next_below(100),
            replies: m.next_below(50),
        })
    }

    pub async fn list_tweets(&self) -> Vec<Tweet> {
        self.state.lock().await.tweets.clone()
    }
}

impl Default for TwitterApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_connected() -> PlatformError {
    PlatformError::NotAuthenticated("Not connected to the Twitter API".to_string())
}
