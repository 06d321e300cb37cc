//! Simulated native platform clients
//!
//! Each client mimics the shape of one platform's API: its own login call,
//! its own record types and field names, its own analytics counters. Records
//! live in memory for the lifetime of the client. Analytics come from an
//! injectable [`MetricsSource`] so tests can pin exact values.
//!
//! The state of every client sits behind a `tokio::sync::Mutex`, so
//! concurrent callers serialize create/delete sequences on the store.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

pub mod instagram;
pub mod linkedin;
pub mod tiktok;
pub mod twitter;

pub use instagram::{InstagramApi, InstagramPost, PostInsights};
pub use linkedin::{LinkedInApi, Share, ShareAnalytics};
pub use tiktok::{TikTokApi, TikTokVideo, VideoStats};
pub use twitter::{Tweet, TweetMetrics, TwitterApi};

/// Source of simulated engagement counters
pub trait MetricsSource: Send {
    /// A value in `0..bound` (always 0 when `bound` is 0)
    fn next_below(&mut self, bound: u64) -> u64;
}

/// Pseudo-random metrics backed by a seedable generator
///
/// Two sources built from the same seed produce the same sequence.
///
/// # Examples
///
/// ```
/// use libsocialhub::clients::{MetricsSource, SeededMetrics};
///
/// let mut a = SeededMetrics::from_seed(7);
/// let mut b = SeededMetrics::from_seed(7);
/// assert_eq!(a.next_below(1000), b.next_below(1000));
/// ```
#[derive(Debug, Clone)]
pub struct SeededMetrics {
    rng: StdRng,
}

impl SeededMetrics {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SeededMetrics {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MetricsSource for SeededMetrics {
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Native id: prefix plus 8 hex characters of a v4 UUID
pub(crate) fn native_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &uuid[..8])
}
