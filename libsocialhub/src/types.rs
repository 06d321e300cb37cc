//! Core types for SocialHub
//!
//! Platform-agnostic entities used at the boundary of the unified contract.
//! Adapters translate these to and from each platform's native shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Credentials
// ============================================================================

/// Credentials handed to an authentication strategy
///
/// Every field is an opaque string and any of them may be empty. Which fields
/// are required is decided by the strategy, not by this type.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub account: String,
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(
        account: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Secrets never reach log output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

// ============================================================================
// Content
// ============================================================================

/// Kind of content being published
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
    Story,
    Reel,
    Article,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Story => "story",
            Self::Reel => "reel",
            Self::Article => "article",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "story" => Ok(Self::Story),
            "reel" | "reels" => Ok(Self::Reel),
            "article" => Ok(Self::Article),
            _ => Err(format!(
                "Invalid content kind: '{}'. Valid options: text, image, video, story, reel, article",
                s
            )),
        }
    }
}

/// Content to be published
///
/// Content is immutable once built: the `with_*` methods consume the value
/// and return a new one, and there are no setters. Strategies and adapters
/// that need a different shape work on a clone.
///
/// # Examples
///
/// ```
/// use libsocialhub::types::{Content, ContentKind};
///
/// let content = Content::new(ContentKind::Image)
///     .with_text("Sunset over the bay")
///     .with_media(vec!["sunset.jpg".to_string()])
///     .with_hashtags(vec!["#sunset".to_string()]);
///
/// assert_eq!(content.text(), Some("Sunset over the bay"));
/// assert_eq!(content.media().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    text: Option<String>,
    media: Vec<String>,
    hashtags: Vec<String>,
    scheduled_at: Option<DateTime<Utc>>,
    kind: ContentKind,
}

impl Content {
    /// Create empty content of the given kind
    pub fn new(kind: ContentKind) -> Self {
        Self {
            text: None,
            media: Vec::new(),
            hashtags: Vec::new(),
            scheduled_at: None,
            kind,
        }
    }

    /// Shorthand for text-only content
    pub fn text_post(text: impl Into<String>) -> Self {
        Self::new(ContentKind::Text).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_media(mut self, media: Vec<String>) -> Self {
        self.media = media;
        self
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True when text is present and not empty
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Length of the text in characters (0 when absent)
    pub fn text_len(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }

    pub fn media(&self) -> &[String] {
        &self.media
    }

    pub fn first_media(&self) -> Option<&str> {
        self.media.first().map(String::as_str)
    }

    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    pub fn scheduled_time(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }
}

// ============================================================================
// Publication
// ============================================================================

/// Lifecycle status of a publication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Scheduled,
    Published,
    Failed,
    Cancelled,
    InReview,
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Published => write!(f, "published"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::InReview => write!(f, "in_review"),
        }
    }
}

/// A publication created by an adapter
///
/// Only adapters construct publications, after a successful native call or
/// when scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub platform: String,
    pub content: Content,
    pub published_at: DateTime<Utc>,
    pub status: PublicationStatus,
    pub url: String,
}

// ============================================================================
// Statistics
// ============================================================================

/// Engagement statistics for a single publication
///
/// The engagement rate is derived from the four counters and recomputed on
/// every mutation; there is no way to set it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStatistics")]
pub struct Statistics {
    publication_id: String,
    views: u64,
    likes: u64,
    shares: u64,
    comments: u64,
    engagement_rate: f64,
}

impl Statistics {
    pub fn new(
        publication_id: impl Into<String>,
        views: u64,
        likes: u64,
        shares: u64,
        comments: u64,
    ) -> Self {
        let mut stats = Self {
            publication_id: publication_id.into(),
            views,
            likes,
            shares,
            comments,
            engagement_rate: 0.0,
        };
        stats.recompute();
        stats
    }

    fn recompute(&mut self) {
        self.engagement_rate = if self.views == 0 {
            0.0
        } else {
            let interactions = self.likes + self.shares + self.comments;
            (interactions as f64 * 100.0) / self.views as f64
        };
    }

    pub fn publication_id(&self) -> &str {
        &self.publication_id
    }

    pub fn views(&self) -> u64 {
        self.views
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn comments(&self) -> u64 {
        self.comments
    }

    /// Percentage of views that resulted in an interaction
    pub fn engagement_rate(&self) -> f64 {
        self.engagement_rate
    }

    pub fn set_views(&mut self, views: u64) {
        self.views = views;
        self.recompute();
    }

    pub fn set_likes(&mut self, likes: u64) {
        self.likes = likes;
        self.recompute();
    }

    pub fn set_shares(&mut self, shares: u64) {
        self.shares = shares;
        self.recompute();
    }

    pub fn set_comments(&mut self, comments: u64) {
        self.comments = comments;
        self.recompute();
    }
}

/// Serialized counters; any stored engagement rate is ignored
#[derive(Deserialize)]
struct RawStatistics {
    publication_id: String,
    views: u64,
    likes: u64,
    shares: u64,
    comments: u64,
}

impl From<RawStatistics> for Statistics {
    fn from(raw: RawStatistics) -> Self {
        Statistics::new(raw.publication_id, raw.views, raw.likes, raw.shares, raw.comments)
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: views={} likes={} shares={} comments={} engagement={:.2}%",
            self.publication_id,
            self.views,
            self.likes,
            self.shares,
            self.comments,
            self.engagement_rate
        )
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Outcome of checking content against a platform's structural rules
///
/// Errors make the content invalid. Warnings are advisory and never block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub platform: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors joined into one human-readable line
    pub fn explanation(&self) -> String {
        self.errors.join("; ")
    }
}
