//! Publication strategies
//!
//! A publication strategy decides whether content is acceptable for a
//! publishing mode and prepares it. Violations are reported as `false`, with
//! the reason logged.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::types::Content;

pub trait PublishStrategy: Send + Sync {
    /// Check the content against this publishing mode
    fn validate(&self, content: &Content) -> bool;

    /// Prepare content for publishing. Returns a new value; the input is untouched.
    fn process(&self, content: &Content) -> Content;

    fn describe(&self) -> &str;
}

/// Publish right away
#[derive(Debug, Default, Clone)]
pub struct ImmediatePublish;

impl ImmediatePublish {
    pub fn new() -> Self {
        Self
    }
}

impl PublishStrategy for ImmediatePublish {
    fn validate(&self, content: &Content) -> bool {
        if !content.has_text() {
            warn!("Immediate publication rejected: text is empty");
            return false;
        }
        true
    }

    fn process(&self, content: &Content) -> Content {
        debug!("Processing content for immediate publication");
        content.clone()
    }

    fn describe(&self) -> &str {
        "Immediate publication"
    }
}

/// Publish at the content's scheduled time
///
/// The scheduled time must be strictly after the evaluation time. Evaluation
/// time is the wall clock unless pinned with [`ScheduledPublish::with_now`].
#[derive(Debug, Default, Clone)]
pub struct ScheduledPublish {
    fixed_now: Option<DateTime<Utc>>,
}

impl ScheduledPublish {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every check against `now` instead of the wall clock
    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self {
            fixed_now: Some(now),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}

impl PublishStrategy for ScheduledPublish {
    fn validate(&self, content: &Content) -> bool {
        let Some(at) = content.scheduled_time() else {
            warn!("Scheduled publication rejected: no scheduled time");
            return false;
        };

        let now = self.now();
        if at <= now {
            warn!(scheduled_at = %at, now = %now, "Scheduled publication rejected: time is not in the future");
            return false;
        }

        if !content.has_text() {
            warn!("Scheduled publication rejected: text is empty");
            return false;
        }

        true
    }

    fn process(&self, content: &Content) -> Content {
        debug!(scheduled_at = ?content.scheduled_time(), "Processing content for scheduled publication");
        content.clone()
    }

    fn describe(&self) -> &str {
        "Scheduled publication"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentKind;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_immediate_requires_text() {
        let strategy = ImmediatePublish::new();

        assert!(strategy.validate(&Content::text_post("hello")));
        assert!(!strategy.validate(&Content::text_post("")));
        assert!(!strategy.validate(&Content::new(ContentKind::Image)));
    }

    #[test]
    fn test_immediate_process_is_identity() {
        let content = Content::text_post("hello").with_hashtags(vec!["#a".to_string()]);
        assert_eq!(ImmediatePublish::new().process(&content), content);
    }

    #[test]
    fn test_scheduled_rejects_missing_time() {
        let strategy = ScheduledPublish::with_now(now());
        assert!(!strategy.validate(&Content::text_post("hello")));
    }

    #[test]
    fn test_scheduled_rejects_past_and_present() {
        let strategy = ScheduledPublish::with_now(now());

        let past = Content::text_post("hello").scheduled_at(now() - Duration::minutes(1));
        assert!(!strategy.validate(&past));

        let exactly_now = Content::text_post("hello").scheduled_at(now());
        assert!(!strategy.validate(&exactly_now));
    }

    #[test]
    fn test_scheduled_accepts_future_with_text() {
        let strategy = ScheduledPublish::with_now(now());
        let content = Content::text_post("hello").scheduled_at(now() + Duration::seconds(1));

        assert!(strategy.validate(&content));
    }

    #[test]
    fn test_scheduled_rejects_future_without_text() {
        let strategy = ScheduledPublish::with_now(now());
        let content = Content::new(ContentKind::Text).scheduled_at(now() + Duration::hours(1));

        assert!(!strategy.validate(&content));
    }

    #[test]
    fn test_scheduled_uses_wall_clock_by_default() {
        let strategy = ScheduledPublish::new();
        let future = Content::text_post("later").scheduled_at(Utc::now() + Duration::hours(1));
        let past = Content::text_post("earlier").scheduled_at(Utc::now() - Duration::hours(1));

        assert!(strategy.validate(&future));
        assert!(!strategy.validate(&past));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ImmediatePublish::new().describe(), "Immediate publication");
        assert_eq!(ScheduledPublish::new().describe(), "Scheduled publication");
    }
}
