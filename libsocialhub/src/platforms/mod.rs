//! Unified platform contract and the per-platform adapters
//!
//! [`SocialMediaManager`] is the single type callers depend on. Each adapter
//! implements it by composing a native client with an injected
//! [`AuthStrategy`](crate::strategy::AuthStrategy) and
//! [`PublishStrategy`](crate::strategy::PublishStrategy), translating unified
//! requests into native calls and native results back into unified entities.
//!
//! # Examples
//!
//! ```no_run
//! use libsocialhub::platforms::{SocialMediaManager, twitter::TwitterAdapter};
//! use libsocialhub::strategy::{ImmediatePublish, OAuth2Auth};
//! use libsocialhub::types::{Content, Credentials};
//!
//! # async fn example() -> libsocialhub::Result<()> {
//! let mut manager = TwitterAdapter::new(
//!     Box::new(OAuth2Auth::new()),
//!     Box::new(ImmediatePublish::new()),
//! );
//!
//! let credentials = Credentials::new("agency", "key", "secret", "token", "refresh");
//! if manager.authenticate(&credentials).await {
//!     let publication = manager.publish(&Content::text_post("Hello!")).await?;
//!     println!("Published: {}", publication.url);
//!
//!     let stats = manager.get_statistics(&publication.id).await?;
//!     println!("{}", stats);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{PlatformError, Result};
use crate::strategy::PublishStrategy;
use crate::types::{
    Content, Credentials, Publication, PublicationStatus, Statistics, ValidationReport,
};

pub mod instagram;
pub mod linkedin;
pub mod tiktok;
pub mod twitter;

pub use instagram::InstagramAdapter;
pub use linkedin::LinkedInAdapter;
pub use tiktok::TikTokAdapter;
pub use twitter::TwitterAdapter;

/// Unified contract every platform adapter implements
///
/// Two failure channels are kept apart. Checks that can legitimately fail
/// (`authenticate`, `validate_content`, whether `delete` removed anything)
/// return booleans. Precondition violations return errors:
/// [`PlatformError::NotAuthenticated`] when the native session is missing and
/// [`PlatformError::InvalidContent`] when content is rejected.
#[async_trait]
pub trait SocialMediaManager: Send + Sync {
    /// Authenticate with the platform
    ///
    /// Runs the authentication strategy first. The native login is only
    /// attempted when the strategy accepts the credentials.
    async fn authenticate(&mut self, credentials: &Credentials) -> bool;

    /// Publish content now
    ///
    /// # Errors
    ///
    /// - `PlatformError::NotAuthenticated` if the native client has no session;
    ///   no native call is made
    /// - `PlatformError::InvalidContent` if the publication strategy or the
    ///   platform's structural rules reject the content
    async fn publish(&self, content: &Content) -> Result<Publication>;

    /// Register content for publication at its scheduled time
    ///
    /// No native call is made; the returned publication has status
    /// `Scheduled` and the content's scheduled time as its timestamp.
    ///
    /// # Errors
    ///
    /// - `PlatformError::NotAuthenticated` if the native client has no session
    /// - `PlatformError::InvalidContent` if the content has no scheduled time
    ///   or that time is not in the future
    async fn schedule(&self, content: &Content) -> Result<Publication>;

    /// Remove a publication, returning whether anything was removed
    async fn delete(&self, publication_id: &str) -> Result<bool>;

    /// Fetch engagement statistics mapped into the unified shape
    async fn get_statistics(&self, publication_id: &str) -> Result<Statistics>;

    /// All publications the native client currently holds
    async fn list_publications(&self) -> Vec<Publication>;

    /// Whether the native client reports an active session
    async fn is_authenticated(&self) -> bool;

    /// Display name of the platform (e.g. "Twitter")
    fn platform_name(&self) -> &str;

    /// Check content against the platform's structural rules
    ///
    /// The first violated rule ends the check. Warnings never make the
    /// report invalid.
    fn validation_report(&self, content: &Content) -> ValidationReport;

    /// Names of the injected strategies, for diagnostics
    fn strategy_description(&self) -> String;

    /// Boolean form of [`validation_report`](Self::validation_report)
    ///
    /// Every error and warning is logged.
    fn validate_content(&self, content: &Content) -> bool {
        let report = self.validation_report(content);
        log_report(&report);
        report.is_valid()
    }
}

/// Log every error and warning in a validation report
pub(crate) fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        warn!(platform = %report.platform, "{}", warning);
    }
    for error in &report.errors {
        warn!(platform = %report.platform, "Content rejected: {}", error);
    }
    if report.is_valid() {
        info!(platform = %report.platform, "Content is valid");
    }
}

/// Run the strategy check, then the structural rules
///
/// Shared by every adapter's `publish` once the session check has passed.
pub(crate) fn ensure_publishable(
    strategy: &dyn PublishStrategy,
    report: ValidationReport,
    content: &Content,
) -> std::result::Result<(), PlatformError> {
    if !strategy.validate(content) {
        return Err(PlatformError::InvalidContent(format!(
            "{} rejected the content for {}",
            strategy.describe(),
            report.platform
        )));
    }

    log_report(&report);
    if !report.is_valid() {
        return Err(PlatformError::InvalidContent(format!(
            "{}: {}",
            report.platform,
            report.explanation()
        )));
    }

    Ok(())
}

/// Build the publication returned by `schedule`
///
/// The id carries a `scheduled_<tag>_` prefix, the creation time in
/// milliseconds and a random suffix.
pub(crate) fn scheduled_publication(
    platform: &str,
    tag: &str,
    host: &str,
    content: &Content,
) -> std::result::Result<Publication, PlatformError> {
    let at = content.scheduled_time().ok_or_else(|| {
        PlatformError::InvalidContent(format!("{}: a scheduled time is required", platform))
    })?;

    let now = Utc::now();
    if at <= now {
        return Err(PlatformError::InvalidContent(format!(
            "{}: scheduled time {} is not in the future",
            platform, at
        )));
    }

    let suffix = Uuid::new_v4().simple().to_string();
    let publication = Publication {
        id: format!(
            "scheduled_{}_{}_{}",
            tag,
            now.timestamp_millis(),
            &suffix[..8]
        ),
        platform: platform.to_string(),
        content: content.clone(),
        published_at: at,
        status: PublicationStatus::Scheduled,
        url: format!("https://{}/scheduled", host),
    };

    info!(platform, publication_id = %publication.id, scheduled_at = %at, "Publication scheduled");
    Ok(publication)
}

/// Wrap the first media reference in a list, if any
pub(crate) fn media_list(url: &str) -> Vec<String> {
    if url.is_empty() {
        Vec::new()
    } else {
        vec![url.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{ImmediatePublish, ScheduledPublish};
    use chrono::Duration;

    #[test]
    fn test_ensure_publishable_strategy_rejection() {
        let report = ValidationReport::new("Twitter");
        let result = ensure_publishable(&ImmediatePublish::new(), report, &Content::text_post(""));

        assert!(matches!(result, Err(PlatformError::InvalidContent(_))));
    }

    #[test]
    fn test_ensure_publishable_structural_rejection() {
        let mut report = ValidationReport::new("Twitter");
        report.errors.push("Text exceeds 280 characters".to_string());

        let err = ensure_publishable(&ImmediatePublish::new(), report, &Content::text_post("x"))
            .unwrap_err();
        assert!(err.to_string().contains("280"));
    }

    #[test]
    fn test_ensure_publishable_passes_with_warnings() {
        let mut report = ValidationReport::new("LinkedIn");
        report.warnings.push("many hashtags".to_string());

        assert!(ensure_publishable(&ImmediatePublish::new(), report, &Content::text_post("x")).is_ok());
    }

    #[test]
    fn test_scheduled_publication_requires_future_time() {
        let missing = scheduled_publication("Twitter", "tw", "twitter.com", &Content::text_post("x"));
        assert!(matches!(missing, Err(PlatformError::InvalidContent(_))));

        let past = Content::text_post("x").scheduled_at(Utc::now() - Duration::minutes(5));
        assert!(scheduled_publication("Twitter", "tw", "twitter.com", &past).is_err());
    }

    #[test]
    fn test_scheduled_publication_shape() {
        let at = Utc::now() + Duration::days(1);
        let content = Content::text_post("later").scheduled_at(at);

        let first = scheduled_publication("Twitter", "tw", "twitter.com", &content).unwrap();
        let second = scheduled_publication("Twitter", "tw", "twitter.com", &content).unwrap();

        assert!(first.id.starts_with("scheduled_tw_"));
        assert_ne!(first.id, second.id);
        assert_eq!(first.status, PublicationStatus::Scheduled);
        assert_eq!(first.published_at, at);
        assert_eq!(first.url, "https://twitter.com/scheduled");
        assert_eq!(first.content, content);
    }

    #[test]
    fn test_scheduled_strategy_with_pinned_clock_still_needs_text() {
        let now = Utc::now();
        let strategy = ScheduledPublish::with_now(now);
        let content = Content::new(crate::types::ContentKind::Text).scheduled_at(now + Duration::hours(1));

        let result = ensure_publishable(&strategy, ValidationReport::new("Twitter"), &content);
        assert!(result.is_err());
    }

    #[test]
    fn test_media_list() {
        assert!(media_list("").is_empty());
        assert_eq!(media_list("a.jpg"), vec!["a.jpg".to_string()]);
    }
}
