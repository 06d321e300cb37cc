//! Fan-out of one piece of content to many platforms
//!
//! Every platform is handled independently: a rejection or failure on one
//! is recorded in its [`PlatformResult`] and never stops the others.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clients::SeededMetrics;
use crate::config::{ConfigStore, PlatformSettings};
use crate::factory::{create_from_config, create_from_config_with_metrics};
use crate::platforms::SocialMediaManager;
use crate::types::{Content, Credentials, Publication, Statistics};

/// Outcome for one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformResult {
    /// Display name (e.g. "Twitter")
    pub platform: String,
    pub success: bool,
    pub publication: Option<Publication>,
    pub error: Option<String>,
}

impl PlatformResult {
    fn published(platform: &str, publication: Publication) -> Self {
        Self {
            platform: platform.to_string(),
            success: true,
            publication: Some(publication),
            error: None,
        }
    }

    fn failed(platform: &str, error: impl Into<String>) -> Self {
        Self {
            platform: platform.to_string(),
            success: false,
            publication: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub results: Vec<PlatformResult>,
    /// True when at least one platform succeeded
    pub overall_success: bool,
}

impl PublishResponse {
    fn from_results(results: Vec<PlatformResult>) -> Self {
        let overall_success = results.iter().any(|r| r.success);
        Self {
            results,
            overall_success,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &PlatformResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Statistics for every publication one platform currently lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStatistics {
    pub platform: String,
    pub statistics: Vec<Statistics>,
}

#[derive(Clone, Copy)]
enum Mode {
    Publish,
    Schedule,
}

/// Drives a set of managers together
pub struct PublishingService {
    managers: Vec<Box<dyn SocialMediaManager>>,
}

impl PublishingService {
    pub fn new(managers: Vec<Box<dyn SocialMediaManager>>) -> Self {
        Self { managers }
    }

    /// One manager per active platform of the store's current environment
    pub fn from_config(store: &ConfigStore) -> Self {
        Self::from_settings(&store.active_platforms())
    }

    /// Like [`from_config`](Self::from_config), with reproducible analytics
    pub fn from_config_seeded(store: &ConfigStore, seed: u64) -> Self {
        Self::from_settings_seeded(&store.active_platforms(), seed)
    }

    pub fn from_settings(settings: &[PlatformSettings]) -> Self {
        Self::new(settings.iter().map(create_from_config).collect())
    }

    /// Platform `i` of `settings` draws its metrics from seed `seed + i`
    pub fn from_settings_seeded(settings: &[PlatformSettings], seed: u64) -> Self {
        Self::new(
            settings
                .iter()
                .zip(0u64..)
                .map(|(settings, offset)| {
                    create_from_config_with_metrics(
                        settings,
                        Box::new(SeededMetrics::from_seed(seed.wrapping_add(offset))),
                    )
                })
                .collect(),
        )
    }

    pub fn managers(&self) -> &[Box<dyn SocialMediaManager>] {
        &self.managers
    }

    pub fn platform_names(&self) -> Vec<String> {
        self.managers
            .iter()
            .map(|m| m.platform_name().to_string())
            .collect()
    }

    /// Authenticate every manager with the same credentials
    pub async fn authenticate_all(&mut self, credentials: &Credentials) -> Vec<(String, bool)> {
        let attempts = self.managers.iter_mut().map(|manager| async move {
            let ok = manager.authenticate(credentials).await;
            if !ok {
                warn!(platform = manager.platform_name(), "Authentication failed");
            }
            (manager.platform_name().to_string(), ok)
        });

        join_all(attempts).await
    }

    /// Validate and publish on every platform
    pub async fn publish_all(&self, content: &Content) -> PublishResponse {
        self.fan_out(content, Mode::Publish).await
    }

    /// Validate and schedule on every platform
    pub async fn schedule_all(&self, content: &Content) -> PublishResponse {
        self.fan_out(content, Mode::Schedule).await
    }

    async fn fan_out(&self, content: &Content, mode: Mode) -> PublishResponse {
        let attempts = self.managers.iter().map(|manager| async move {
            let platform = manager.platform_name();

            let report = manager.validation_report(content);
            if !report.is_valid() {
                warn!(platform, reason = %report.explanation(), "Skipping platform: content rejected");
                return PlatformResult::failed(platform, report.explanation());
            }

            let outcome = match mode {
                Mode::Publish => manager.publish(content).await,
                Mode::Schedule => manager.schedule(content).await,
            };

            match outcome {
                Ok(publication) => {
                    info!(platform, publication_id = %publication.id, "Platform succeeded");
                    PlatformResult::published(platform, publication)
                }
                Err(e) => {
                    warn!(platform, error = %e, "Platform failed");
                    PlatformResult::failed(platform, e.to_string())
                }
            }
        });

        PublishResponse::from_results(join_all(attempts).await)
    }

    /// Statistics for everything each platform lists
    ///
    /// Publications whose statistics cannot be fetched are skipped.
    pub async fn statistics_all(&self) -> Vec<PlatformStatistics> {
        let gathers = self.managers.iter().map(|manager| async move {
            let mut statistics = Vec::new();
            for publication in manager.list_publications().await {
                match manager.get_statistics(&publication.id).await {
                    Ok(stats) => statistics.push(stats),
                    Err(e) => warn!(
                        platform = manager.platform_name(),
                        publication_id = %publication.id,
                        error = %e,
                        "Could not fetch statistics"
                    ),
                }
            }
            PlatformStatistics {
                platform: manager.platform_name().to_string(),
                statistics,
            }
        });

        join_all(gathers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_default_manager, Platform};
    use crate::types::ContentKind;

    fn credentials() -> Credentials {
        Credentials::new("agency", "key", "secret", "token", "refresh")
    }

    #[tokio::test]
    async fn test_text_post_only_reaches_text_platforms() {
        let mut service = PublishingService::new(
            Platform::ALL.into_iter().map(create_default_manager).collect(),
        );
        let auth = service.authenticate_all(&credentials()).await;
        assert!(auth.iter().all(|(_, ok)| *ok));

        let response = service.publish_all(&Content::text_post("Hello")).await;
        assert!(response.overall_success);

        let succeeded: Vec<&str> = response
            .results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.platform.as_str())
            .collect();
        assert_eq!(succeeded, vec!["Twitter", "LinkedIn"]);
        assert_eq!(response.failures().count(), 2);
    }

    #[tokio::test]
    async fn test_unauthenticated_platform_fails_alone() {
        let mut twitter = create_default_manager(Platform::Twitter);
        assert!(twitter.authenticate(&credentials()).await);
        let linkedin = create_default_manager(Platform::LinkedIn);

        let service = PublishingService::new(vec![twitter, linkedin]);
        let response = service.publish_all(&Content::text_post("Hello")).await;

        assert!(response.results[0].success);
        assert!(!response.results[1].success);
        assert!(response.results[1]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Not authenticated")));
    }

    #[tokio::test]
    async fn test_nothing_succeeds() {
        let service = PublishingService::new(vec![create_default_manager(Platform::TikTok)]);
        let response = service
            .publish_all(&Content::new(ContentKind::Video).with_text("no clip"))
            .await;

        assert!(!response.overall_success);
        assert!(response.results[0].publication.is_none());
    }

    #[tokio::test]
    async fn test_statistics_all() {
        let mut service =
            PublishingService::new(vec![create_default_manager(Platform::Twitter)]);
        service.authenticate_all(&credentials()).await;
        service.publish_all(&Content::text_post("one")).await;
        service.publish_all(&Content::text_post("two")).await;

        let stats = service.statistics_all().await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].platform, "Twitter");
        assert_eq!(stats[0].statistics.len(), 2);
    }

    #[tokio::test]
    async fn test_response_serializes_for_output() {
        let service = PublishingService::new(vec![create_default_manager(Platform::Twitter)]);
        let response = service.publish_all(&Content::text_post("hi")).await;

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["overall_success"], false);
        assert_eq!(json["results"][0]["platform"], "Twitter");
        assert!(json["results"][0]["publication"].is_null());
    }
}
