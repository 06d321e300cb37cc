//! Multi-platform publishing through the service layer

use chrono::{Duration, Utc};
use libsocialhub::{
    ConfigStore, Content, ContentKind, Credentials, PublicationStatus, PublishingService,
};

fn credentials() -> Credentials {
    Credentials::new("agency", "key", "secret", "token", "refresh")
}

async fn service_for(environment: &str) -> PublishingService {
    let mut store = ConfigStore::builtin();
    store.set_environment(environment).unwrap();

    let mut service = PublishingService::from_config_seeded(&store, 42);
    let auth = service.authenticate_all(&credentials()).await;
    assert!(auth.iter().all(|(_, ok)| *ok));
    service
}

#[tokio::test]
async fn test_development_skips_inactive_linkedin() {
    let service = service_for("development").await;
    assert_eq!(
        service.platform_names(),
        vec!["Instagram", "TikTok", "Twitter"]
    );
}

#[tokio::test]
async fn test_video_reaches_video_platforms() {
    let service = service_for("development").await;
    let content = Content::new(ContentKind::Video)
        .with_text("Behind the scenes")
        .with_media(vec!["bts.mp4".to_string()])
        .with_hashtags(vec!["#bts".to_string()]);

    let response = service.publish_all(&content).await;
    assert!(response.overall_success);

    // Instagram takes any media, TikTok wants video, Twitter takes short text
    assert!(response.results.iter().all(|r| r.success));
    for result in &response.results {
        let publication = result.publication.as_ref().unwrap();
        assert_eq!(publication.status, PublicationStatus::Published);
        assert_eq!(publication.platform, result.platform);
    }
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let service = service_for("development").await;
    let content = Content::text_post("x".repeat(300));

    let response = service.publish_all(&content).await;
    assert!(!response.overall_success);
    assert_eq!(response.failures().count(), 3);

    let twitter = response
        .results
        .iter()
        .find(|r| r.platform == "Twitter")
        .unwrap();
    assert!(twitter.error.as_deref().unwrap().contains("280"));
}

#[tokio::test]
async fn test_staging_needs_a_future_time() {
    let service = service_for("staging").await;
    let now_only = Content::text_post("Launch");

    // Scheduled strategy rejects content without a scheduled time
    let response = service.publish_all(&now_only).await;
    let linkedin = response
        .results
        .iter()
        .find(|r| r.platform == "LinkedIn")
        .unwrap();
    assert!(!linkedin.success);

    let later = now_only.scheduled_at(Utc::now() + Duration::days(1));
    let response = service.schedule_all(&later).await;
    let scheduled: Vec<&str> = response
        .results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.platform.as_str())
        .collect();
    assert_eq!(scheduled, vec!["LinkedIn", "Twitter"]);
    assert!(response
        .results
        .iter()
        .filter_map(|r| r.publication.as_ref())
        .all(|p| p.status == PublicationStatus::Scheduled));
}

#[tokio::test]
async fn test_seeded_statistics_are_reproducible() {
    let content = Content::text_post("Metrics").scheduled_at(Utc::now() + Duration::hours(1));

    let mut runs = Vec::new();
    for _ in 0..2 {
        let service = service_for("production").await;
        let twitter = service
            .managers()
            .iter()
            .find(|m| m.platform_name() == "Twitter")
            .unwrap();
        let publication = twitter.publish(&content).await.unwrap();
        let stats = twitter.get_statistics(&publication.id).await.unwrap();
        runs.push((stats.views(), stats.likes(), stats.shares(), stats.comments()));
    }

    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn test_statistics_all_covers_every_publication() {
    let service = service_for("development").await;
    let photo = Content::new(ContentKind::Image)
        .with_text("Photo")
        .with_media(vec!["p.jpg".to_string()]);
    service.publish_all(&photo).await;
    service.publish_all(&photo).await;

    let stats = service.statistics_all().await;
    let instagram = stats.iter().find(|s| s.platform == "Instagram").unwrap();
    assert_eq!(instagram.statistics.len(), 2);

    let tiktok = stats.iter().find(|s| s.platform == "TikTok").unwrap();
    assert!(tiktok.statistics.is_empty());
}
