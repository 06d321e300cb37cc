//! TikTok adapter: video only
//!
//! Every post is a video. Content without media falls back to a placeholder
//! clip and all posts carry the same background track.

use async_trait::async_trait;
use tracing::info;

use crate::clients::tiktok::{TikTokApi, TikTokVideo};
use crate::error::{PlatformError, Result};
use crate::platforms::{ensure_publishable, media_list, scheduled_publication, SocialMediaManager};
use crate::strategy::{AuthStrategy, PublishStrategy};
use crate::types::{
    Content, ContentKind, Credentials, Publication, PublicationStatus, Statistics,
    ValidationReport,
};

pub const PLATFORM_NAME: &str = "TikTok";
pub const MAX_DESCRIPTION_CHARS: usize = 2200;

const DEFAULT_VIDEO: &str = "default_video.mp4";
const DEFAULT_MUSIC: &str = "trending_sound.mp3";

pub struct TikTokAdapter {
    api: TikTokApi,
    auth: Box<dyn AuthStrategy>,
    publisher: Box<dyn PublishStrategy>,
}

impl TikTokAdapter {
    pub fn new(auth: Box<dyn AuthStrategy>, publisher: Box<dyn PublishStrategy>) -> Self {
        Self::with_api(TikTokApi::new(), auth, publisher)
    }

    pub fn with_api(
        api: TikTokApi,
        auth: Box<dyn AuthStrategy>,
        publisher: Box<dyn PublishStrategy>,
    ) -> Self {
        Self {
            api,
            auth,
            publisher,
        }
    }

    pub fn api(&self) -> &TikTokApi {
        &self.api
    }

    fn to_publication(video: &TikTokVideo, content: Content) -> Publication {
        Publication {
            id: video.id.clone(),
            platform: PLATFORM_NAME.to_string(),
            content,
            published_at: video.uploaded_at,
            status: PublicationStatus::Published,
            url: format!("https://tiktok.com/@user/video/{}", video.id),
        }
    }

    fn not_logged_in() -> PlatformError {
        PlatformError::NotAuthenticated("Not authenticated with TikTok".to_string())
    }
}

#[async_trait]
impl SocialMediaManager for TikTokAdapter {
    async fn authenticate(&mut self, credentials: &Credentials) -> bool {
        if !self.auth.authenticate(credentials) {
            return false;
        }
        self.api
            .login(&credentials.account, &credentials.access_token)
            .await
    }

    async fn publish(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_logged_in().await {
            return Err(Self::not_logged_in().into());
        }

        ensure_publishable(self.publisher.as_ref(), self.validation_report(content), content)?;
        let processed = self.publisher.process(content);

        let video = self
            .api
            .post_video(
                processed.text().unwrap_or_default(),
                processed.first_media().unwrap_or(DEFAULT_VIDEO),
                processed.hashtags(),
                DEFAULT_MUSIC,
            )
            .await?;

        info!(platform = PLATFORM_NAME, video_id = %video.id, "Published TikTok video");
        Ok(Self::to_publication(&video, content.clone()))
    }

    async fn schedule(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_logged_in().await {
            return Err(Self::not_logged_in().into());
        }
        Ok(scheduled_publication(PLATFORM_NAME, "tt", "tiktok.com", content)?)
    }

    async fn delete(&self, publication_id: &str) -> Result<bool> {
        Ok(self.api.delete_video(publication_id).await?)
    }

    async fn get_statistics(&self, publication_id: &str) -> Result<Statistics> {
        let stats = self.api.stats(publication_id).await?;
        Ok(Statistics::new(
            stats.video_id,
            stats.views,
            stats.likes,
            stats.shares,
            stats.comments,
        ))
    }

    async fn list_publications(&self) -> Vec<Publication> {
        self.api
            .list_videos()
            .await
            .iter()
            .map(|video| {
                let content = Content::new(ContentKind::Video)
                    .with_text(video.description.clone())
                    .with_media(media_list(&video.video_url))
                    .with_hashtags(video.hashtags.clone());
                Self::to_publication(video, content)
            })
            .collect()
    }

    async fn is_authenticated(&self) -> bool {
        self.api.is_logged_in().await
    }

    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn validation_report(&self, content: &Content) -> ValidationReport {
        let mut report = ValidationReport::new(PLATFORM_NAME);

        if content.media().is_empty() {
            report
                .errors
                .push("TikTok requires a video".to_string());
            return report;
        }

        if !matches!(content.kind(), ContentKind::Video | ContentKind::Reel) {
            report.errors.push(format!(
                "TikTok only accepts video or reel content (got {})",
                content.kind()
            ));
            return report;
        }

        if content.text_len() > MAX_DESCRIPTION_CHARS {
            report.errors.push(format!(
                "Description exceeds {} characters (got {})",
                MAX_DESCRIPTION_CHARS,
                content.text_len()
            ));
        }

        report
    }

    fn strategy_description(&self) -> String {
        format!("{} / {}", self.auth.name(), self.publisher.describe())
    }
}
