//! Instagram adapter: the image-first platform
//!
//! Story content routes to the native story call, which keeps only the
//! media; everything else becomes a feed post with caption and tags.

use async_trait::async_trait;
use tracing::info;

use crate::clients::instagram::{InstagramApi, InstagramPost, POST_TYPE_STORY};
use crate::error::{PlatformError, Result};
use crate::platforms::{ensure_publishable, media_list, scheduled_publication, SocialMediaManager};
use crate::strategy::{AuthStrategy, PublishStrategy};
use crate::types::{
    Content, ContentKind, Credentials, Publication, PublicationStatus, Statistics,
    ValidationReport,
};

pub const PLATFORM_NAME: &str = "Instagram";
pub const MAX_CAPTION_CHARS: usize = 2200;
pub const MAX_HASHTAGS: usize = 30;

const DEFAULT_STORY_MEDIA: &str = "default_story.jpg";
const DEFAULT_POST_MEDIA: &str = "default_post.jpg";

pub struct InstagramAdapter {
    api: InstagramApi,
    auth: Box<dyn AuthStrategy>,
    publisher: Box<dyn PublishStrategy>,
}

impl InstagramAdapter {
    pub fn new(auth: Box<dyn AuthStrategy>, publisher: Box<dyn PublishStrategy>) -> Self {
        Self::with_api(InstagramApi::new(), auth, publisher)
    }

    pub fn with_api(
        api: InstagramApi,
        auth: Box<dyn AuthStrategy>,
        publisher: Box<dyn PublishStrategy>,
    ) -> Self {
        Self {
            api,
            auth,
            publisher,
        }
    }

    pub fn api(&self) -> &InstagramApi {
        &self.api
    }

    fn to_publication(post: &InstagramPost, content: Content) -> Publication {
        Publication {
            id: post.id.clone(),
            platform: PLATFORM_NAME.to_string(),
            content,
            published_at: post.timestamp,
            status: PublicationStatus::Published,
            url: format!("https://instagram.com/p/{}", post.id),
        }
    }
}

#[async_trait]
impl SocialMediaManager for InstagramAdapter {
    async fn authenticate(&mut self, credentials: &Credentials) -> bool {
        if !self.auth.authenticate(credentials) {
            return false;
        }
        self.api
            .authenticate(&credentials.account, &credentials.access_token)
            .await
    }

    async fn publish(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_authenticated().await {
            return Err(PlatformError::NotAuthenticated(
                "Not authenticated with Instagram".to_string(),
            )
            .into());
        }

        ensure_publishable(self.publisher.as_ref(), self.validation_report(content), content)?;
        let processed = self.publisher.process(content);

        let post = if content.kind() == ContentKind::Story {
            let media = processed.first_media().unwrap_or(DEFAULT_STORY_MEDIA);
            self.api.publish_story(media, "").await?
        } else {
            let media = processed.first_media().unwrap_or(DEFAULT_POST_MEDIA);
            self.api
                .publish_media(processed.text().unwrap_or_default(), media, processed.hashtags())
                .await?
        };

        info!(platform = PLATFORM_NAME, post_id = %post.id, post_type = %post.post_type, "Published to Instagram");
        Ok(Self::to_publication(&post, content.clone()))
    }

    async fn schedule(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_authenticated().await {
            return Err(PlatformError::NotAuthenticated(
                "Not authenticated with Instagram".to_string(),
            )
            .into());
        }
        Ok(scheduled_publication(PLATFORM_NAME, "ig", "instagram.com", content)?)
    }

    async fn delete(&self, publication_id: &str) -> Result<bool> {
        Ok(self.api.delete_post(publication_id).await?)
    }

    async fn get_statistics(&self, publication_id: &str) -> Result<Statistics> {
        let insights = self.api.insights(publication_id).await?;
        Ok(Statistics::new(
            insights.post_id,
            insights.reach,
            insights.likes,
            insights.saves,
            insights.comments,
        ))
    }

    async fn list_publications(&self) -> Vec<Publication> {
        self.api
            .list_posts()
            .await
            .iter()
            .map(|post| {
                let kind = if post.post_type == POST_TYPE_STORY {
                    ContentKind::Story
                } else {
                    ContentKind::Image
                };
                let content = Content::new(kind)
                    .with_text(post.caption.clone())
                    .with_media(media_list(&post.media_url))
                    .with_hashtags(post.tags.clone());
                Self::to_publication(post, content)
            })
            .collect()
    }

    async fn is_authenticated(&self) -> bool {
        self.api.is_authenticated().await
    }

    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn validation_report(&self, content: &Content) -> ValidationReport {
        let mut report = ValidationReport::new(PLATFORM_NAME);

        if content.media().is_empty() {
            report
                .errors
                .push("Instagram requires at least one media item".to_string());
            return report;
        }

        if content.text_len() > MAX_CAPTION_CHARS {
            report.errors.push(format!(
                "Caption exceeds {} characters (got {})",
                MAX_CAPTION_CHARS,
                content.text_len()
            ));
            return report;
        }

        if content.hashtags().len() > MAX_HASHTAGS {
            report.errors.push(format!(
                "At most {} hashtags on Instagram (got {})",
                MAX_HASHTAGS,
                content.hashtags().len()
            ));
        }

        report
    }

    fn strategy_description(&self) -> String {
        format!("{} / {}", self.auth.name(), self.publisher.describe())
    }
}
