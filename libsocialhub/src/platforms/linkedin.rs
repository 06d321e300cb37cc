//! LinkedIn adapter: the professional network
//!
//! LinkedIn has no native hashtag field, so hashtags are dropped on publish
//! and listed publications never carry any. Articles are stored with a
//! generic title line which is stripped again when listing.

use async_trait::async_trait;
use tracing::info;

use crate::clients::linkedin::{LinkedInApi, Share, SHARE_TYPE_ARTICLE};
use crate::error::{PlatformError, Result};
use crate::platforms::{ensure_publishable, media_list, scheduled_publication, SocialMediaManager};
use crate::strategy::{AuthStrategy, PublishStrategy};
use crate::types::{
    Content, ContentKind, Credentials, Publication, PublicationStatus, Statistics,
    ValidationReport,
};

pub const PLATFORM_NAME: &str = "LinkedIn";
pub const MAX_TEXT_CHARS: usize = 3000;
/// Above this many hashtags a warning is raised; the content stays valid
pub const RECOMMENDED_MAX_HASHTAGS: usize = 5;

const ARTICLE_TITLE: &str = "Article";

pub struct LinkedInAdapter {
    api: LinkedInApi,
    auth: Box<dyn AuthStrategy>,
    publisher: Box<dyn PublishStrategy>,
}

impl LinkedInAdapter {
    pub fn new(auth: Box<dyn AuthStrategy>, publisher: Box<dyn PublishStrategy>) -> Self {
        Self::with_api(LinkedInApi::new(), auth, publisher)
    }

    pub fn with_api(
        api: LinkedInApi,
        auth: Box<dyn AuthStrategy>,
        publisher: Box<dyn PublishStrategy>,
    ) -> Self {
        Self {
            api,
            auth,
            publisher,
        }
    }

    pub fn api(&self) -> &LinkedInApi {
        &self.api
    }

    fn to_publication(share: &Share, content: Content) -> Publication {
        Publication {
            id: share.id.clone(),
            platform: PLATFORM_NAME.to_string(),
            content,
            published_at: share.published_at,
            status: PublicationStatus::Published,
            url: format!("https://linkedin.com/posts/{}", share.id),
        }
    }

    fn not_connected() -> PlatformError {
        PlatformError::NotAuthenticated("Not connected to LinkedIn".to_string())
    }
}

/// Article body without the title line
fn article_body(text: &str) -> &str {
    text.split_once('\n').map_or("", |(_, body)| body)
}

#[async_trait]
impl SocialMediaManager for LinkedInAdapter {
    async fn authenticate(&mut self, credentials: &Credentials) -> bool {
        if !self.auth.authenticate(credentials) {
            return false;
        }
        self.api
            .establish_connection(
                &credentials.api_key,
                &credentials.api_secret,
                &credentials.access_token,
            )
            .await
    }

    async fn publish(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_connected().await {
            return Err(Self::not_connected().into());
        }

        ensure_publishable(self.publisher.as_ref(), self.validation_report(content), content)?;
        let processed = self.publisher.process(content);
        let text = processed.text().unwrap_or_default();
        let image = processed.first_media().unwrap_or_default();

        let share = if content.kind() == ContentKind::Article {
            self.api.publish_article(ARTICLE_TITLE, text, image).await?
        } else {
            self.api.share(text, "", image).await?
        };

        info!(platform = PLATFORM_NAME, share_id = %share.id, share_type = %share.share_type, "Published to LinkedIn");
        Ok(Self::to_publication(&share, content.clone()))
    }

    async fn schedule(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_connected().await {
            return Err(Self::not_connected().into());
        }
        Ok(scheduled_publication(PLATFORM_NAME, "li", "linkedin.com", content)?)
    }

    async fn delete(&self, publication_id: &str) -> Result<bool> {
        Ok(self.api.remove_share(publication_id).await?)
    }

    async fn get_statistics(&self, publication_id: &str) -> Result<Statistics> {
        let analytics = self.api.analytics(publication_id).await?;
        Ok(Statistics::new(
            analytics.share_id,
            analytics.views,
            analytics.reactions,
            analytics.shares,
            analytics.comments,
        ))
    }

    async fn list_publications(&self) -> Vec<Publication> {
        self.api
            .list_shares()
            .await
            .iter()
            .map(|share| {
                let content = if share.share_type == SHARE_TYPE_ARTICLE {
                    Content::new(ContentKind::Article).with_text(article_body(&share.text))
                } else {
                    Content::new(ContentKind::Text).with_text(share.text.clone())
                };
                let content = content.with_media(media_list(&share.image_url));
                Self::to_publication(share, content)
            })
            .collect()
    }

    async fn is_authenticated(&self) -> bool {
        self.api.is_connected().await
    }

    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn validation_report(&self, content: &Content) -> ValidationReport {
        let mut report = ValidationReport::new(PLATFORM_NAME);

        if content.text().map_or(true, str::is_empty) {
            report
                .errors
                .push("LinkedIn requires non-empty text".to_string());
            return report;
        }

        if content.text_len() > MAX_TEXT_CHARS {
            report.errors.push(format!(
                "Text exceeds {} characters (got {})",
                MAX_TEXT_CHARS,
                content.text_len()
            ));
            return report;
        }

        if content.hashtags().len() > RECOMMENDED_MAX_HASHTAGS {
            report.warnings.push(format!(
                "{} hashtags; LinkedIn recommends at most {}",
                content.hashtags().len(),
                RECOMMENDED_MAX_HASHTAGS
            ));
        }

        report
    }

    fn strategy_description(&self) -> String {
        format!("{} / {}", self.auth.name(), self.publisher.describe())
    }
}
