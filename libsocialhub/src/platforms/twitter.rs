//! Twitter (X) adapter: the short-text platform

use async_trait::async_trait;
use tracing::info;

use crate::clients::twitter::{Tweet, TwitterApi};
use crate::error::{PlatformError, Result};
use crate::platforms::{ensure_publishable, scheduled_publication, SocialMediaManager};
use crate::strategy::{AuthStrategy, PublishStrategy};
use crate::types::{
    Content, ContentKind, Credentials, Publication, PublicationStatus, Statistics,
    ValidationReport,
};

pub const PLATFORM_NAME: &str = "Twitter";
pub const MAX_TEXT_CHARS: usize = 280;
pub const MAX_MEDIA: usize = 4;

pub struct TwitterAdapter {
    api: TwitterApi,
    auth: Box<dyn AuthStrategy>,
    publisher: Box<dyn PublishStrategy>,
}

impl TwitterAdapter {
    pub fn new(auth: Box<dyn AuthStrategy>, publisher: Box<dyn PublishStrategy>) -> Self {
        Self::with_api(TwitterApi::new(), auth, publisher)
    }

    pub fn with_api(
        api: TwitterApi,
        auth: Box<dyn AuthStrategy>,
        publisher: Box<dyn PublishStrategy>,
    ) -> Self {
        Self {
            api,
            auth,
            publisher,
        }
    }

    /// The wrapped native client
    pub fn api(&self) -> &TwitterApi {
        &self.api
    }

    fn to_publication(tweet: &Tweet, content: Content) -> Publication {
        Publication {
            id: tweet.id.clone(),
            platform: PLATFORM_NAME.to_string(),
            content,
            published_at: tweet.created_at,
            status: PublicationStatus::Published,
            url: format!("https://twitter.com/post/{}", tweet.id),
        }
    }
}

#[async_trait]
impl SocialMediaManager for TwitterAdapter {
    async fn authenticate(&mut self, credentials: &Credentials) -> bool {
        if !self.auth.authenticate(credentials) {
            return false;
        }
        self.api
            .connect(&credentials.api_key, &credentials.api_secret)
            .await
    }

    async fn publish(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_connected().await {
            return Err(PlatformError::NotAuthenticated(
                "Not authenticated with Twitter".to_string(),
            )
            .into());
        }

        ensure_publishable(self.publisher.as_ref(), self.validation_report(content), content)?;
        let processed = self.publisher.process(content);

        let tweet = self
            .api
            .create_tweet(
                processed.text().unwrap_or_default(),
                processed.media(),
                processed.hashtags(),
            )
            .await?;

        info!(platform = PLATFORM_NAME, tweet_id = %tweet.id, "Published tweet");
        Ok(Self::to_publication(&tweet, content.clone()))
    }

    async fn schedule(&self, content: &Content) -> Result<Publication> {
        if !self.api.is_connected().await {
            return Err(PlatformError::NotAuthenticated(
                "Not authenticated with Twitter".to_string(),
            )
            .into());
        }
        Ok(scheduled_publication(PLATFORM_NAME, "tw", "twitter.com", content)?)
    }

    async fn delete(&self, publication_id: &str) -> Result<bool> {
        Ok(self.api.remove_tweet(publication_id).await?)
    }

    async fn get_statistics(&self, publication_id: &str) -> Result<Statistics> {
        let metrics = self.api.metrics(publication_id).await?;
        Ok(Statistics::new(
            metrics.tweet_id,
            metrics.impressions,
            metrics.likes,
            metrics.retweets,
            metrics.replies,
        ))
    }

    async fn list_publications(&self) -> Vec<Publication> {
        self.api
            .list_tweets()
            .await
            .iter()
            .map(|tweet| {
                let content = Content::new(ContentKind::Text)
                    .with_text(tweet.text.clone())
                    .with_media(tweet.media.clone())
                    .with_hashtags(tweet.hashtags.clone());
                Self::to_publication(tweet, content)
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

        if content.text().is_none() || content.text_len() > MAX_TEXT_CHARS {
            report.errors.push(format!(
                "Text is missing or exceeds {} characters (got {})",
                MAX_TEXT_CHARS,
                content.text_len()
            ));
            return report;
        }

        if content.media().len() > MAX_MEDIA {
            report.errors.push(format!(
                "At most {} media items per tweet (got {})",
                MAX_MEDIA,
                content.media().len()
            ));
        }

        report
    }

    fn strategy_description(&self) -> String {
        format!("{} / {}", self.auth.name(), self.publisher.describe())
    }
}
