//! Building managers from platform identifiers and strategy names
//!
//! Callers name a platform and pick strategies; the factory hands back a
//! `Box<dyn SocialMediaManager>` so nothing downstream depends on a concrete
//! adapter type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::{InstagramApi, LinkedInApi, MetricsSource, TikTokApi, TwitterApi};
use crate::config::PlatformSettings;
use crate::error::ConfigError;
use crate::platforms::{
    InstagramAdapter, LinkedInAdapter, SocialMediaManager, TikTokAdapter, TwitterAdapter,
};
use crate::strategy::{
    ApiKeyAuth, AuthStrategy, ImmediatePublish, JwtAuth, OAuth2Auth, PublishStrategy,
    ScheduledPublish,
};

/// A supported platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Twitter,
    Instagram,
    LinkedIn,
    TikTok,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::TikTok,
    ];

    /// Lowercase key used in configuration
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
            Platform::TikTok => "tiktok",
        }
    }

    /// Display name, matching `SocialMediaManager::platform_name`
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Twitter => crate::platforms::twitter::PLATFORM_NAME,
            Platform::Instagram => crate::platforms::instagram::PLATFORM_NAME,
            Platform::LinkedIn => crate::platforms::linkedin::PLATFORM_NAME,
            Platform::TikTok => crate::platforms::tiktok::PLATFORM_NAME,
        }
    }

    /// Authentication strategy used when none is configured
    pub fn default_auth(&self) -> AuthKind {
        match self {
            Platform::Twitter | Platform::LinkedIn => AuthKind::OAuth2,
            Platform::Instagram => AuthKind::ApiKey,
            Platform::TikTok => AuthKind::Jwt,
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "linkedin" | "li" => Ok(Platform::LinkedIn),
            "tiktok" | "tt" => Ok(Platform::TikTok),
            _ => Err(ConfigError::UnknownPlatform(s.to_string())),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.key().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

/// Authentication strategy selector
///
/// Unrecognized names fall back to OAuth2 with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthKind {
    OAuth2,
    ApiKey,
    Jwt,
}

impl AuthKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthKind::OAuth2 => "oauth2",
            AuthKind::ApiKey => "apikey",
            AuthKind::Jwt => "jwt",
        }
    }

    /// Parse a strategy name, falling back to OAuth2
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "oauth2" => AuthKind::OAuth2,
            "apikey" => AuthKind::ApiKey,
            "jwt" => AuthKind::Jwt,
            other => {
                warn!(auth = other, "Unknown authentication strategy, using oauth2");
                AuthKind::OAuth2
            }
        }
    }

    pub fn strategy(&self) -> Box<dyn AuthStrategy> {
        match self {
            AuthKind::OAuth2 => Box::new(OAuth2Auth::new()),
            AuthKind::ApiKey => Box::new(ApiKeyAuth::new()),
            AuthKind::Jwt => Box::new(JwtAuth::new()),
        }
    }
}

impl From<String> for AuthKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<AuthKind> for String {
    fn from(kind: AuthKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Publication strategy selector
///
/// Accepts `immediate`/`scheduled` and the aliases `imediata`/`agendada`.
/// Unrecognized names fall back to immediate with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PublishKind {
    Immediate,
    Scheduled,
}

impl PublishKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishKind::Immediate => "immediate",
            PublishKind::Scheduled => "scheduled",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "immediate" | "imediata" => PublishKind::Immediate,
            "scheduled" | "agendada" => PublishKind::Scheduled,
            other => {
                warn!(publish = other, "Unknown publication strategy, using immediate");
                PublishKind::Immediate
            }
        }
    }

    pub fn strategy(&self) -> Box<dyn PublishStrategy> {
        match self {
            PublishKind::Immediate => Box::new(ImmediatePublish::new()),
            PublishKind::Scheduled => Box::new(ScheduledPublish::new()),
        }
    }
}

impl From<String> for PublishKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<PublishKind> for String {
    fn from(kind: PublishKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PublishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Build a manager with the given strategies
pub fn create_manager(
    platform: Platform,
    auth: AuthKind,
    publish: PublishKind,
) -> Box<dyn SocialMediaManager> {
    debug!(%platform, %auth, %publish, "Creating manager");
    let (auth, publisher) = (auth.strategy(), publish.strategy());

    match platform {
        Platform::Twitter => Box::new(TwitterAdapter::new(auth, publisher)),
        Platform::Instagram => Box::new(InstagramAdapter::new(auth, publisher)),
        Platform::LinkedIn => Box::new(LinkedInAdapter::new(auth, publisher)),
        Platform::TikTok => Box::new(TikTokAdapter::new(auth, publisher)),
    }
}

/// Like [`create_manager`], with the native client's analytics drawn from `metrics`
pub fn create_manager_with_metrics(
    platform: Platform,
    auth: AuthKind,
    publish: PublishKind,
    metrics: Box<dyn MetricsSource>,
) -> Box<dyn SocialMediaManager> {
    debug!(%platform, %auth, %publish, "Creating manager with injected metrics");
    let (auth, publisher) = (auth.strategy(), publish.strategy());

    match platform {
        Platform::Twitter => Box::new(TwitterAdapter::with_api(
            TwitterApi::with_metrics(metrics),
            auth,
            publisher,
        )),
        Platform::Instagram => Box::new(InstagramAdapter::with_api(
            InstagramApi::with_metrics(metrics),
            auth,
            publisher,
        )),
        Platform::LinkedIn => Box::new(LinkedInAdapter::with_api(
            LinkedInApi::with_metrics(metrics),
            auth,
            publisher,
        )),
        Platform::TikTok => Box::new(TikTokAdapter::with_api(
            TikTokApi::with_metrics(metrics),
            auth,
            publisher,
        )),
    }
}

/// Platform's default authentication with immediate publication
pub fn create_default_manager(platform: Platform) -> Box<dyn SocialMediaManager> {
    create_manager(platform, platform.default_auth(), PublishKind::Immediate)
}

/// Build a manager from stored settings
///
/// The `active` flag is not consulted; filtering inactive platforms is the
/// caller's decision.
pub fn create_from_config(settings: &PlatformSettings) -> Box<dyn SocialMediaManager> {
    create_manager(settings.platform, settings.auth, settings.publish)
}

pub fn create_from_config_with_metrics(
    settings: &PlatformSettings,
    metrics: Box<dyn MetricsSource>,
) -> Box<dyn SocialMediaManager> {
    create_manager_with_metrics(settings.platform, settings.auth, settings.publish, metrics)
}
