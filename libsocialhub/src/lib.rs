//! SocialHub - one publishing contract for many social platforms
//!
//! Each platform's API has its own login call, record shapes and analytics
//! counters. This library hides those behind [`SocialMediaManager`]:
//! adapters translate unified content into native calls and native records
//! back into unified publications and statistics. Authentication and
//! publication behaviour are pluggable strategies, and a per-environment
//! [`ConfigStore`] decides which platforms are active and how.

pub mod clients;
pub mod config;
pub mod error;
pub mod factory;
pub mod logging;
pub mod platforms;
pub mod service;
pub mod strategy;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigStore, PlatformSettings};
pub use error::{ConfigError, HubError, PlatformError, Result};
pub use factory::{AuthKind, Platform, PublishKind};
pub use platforms::SocialMediaManager;
pub use service::{PlatformStatistics, PublishResponse, PublishingService};
pub use types::{
    Content, ContentKind, Credentials, Publication, PublicationStatus, Statistics,
    ValidationReport,
};
