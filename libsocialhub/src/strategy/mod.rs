//! Swappable authentication and publication behaviour
//!
//! Adapters receive one [`AuthStrategy`] and one [`PublishStrategy`] at
//! construction time and delegate to them. Strategies are chosen
//! independently of the platform, so the same adapter can run with OAuth 2.0
//! in one environment and an API key in another.

pub mod auth;
pub mod publish;

pub use auth::{ApiKeyAuth, AuthStrategy, JwtAuth, OAuth2Auth};
pub use publish::{ImmediatePublish, PublishStrategy, ScheduledPublish};
