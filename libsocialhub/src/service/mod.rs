//! Service layer over the platform managers
//!
//! `PublishingService` is the entry point for anything that acts on several
//! platforms at once (the CLI, tests, future front-ends).
//!
//! # Example
//!
//! ```no_run
//! use libsocialhub::config::ConfigStore;
//! use libsocialhub::service::PublishingService;
//! use libsocialhub::types::{Content, Credentials};
//!
//! # async fn example() -> libsocialhub::Result<()> {
//! let store = ConfigStore::load()?;
//! let mut service = PublishingService::from_config(&store);
//!
//! let credentials = Credentials::new("agency", "key", "secret", "token", "refresh");
//! service.authenticate_all(&credentials).await;
//!
//! let response = service.publish_all(&Content::text_post("Hello!")).await;
//! println!("{} platforms succeeded", response.results.iter().filter(|r| r.success).count());
//! # Ok(())
//! # }
//! ```

pub mod publishing;

pub use publishing::{PlatformResult, PlatformStatistics, PublishResponse, PublishingService};
