//! Error types for SocialHub

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl HubError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HubError::InvalidInput(_) => 3,
            HubError::Platform(PlatformError::NotAuthenticated(_)) => 2,
            HubError::Platform(_) => 1,
            HubError::Config(_) => 1,
            HubError::Output(_) => 1,
        }
    }

    /// The platform error inside, if any
    pub fn as_platform(&self) -> Option<&PlatformError> {
        match self {
            HubError::Platform(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Environment not configured: {0}")]
    UnknownEnvironment(String),

    #[error("Platform not supported: {0}")]
    UnknownPlatform(String),

    #[error("Platform {platform} configured more than once in environment '{environment}'")]
    DuplicatePlatform {
        environment: String,
        platform: String,
    },
}

/// Faults raised by adapters and native clients
///
/// `NotAuthenticated` is the illegal-state fault: the operation needs a live
/// native session. `InvalidContent` is the invalid-argument fault: the content
/// was rejected by the publication strategy or the platform's rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Publishing failed: {0}")]
    Publishing(String),
}
