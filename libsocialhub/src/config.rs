//! Per-environment platform configuration
//!
//! A [`ConfigStore`] maps environment names to the settings of each
//! platform in that environment and tracks which environment is current.
//! Stores are plain values: build one, pass it where it is needed.
//!
//! ```toml
//! environment = "staging"
//!
//! [environments.staging.twitter]
//! platform = "twitter"
//! auth = "oauth2"
//! publish = "scheduled"
//! active = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::factory::{AuthKind, Platform, PublishKind};

pub const CONFIG_ENV: &str = "SOCIALHUB_CONFIG";
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// How one platform is set up in one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub platform: Platform,
    pub auth: AuthKind,
    pub publish: PublishKind,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PlatformSettings {
    pub fn new(platform: Platform, auth: AuthKind, publish: PublishKind, active: bool) -> Self {
        Self {
            platform,
            auth,
            publish,
            active,
        }
    }
}

impl std::fmt::Display for PlatformSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} | {:<7} | {:<9} | {}",
            self.platform,
            self.auth,
            self.publish,
            if self.active { "active" } else { "inactive" }
        )
    }
}

/// On-disk shape. Platform tables may omit `platform`; the table key is used.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    environment: Option<String>,
    #[serde(default)]
    environments: BTreeMap<String, BTreeMap<String, RawSettings>>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    platform: Option<Platform>,
    auth: Option<AuthKind>,
    publish: Option<PublishKind>,
    #[serde(default = "default_active")]
    active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    environment: String,
    environments: BTreeMap<String, BTreeMap<Platform, PlatformSettings>>,
}

impl ConfigStore {
    /// The `development`, `staging` and `production` environments, starting in `development`
    pub fn builtin() -> Self {
        use AuthKind::{ApiKey, Jwt, OAuth2};
        use Platform::{Instagram, LinkedIn, TikTok, Twitter};
        use PublishKind::{Immediate, Scheduled};

        let mut store = Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            environments: BTreeMap::new(),
        };

        let table = [
            ("development", Twitter, OAuth2, Immediate, true),
            ("development", Instagram, ApiKey, Immediate, true),
            ("development", LinkedIn, OAuth2, Immediate, false),
            ("development", TikTok, Jwt, Immediate, true),
            ("staging", Twitter, OAuth2, Scheduled, true),
            ("staging", Instagram, ApiKey, Scheduled, true),
            ("staging", LinkedIn, OAuth2, Scheduled, true),
            ("staging", TikTok, Jwt, Scheduled, true),
            ("production", Twitter, OAuth2, Scheduled, true),
            ("production", Instagram, OAuth2, Scheduled, true),
            ("production", LinkedIn, OAuth2, Scheduled, true),
            ("production", TikTok, Jwt, Scheduled, true),
        ];
        for (env, platform, auth, publish, active) in table {
            store.insert(env, PlatformSettings::new(platform, auth, publish, active));
        }

        store
    }

    /// Parse a TOML document
    ///
    /// Missing `auth` falls back to the platform's default strategy and
    /// missing `publish` to immediate. Without an `environment` key the
    /// store starts in `development`, which must then be defined. Two tables
    /// resolving to the same platform within one environment are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(ConfigError::ParseError)?;

        let mut store = Self {
            environment: String::new(),
            environments: BTreeMap::new(),
        };

        for (env, platforms) in file.environments {
            store.environments.entry(normalize(&env)).or_default();
            for (key, raw) in platforms {
                let platform = match raw.platform {
                    Some(platform) => platform,
                    None => key.parse()?,
                };
                let taken = store
                    .environments
                    .get(&normalize(&env))
                    .is_some_and(|configured| configured.contains_key(&platform));
                if taken {
                    return Err(ConfigError::DuplicatePlatform {
                        environment: normalize(&env),
                        platform: platform.key().to_string(),
                    }
                    .into());
                }
                let settings = PlatformSettings::new(
                    platform,
                    raw.auth.unwrap_or_else(|| platform.default_auth()),
                    raw.publish.unwrap_or(PublishKind::Immediate),
                    raw.active,
                );
                store.insert(&env, settings);
            }
        }

        let environment = file
            .environment
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        store.set_environment(&environment)?;

        Ok(store)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let store = Self::from_toml_str(&content)?;
        info!(path = %path.display(), environment = %store.environment, "Loaded configuration");
        Ok(store)
    }

    /// Load from `SOCIALHUB_CONFIG` or the XDG config directory
    ///
    /// Falls back to [`ConfigStore::builtin`] when no file exists there.
    pub fn load() -> Result<Self> {
        let path = resolve_config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            debug!(path = %path.display(), "No configuration file, using built-in environments");
            Ok(Self::builtin())
        }
    }

    /// Switch the current environment (case-insensitive)
    pub fn set_environment(&mut self, name: &str) -> Result<()> {
        let key = normalize(name);
        if !self.environments.contains_key(&key) {
            return Err(ConfigError::UnknownEnvironment(name.to_string()).into());
        }
        info!(environment = %key, "Environment selected");
        self.environment = key;
        Ok(())
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn environments(&self) -> Vec<&str> {
        self.environments.keys().map(String::as_str).collect()
    }

    /// Settings for a platform in the current environment
    pub fn settings(&self, platform: &str) -> Result<&PlatformSettings> {
        let parsed: Platform = platform.parse()?;
        self.current()
            .and_then(|platforms| platforms.get(&parsed))
            .ok_or_else(|| ConfigError::UnknownPlatform(platform.to_string()).into())
    }

    /// Active platforms in the current environment, sorted by name
    pub fn active_platforms(&self) -> Vec<PlatformSettings> {
        let mut active: Vec<PlatformSettings> = self
            .current()
            .map(|platforms| platforms.values().filter(|s| s.active).copied().collect())
            .unwrap_or_default();
        active.sort_by_key(|s| s.platform.key());
        active
    }

    /// Every configured platform in the current environment, active or not
    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self
            .current()
            .map(|platforms| platforms.keys().copied().collect())
            .unwrap_or_default();
        platforms.sort_by_key(|p| p.key());
        platforms
    }

    /// Add or replace a platform's settings, creating the environment if needed
    pub fn upsert(&mut self, environment: &str, settings: PlatformSettings) {
        self.insert(environment, settings);
        info!(environment = %normalize(environment), platform = %settings.platform, "Configuration updated");
    }

    fn insert(&mut self, environment: &str, settings: PlatformSettings) {
        self.environments
            .entry(normalize(environment))
            .or_default()
            .insert(settings.platform, settings);
    }

    fn current(&self) -> Option<&BTreeMap<Platform, PlatformSettings>> {
        self.environments.get(&self.environment)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve the configuration file path following the XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("socialhub").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;

    #[test]
    fn test_builtin_development() {
        let store = ConfigStore::builtin();
        assert_eq!(store.environment(), "development");

        let active: Vec<Platform> = store.active_platforms().iter().map(|s| s.platform).collect();
        assert_eq!(
            active,
            vec![Platform::Instagram, Platform::TikTok, Platform::Twitter]
        );
        assert_eq!(store.platforms().len(), 4);
        assert!(!store.settings("linkedin").unwrap().active);
    }

    #[test]
    fn test_builtin_production_uses_oauth_for_instagram() {
        let mut store = ConfigStore::builtin();
        store.set_environment("PRODUCTION").unwrap();

        let instagram = store.settings("ig").unwrap();
        assert_eq!(instagram.auth, AuthKind::OAuth2);
        assert_eq!(instagram.publish, PublishKind::Scheduled);
        assert_eq!(store.active_platforms().len(), 4);
    }

    #[test]
    fn test_unknown_environment_keeps_current() {
        let mut store = ConfigStore::builtin();
        let err = store.set_environment("qa").unwrap_err();

        assert!(matches!(err, HubError::Config(ConfigError::UnknownEnvironment(_))));
        assert_eq!(store.environment(), "development");
    }

    #[test]
    fn test_unknown_platform() {
        let store = ConfigStore::builtin();
        assert!(matches!(
            store.settings("myspace"),
            Err(HubError::Config(ConfigError::UnknownPlatform(_)))
        ));
    }

    #[test]
    fn test_upsert_creates_environment() {
        let mut store = ConfigStore::builtin();
        store.upsert(
            "QA",
            PlatformSettings::new(Platform::TikTok, AuthKind::ApiKey, PublishKind::Immediate, true),
        );
        store.set_environment("qa").unwrap();

        assert_eq!(store.platforms(), vec![Platform::TikTok]);
        assert_eq!(store.settings("tiktok").unwrap().auth, AuthKind::ApiKey);
    }

    #[test]
    fn test_from_toml_str() {
        let store = ConfigStore::from_toml_str(
            r#"
            environment = "Staging"

            [environments.staging.twitter]
            auth = "apikey"
            publish = "agendada"

            [environments.staging.tt]
            platform = "tiktok"
            active = false
            "#,
        )
        .unwrap();

        assert_eq!(store.environment(), "staging");
        let twitter = store.settings("twitter").unwrap();
        assert_eq!(twitter.auth, AuthKind::ApiKey);
        assert_eq!(twitter.publish, PublishKind::Scheduled);
        assert!(twitter.active);

        let tiktok = store.settings("tiktok").unwrap();
        assert_eq!(tiktok.auth, AuthKind::Jwt);
        assert!(!tiktok.active);
    }

    #[test]
    fn test_from_toml_str_rejects_duplicate_platform() {
        let aliased = ConfigStore::from_toml_str(
            r#"
            [environments.development.twitter]
            auth = "oauth2"

            [environments.development.x]
            auth = "apikey"
            "#,
        );
        match aliased {
            Err(HubError::Config(ConfigError::DuplicatePlatform { environment, platform })) => {
                assert_eq!(environment, "development");
                assert_eq!(platform, "twitter");
            }
            other => panic!("Expected DuplicatePlatform, got {:?}", other),
        }

        let retargeted = ConfigStore::from_toml_str(
            r#"
            [environments.development.twitter]
            platform = "tiktok"

            [environments.development.tiktok]
            auth = "jwt"
            "#,
        );
        assert!(matches!(
            retargeted,
            Err(HubError::Config(ConfigError::DuplicatePlatform { .. }))
        ));

        let across_case = ConfigStore::from_toml_str(
            r#"
            [environments.Development.instagram]
            [environments.development.ig]
            "#,
        );
        assert!(matches!(
            across_case,
            Err(HubError::Config(ConfigError::DuplicatePlatform { .. }))
        ));
    }

    #[test]
    fn test_from_toml_str_requires_selected_environment() {
        let result = ConfigStore::from_toml_str(
            r#"
            [environments.production.twitter]
            platform = "twitter"
            "#,
        );
        assert!(matches!(
            result,
            Err(HubError::Config(ConfigError::UnknownEnvironment(_)))
        ));
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_platform() {
        let result = ConfigStore::from_toml_str(
            r#"
            [environments.development.myspace]
            auth = "oauth2"
            "#,
        );
        assert!(matches!(
            result,
            Err(HubError::Config(ConfigError::UnknownPlatform(_)))
        ));
    }

    #[test]
    fn test_settings_display() {
        let settings =
            PlatformSettings::new(Platform::LinkedIn, AuthKind::OAuth2, PublishKind::Immediate, false);
        let line = settings.to_string();
        assert!(line.contains("LinkedIn"));
        assert!(line.ends_with("inactive"));
    }
}
