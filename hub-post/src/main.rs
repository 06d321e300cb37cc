//! hub-post - Publish content to every active social platform

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use libsocialhub::logging;
use libsocialhub::{
    ConfigStore, Content, ContentKind, Credentials, HubError, PlatformError, PlatformStatistics,
    PublishResponse, PublishingService, Result,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "hub-post")]
#[command(version)]
#[command(about = "Publish content to every active social platform")]
#[command(long_about = "\
hub-post - Publish content to every active social platform

DESCRIPTION:
    Publishes one piece of content to each platform that is active in the
    selected environment. Every platform validates the content against its
    own rules; a rejection on one platform never blocks the others.

USAGE:
    # Text post to every active platform
    hub-post \"Launching today!\"

    # Photo with hashtags, Instagram only
    hub-post \"Sunset\" --kind image --media sunset.jpg --hashtags '#sunset,#sea' -p ig

    # Schedule for tomorrow in staging
    hub-post \"Coming soon\" --env staging --schedule-in 1day

    # Content from stdin
    echo \"Hello\" | hub-post

    # Reproducible analytics for what was just published
    hub-post \"Hello\" --seed 42 --stats

CREDENTIALS:
    Read from SOCIALHUB_ACCOUNT, SOCIALHUB_API_KEY, SOCIALHUB_API_SECRET,
    SOCIALHUB_ACCESS_TOKEN and SOCIALHUB_REFRESH_TOKEN. Demo values are used
    when unset. Matching hidden flags exist for scripting, but values passed
    on the command line are visible in the process list; prefer the
    environment.

CONFIGURATION:
    ~/.config/socialhub/config.toml, or the file named by SOCIALHUB_CONFIG.
    Built-in environments (development, staging, production) apply when no
    file exists.

EXIT CODES:
    0 - Published on at least one platform
    1 - Every platform failed, or a configuration error
    2 - No platform accepted the credentials
    3 - Invalid input (empty content, bad duration)
")]
struct Cli {
    /// Content text (reads from stdin if not provided)
    content: Option<String>,

    /// Target specific platform(s) (comma-separated; defaults to all active)
    #[arg(short, long, value_delimiter = ',')]
    platform: Vec<String>,

    /// Environment to use from the configuration
    #[arg(short, long)]
    env: Option<String>,

    /// Configuration file
    #[arg(long, env = "SOCIALHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Kind of content (text, image, video, story, reel, article)
    #[arg(short, long, default_value = "text")]
    kind: ContentKind,

    /// Media references (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    media: Vec<String>,

    /// Hashtags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    hashtags: Vec<String>,

    /// Schedule instead of publishing now (e.g. "30m", "2h", "1day")
    #[arg(short, long, value_parser = humantime::parse_duration)]
    schedule_in: Option<Duration>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Seed for reproducible simulated analytics (see --stats)
    #[arg(long)]
    seed: Option<u64>,

    /// Print analytics for every publication after publishing
    #[arg(long)]
    stats: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[arg(
        long,
        env = "SOCIALHUB_ACCOUNT",
        default_value = "demo-account",
        hide_env_values = true,
        hide = true
    )]
    account: String,

    #[arg(
        long,
        env = "SOCIALHUB_API_KEY",
        default_value = "demo-api-key",
        hide_env_values = true,
        hide = true
    )]
    api_key: String,

    #[arg(
        long,
        env = "SOCIALHUB_API_SECRET",
        default_value = "demo-api-secret",
        hide_env_values = true,
        hide = true
    )]
    api_secret: String,

    #[arg(
        long,
        env = "SOCIALHUB_ACCESS_TOKEN",
        default_value = "demo-access-token",
        hide_env_values = true,
        hide = true
    )]
    access_token: String,

    #[arg(
        long,
        env = "SOCIALHUB_REFRESH_TOKEN",
        default_value = "demo-refresh-token",
        hide_env_values = true,
        hide = true
    )]
    refresh_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::config_from_env(cli.verbose, "error").init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let text = read_content(cli.content.as_deref())?;

    let mut store = match &cli.config {
        Some(path) => ConfigStore::load_from_path(path)?,
        None => ConfigStore::load()?,
    };
    if let Some(env) = &cli.env {
        store.set_environment(env)?;
    }

    let settings = if cli.platform.is_empty() {
        store.active_platforms()
    } else {
        cli.platform
            .iter()
            .map(|name| store.settings(name).copied())
            .collect::<Result<Vec<_>>>()?
    };
    if settings.is_empty() {
        return Err(HubError::InvalidInput(format!(
            "No active platforms in environment '{}'",
            store.environment()
        )));
    }
    debug!(environment = store.environment(), platforms = settings.len(), "Platforms selected");

    let mut service = match cli.seed {
        Some(seed) => PublishingService::from_settings_seeded(&settings, seed),
        None => PublishingService::from_settings(&settings),
    };

    let credentials = Credentials::new(
        cli.account,
        cli.api_key,
        cli.api_secret,
        cli.access_token,
        cli.refresh_token,
    );
    let authenticated = service.authenticate_all(&credentials).await;
    if !authenticated.iter().any(|(_, ok)| *ok) {
        return Err(PlatformError::NotAuthenticated(
            "No platform accepted the credentials".to_string(),
        )
        .into());
    }

    let mut content = Content::new(cli.kind)
        .with_text(text)
        .with_media(cli.media)
        .with_hashtags(cli.hashtags);

    let response = match cli.schedule_in {
        Some(delay) => {
            let delay = chrono::Duration::from_std(delay)
                .map_err(|e| HubError::InvalidInput(format!("Invalid schedule delay: {}", e)))?;
            content = content.scheduled_at(chrono::Utc::now() + delay);
            service.schedule_all(&content).await
        }
        None => service.publish_all(&content).await,
    };

    let statistics = if cli.stats {
        Some(service.statistics_all().await)
    } else {
        None
    };

    print_response(&response, statistics.as_deref(), cli.format)?;

    if !response.overall_success {
        return Err(PlatformError::Publishing("All platforms failed".to_string()).into());
    }

    info!("Done");
    Ok(())
}

/// Content from the argument, or stdin when it is piped
fn read_content(arg: Option<&str>) -> Result<String> {
    let text = match arg {
        Some(text) => text.to_string(),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(HubError::InvalidInput(
                    "No content provided (pass it as an argument or pipe it on stdin)".to_string(),
                ));
            }
            let mut buffer = String::new();
            stdin
                .lock()
                .read_to_string(&mut buffer)
                .map_err(|e| HubError::InvalidInput(format!("Failed to read stdin: {}", e)))?;
            buffer
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(HubError::InvalidInput("Content cannot be empty".to_string()));
    }
    Ok(text.to_string())
}

fn print_response(
    response: &PublishResponse,
    statistics: Option<&[PlatformStatistics]>,
    format: OutputFormat,
) -> Result<()> {
    let encode_error =
        |e: serde_json::Error| HubError::Output(format!("Failed to encode output: {}", e));

    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_value(response).map_err(encode_error)?;
            if let (Some(statistics), Some(object)) = (statistics, json.as_object_mut()) {
                object.insert(
                    "statistics".to_string(),
                    serde_json::to_value(statistics).map_err(encode_error)?,
                );
            }
            let json = serde_json::to_string_pretty(&json).map_err(encode_error)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for result in &response.results {
                match (&result.publication, &result.error) {
                    (Some(publication), _) => println!(
                        "{}:{} {} [{}]",
                        result.platform, publication.id, publication.url, publication.status
                    ),
                    (None, error) => eprintln!(
                        "{}: {}",
                        result.platform,
                        error.as_deref().unwrap_or("failed")
                    ),
                }
            }
            for entry in statistics.unwrap_or_default() {
                for stats in &entry.statistics {
                    println!("{} {}", entry.platform, stats);
                }
            }
        }
    }
    Ok(())
}
