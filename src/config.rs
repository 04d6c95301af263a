//! Environment-driven configuration.
//!
//! Everything comes from the process environment, optionally seeded from a
//! `.env` file. Missing identifiers never fail startup: they disable the
//! collections that need them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::types::ChannelId;
use crate::watcher::{CollectionTarget, PollConfig, WatchTargets};

pub const DEFAULT_STATE_FILE: &str = "notion_state.json";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

/// A variable that is set but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{var}={value:?} is invalid: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Credentials
    pub notion_token: Option<String>,
    pub discord_token: Option<String>,

    // Collections
    pub feature_database_id: Option<String>,
    pub board_database_id: Option<String>,
    pub schedule_database_id: Option<String>,

    // Destinations
    pub feature_channel: Option<ChannelId>,
    pub alarm_channel: Option<ChannelId>,

    // Runtime
    pub state_file: PathBuf,
    pub http_addr: SocketAddr,
    pub poll: PollConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|var| std::env::var(var).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Builds the configuration from any variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut poll = PollConfig::new();
        if let Some(secs) = parse_secs(&get, "HERALD_POLL_INTERVAL_SECS")? {
            poll.poll_interval = secs;
        }
        if let Some(secs) = parse_secs(&get, "HERALD_SETTLE_DELAY_SECS")? {
            poll.settle_delay = secs;
        }
        if let Some(secs) = parse_secs(&get, "HERALD_FETCH_TIMEOUT_SECS")? {
            poll.fetch_timeout = secs;
        }
        if let Some(secs) = parse_secs(&get, "HERALD_SEND_TIMEOUT_SECS")? {
            poll.send_timeout = secs;
        }

        let addr = get("HERALD_HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = addr.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            var: "HERALD_HTTP_ADDR",
            value: addr.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            notion_token: get("NOTION_TOKEN"),
            discord_token: get("DISCORD_TOKEN"),
            feature_database_id: get("NOTION_DATABASE_FEATURE_ID"),
            board_database_id: get("NOTION_DATABASE_BOARD_ID"),
            schedule_database_id: get("NOTION_DATABASE_SCHEDULE_ID"),
            feature_channel: parse_channel(&get, "REPORT_CHANNEL_ID_FEATURE")?,
            alarm_channel: parse_channel(&get, "REPORT_CHANNEL_ID_ALARM")?,
            state_file: get("NOTION_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            http_addr,
            poll,
        })
    }

    /// Collections that have everything they need to be polled.
    ///
    /// Without both credentials nothing can be polled or announced, so every
    /// collection is disabled.
    pub fn targets(&self) -> WatchTargets {
        if self.notion_token.is_none() || self.discord_token.is_none() {
            return WatchTargets::default();
        }
        let target = |id: &Option<String>, channel: Option<ChannelId>| {
            Some(CollectionTarget::new(id.clone()?, channel?))
        };
        WatchTargets {
            features: target(&self.feature_database_id, self.feature_channel),
            boards: target(&self.board_database_id, self.alarm_channel),
            schedules: target(&self.schedule_database_id, self.alarm_channel),
        }
    }

    fn log_keys(&self) {
        fn preview(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let n = v.chars().take(5).collect::<String>();
                    format!("{n}...({} chars)", v.chars().count())
                }
                None => "<not set>".to_string(),
            }
        }

        info!("Config loaded:");
        info!("  NOTION_TOKEN: {}", preview(&self.notion_token));
        info!("  DISCORD_TOKEN: {}", preview(&self.discord_token));
        info!("  NOTION_STATE_FILE: {}", self.state_file.display());
        info!("  HERALD_HTTP_ADDR: {}", self.http_addr);
        if self.notion_token.is_none() {
            warn!("NOTION_TOKEN not set, all collections disabled");
        }
        if self.discord_token.is_none() {
            warn!("DISCORD_TOKEN not set, all collections disabled");
        }
    }
}

fn parse_secs(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>> {
    let Some(value) = get(var) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError {
            var,
            value,
            reason: "must be positive".to_string(),
        }),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(e) => Err(ConfigError {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

fn parse_channel(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<ChannelId>> {
    let Some(value) = get(var) else {
        return Ok(None);
    };
    // 0 is the deployment's placeholder for "no channel".
    value
        .parse::<u64>()
        .map(|id| (id != 0).then_some(ChannelId(id)))
        .map_err(|e| ConfigError {
            var,
            value,
            reason: e.to_string(),
        })
}
