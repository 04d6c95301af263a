//! Discord REST client implementing [`NotificationSink`].
//!
//! Channels are resolved once and cached; a cache miss falls back to a
//! remote lookup so that a mistyped channel id surfaces as a clear
//! resolution error instead of a bare 404 on every post.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::chunk::chunk_message;
use super::{NotificationSink, SinkError};
use crate::types::ChannelId;

/// Production API root, including the version.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Maximum characters in one Discord message.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// What the herald keeps about a resolved channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedChannel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A bot-token Discord client.
#[derive(Clone)]
pub struct DiscordSink {
    http: reqwest::Client,
    base_url: String,
    token: String,
    channels: Arc<Mutex<HashMap<ChannelId, ResolvedChannel>>>,
}

impl DiscordSink {
    /// Creates a client for the public API with a per-request timeout.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(DiscordSink {
            http,
            base_url: DISCORD_API_BASE.to_string(),
            token: token.into(),
            channels: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Points the client at another API root (a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn cached(&self, channel: ChannelId) -> Option<ResolvedChannel> {
        self.channels
            .lock()
            .ok()
            .and_then(|cache| cache.get(&channel).cloned())
    }

    /// Resolves a channel, from the cache if possible.
    pub async fn resolve_channel(&self, channel: ChannelId) -> Result<ResolvedChannel, SinkError> {
        if let Some(resolved) = self.cached(channel) {
            return Ok(resolved);
        }

        let response = self
            .http
            .get(format!("{}/channels/{}", self.base_url, channel))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::UnresolvedChannel {
                channel,
                reason: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        let resolved: ResolvedChannel = response.json().await?;
        debug!(channel = %channel, name = ?resolved.name, "Resolved channel");
        if let Ok(mut cache) = self.channels.lock() {
            cache.insert(channel, resolved.clone());
        }
        Ok(resolved)
    }

    async fn post_message(&self, channel: ChannelId, content: &str) -> Result<(), SinkError> {
        let response = self
            .http
            .post(format!("{}/channels/{}/messages", self.base_url, channel))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(channel = %channel, status = %status, "Message post rejected");
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for DiscordSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSink")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NotificationSink for DiscordSink {
    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), SinkError> {
        self.resolve_channel(channel).await?;
        for chunk in chunk_message(text, DISCORD_MESSAGE_LIMIT) {
            self.post_message(channel, &chunk).await?;
        }
        Ok(())
    }
}
