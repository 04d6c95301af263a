//! Notification sink: where announcements are posted.
//!
//! Delivery is fire-and-forget from the watcher's point of view: a failed
//! send is logged and the notification is dropped. Tracked state has already
//! been committed by then.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

mod chunk;
mod discord;

pub use chunk::chunk_message;
pub use discord::{DISCORD_API_BASE, DISCORD_MESSAGE_LIMIT, DiscordSink};

use crate::types::ChannelId;

/// Errors from delivering a notification.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The destination does not exist or the bot cannot see it.
    #[error("channel {channel} could not be resolved: {reason}")]
    UnresolvedChannel { channel: ChannelId, reason: String },

    /// The chat API answered with a non-success status.
    #[error("chat API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never got an answer.
    #[error("chat API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The send did not finish within the allowed time.
    #[error("chat API did not answer within {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Posts a text block to a destination channel.
pub trait NotificationSink {
    fn send(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> impl Future<Output = Result<(), SinkError>> + Send;
}
