//! Messaging-service connector interface.
//!
//! The pipeline talks to the messaging service exclusively through the
//! [`Connector`] trait: fetching a window of messages, downloading media
//! bytes, and (optionally) deleting consumed messages. Everything behind
//! the trait — authentication flows, wire formats, rate limits — is the
//! connector's business.
//!
//! [`botapi::BotApiConnector`] implements the trait over the Telegram Bot
//! HTTP API; tests use in-memory mocks.

pub mod botapi;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::message::{MediaPayload, RawMessage};

/// A resolved channel handle.
///
/// Channel ids in configuration are either numeric or symbolic names;
/// [`Connector::resolve_channel`] turns them into whatever the service
/// actually addresses messages by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    /// Service-native channel identifier.
    pub id: i64,
    /// Human-readable name, for log lines.
    pub name: String,
}

/// Interface to the external messaging service.
///
/// # Contract
///
/// - [`fetch_messages`](Connector::fetch_messages) yields messages
///   **newest-first** and stops at the first message older than `cutoff`
///   (the service streams reverse-chronologically, so the whole history is
///   never scanned).
/// - [`download_media`](Connector::download_media) writes the media bytes
///   to the hinted path and returns the actual location.
/// - [`delete_messages`](Connector::delete_messages) is best-effort;
///   timeouts and retries are not this crate's concern.
///
/// All failures are fatal for the current run.
#[async_trait]
pub trait Connector {
    /// Verifies credentials before any other call.
    async fn authenticate(&self) -> Result<()>;

    /// Resolves a configured channel id (numeric or name) to a handle.
    async fn resolve_channel(&self, channel_id: &str) -> Result<ChannelRef>;

    /// Fetches up to `limit` messages newer than `cutoff`, newest-first.
    async fn fetch_messages(
        &self,
        channel: &ChannelRef,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<RawMessage>>;

    /// Downloads the media payload to `dest_hint`, returning the final path.
    async fn download_media(&self, media: &MediaPayload, dest_hint: &str) -> Result<PathBuf>;

    /// Deletes the given message ids from the channel, best effort.
    async fn delete_messages(&self, channel: &ChannelRef, ids: &[i64]) -> Result<()>;
}
