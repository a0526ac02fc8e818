//! Telegram Bot HTTP API connector.
//!
//! [`BotApiConnector`] implements [`Connector`](super::Connector) over the
//! Bot API (`getMe` / `getChat` / `getUpdates` / `getFile` /
//! `deleteMessage`). It needs a bot token and the bot must be a member of
//! the target channel.
//!
//! # Limitations of the Bot API surface
//!
//! - History paging is not available to bots; `fetch_messages` drains the
//!   update queue for the target chat and sorts it newest-first. Messages
//!   already consumed by a previous poll are gone.
//! - Webpage previews are not exposed to bots, so link messages arrive as
//!   plain text; the preview-specific rendering only triggers for
//!   connectors that can see them.
//!
//! These are connector concerns: the pipeline is oblivious to them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::{ChannelRef, Connector};
use crate::error::{Result, TeletoloError};
use crate::message::{MediaPayload, RawMessage};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Connector over the Telegram Bot HTTP API.
#[derive(Debug, Clone)]
pub struct BotApiConnector {
    client: Client,
    token: String,
    base_url: String,
}

impl BotApiConnector {
    /// Creates a connector for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (test servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Calls one Bot API method with a JSON body and unwraps the envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TeletoloError::transport(operation, e))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TeletoloError::transport(operation, e))?;

        if !envelope.ok {
            return Err(TeletoloError::Api {
                operation,
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        envelope.result.ok_or(TeletoloError::Api {
            operation,
            description: "missing result payload".to_string(),
        })
    }
}

#[async_trait]
impl Connector for BotApiConnector {
    async fn authenticate(&self) -> Result<()> {
        let me: WireUser = self.call("authenticate", "getMe", json!({})).await?;
        debug!(bot = me.username.as_deref().unwrap_or(""), id = me.id, "authenticated");
        Ok(())
    }

    async fn resolve_channel(&self, channel_id: &str) -> Result<ChannelRef> {
        // "me" targets the bot's own private chat; numeric ids pass through;
        // anything else is treated as a public channel name.
        if channel_id == "me" {
            let me: WireUser = self.call("resolve channel", "getMe", json!({})).await?;
            return Ok(ChannelRef {
                id: me.id,
                name: me.username.unwrap_or_else(|| "me".to_string()),
            });
        }

        let target = if channel_id.parse::<i64>().is_ok() || channel_id.starts_with('@') {
            channel_id.to_string()
        } else {
            format!("@{channel_id}")
        };
        let chat: WireChat = self
            .call("resolve channel", "getChat", json!({ "chat_id": target }))
            .await?;
        let name = chat
            .title
            .or(chat.username)
            .unwrap_or_else(|| chat.id.to_string());
        Ok(ChannelRef { id: chat.id, name })
    }

    async fn fetch_messages(
        &self,
        channel: &ChannelRef,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<RawMessage>> {
        let mut collected = Vec::new();
        let mut offset: Option<i64> = None;

        // Drain the update queue; the Bot API pages oldest-first.
        loop {
            let mut body = json!({
                "timeout": 0,
                "allowed_updates": ["message", "channel_post"],
            });
            if let Some(offset) = offset {
                body["offset"] = json!(offset);
            }
            let updates: Vec<WireUpdate> =
                self.call("fetch messages", "getUpdates", body).await?;
            if updates.is_empty() {
                break;
            }
            offset = updates.iter().map(|u| u.update_id + 1).max();

            for update in updates {
                let Some(wire) = update.message.or(update.channel_post) else {
                    continue;
                };
                if wire.chat.id != channel.id {
                    continue;
                }
                collected.push(wire.into_raw_message());
            }
        }

        // Newest-first with a cutoff stop, matching the fetch contract.
        collected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut result = Vec::new();
        for msg in collected {
            if msg.timestamp < cutoff || result.len() >= limit {
                break;
            }
            result.push(msg);
        }
        Ok(result)
    }

    async fn download_media(&self, media: &MediaPayload, dest_hint: &str) -> Result<PathBuf> {
        let file_id = match media {
            MediaPayload::Photo { file_id, .. } | MediaPayload::Document { file_id, .. } => {
                file_id
            }
            _ => {
                return Err(TeletoloError::Api {
                    operation: "download media",
                    description: "payload has no downloadable file".to_string(),
                });
            }
        };

        let file: WireFile = self
            .call("download media", "getFile", json!({ "file_id": file_id }))
            .await?;
        let file_path = file.file_path.ok_or(TeletoloError::Api {
            operation: "download media",
            description: "file has no server path".to_string(),
        })?;

        let url = format!("{}/file/bot{}/{}", self.base_url, self.token, file_path);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TeletoloError::transport("download media", e))?
            .bytes()
            .await
            .map_err(|e| TeletoloError::transport("download media", e))?;

        let dest = Path::new(dest_hint);
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(dest, &bytes).await?;
        Ok(dest.to_path_buf())
    }

    async fn delete_messages(&self, channel: &ChannelRef, ids: &[i64]) -> Result<()> {
        for id in ids {
            let deleted: bool = self
                .call(
                    "delete messages",
                    "deleteMessage",
                    json!({ "chat_id": channel.id, "message_id": id }),
                )
                .await
                .unwrap_or_else(|e| {
                    // best effort: an undeletable message is not fatal
                    warn!(id, error = %e, "could not delete message");
                    false
                });
            if !deleted {
                warn!(id, "message was not deleted");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

// No serde(default) here: a default on the generic `result` field would put
// a `T: Default` bound on the derived impl, and missing `Option` fields
// already deserialize as `None`.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: i64,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChat {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUpdate {
    update_id: i64,
    #[serde(default)]
    message: Option<WireMessage>,
    #[serde(default)]
    channel_post: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    message_id: i64,
    date: i64,
    chat: WireChat,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    photo: Option<Vec<WirePhotoSize>>,
    #[serde(default)]
    document: Option<WireDocument>,
    #[serde(default)]
    location: Option<WireLocation>,
    #[serde(default)]
    pinned_message: Option<serde_json::Value>,
    #[serde(default)]
    new_chat_members: Option<serde_json::Value>,
    #[serde(default)]
    left_chat_member: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WirePhotoSize {
    file_id: String,
    width: i64,
    height: i64,
}

#[derive(Debug, Deserialize)]
struct WireDocument {
    file_id: String,
    #[serde(default)]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct WireFile {
    #[serde(default)]
    file_path: Option<String>,
}

impl WireMessage {
    /// Converts a Bot API message into the pipeline's view of it.
    fn into_raw_message(self) -> RawMessage {
        let service = self.pinned_message.is_some()
            || self.new_chat_members.is_some()
            || self.left_chat_member.is_some();

        let timestamp = DateTime::from_timestamp(self.date, 0).unwrap_or_default();
        let text = self.text.or(self.caption).unwrap_or_default();

        // Photos arrive as a size ladder; take the largest rendition.
        let media = if let Some(sizes) = self.photo {
            match sizes.into_iter().max_by_key(|s| s.width * s.height) {
                Some(best) => MediaPayload::Photo {
                    file_id: best.file_id,
                    mime: "image/jpeg".to_string(),
                },
                None => MediaPayload::None,
            }
        } else if let Some(doc) = self.document {
            MediaPayload::Document {
                file_id: doc.file_id,
                mime: doc.mime_type.unwrap_or_else(|| "application/octet-stream".to_string()),
            }
        } else if let Some(loc) = self.location {
            MediaPayload::Geo {
                lat: loc.latitude,
                long: loc.longitude,
            }
        } else {
            MediaPayload::None
        };

        let mut msg = RawMessage::new(self.message_id, timestamp, text).with_media(media);
        if service {
            msg = msg.as_service();
        }
        msg
    }
}
