//! Raw message and media payload types.
//!
//! This module provides [`RawMessage`], the connector-agnostic view of one
//! chat message, and [`MediaPayload`], the tagged union of everything a
//! message can carry besides text. Connectors convert their wire formats
//! into these structures; the rest of the pipeline never sees a wire type.
//!
//! # Examples
//!
//! ```
//! use teletolo::message::{MediaPayload, RawMessage};
//! use chrono::Utc;
//!
//! let msg = RawMessage::new(42, Utc::now(), "lunch at the lake")
//!     .with_media(MediaPayload::Geo { lat: 40.0, long: -3.0 });
//!
//! assert_eq!(msg.id, 42);
//! assert!(!msg.service);
//! ```

use chrono::{DateTime, Utc};

/// A link preview attached to a message.
///
/// Telegram resolves URLs into a webpage preview with a title and a short
/// description; an unresolved preview arrives empty and is treated as plain
/// text downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPreview {
    /// The previewed URL.
    pub url: String,
    /// Page title as resolved by the service.
    pub title: String,
    /// Short page description, possibly empty.
    pub description: String,
}

/// Everything a message can carry besides its text body.
///
/// Exactly one variant applies per message. The classifier matches this
/// union exhaustively, so adding a variant is a compile-time reminder to
/// decide how it renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MediaPayload {
    /// No attached media.
    #[default]
    None,

    /// A photo, referenced by the service's file id.
    Photo {
        /// Opaque download handle understood by the connector.
        file_id: String,
        /// MIME type, e.g. `image/jpeg`.
        mime: String,
    },

    /// A generic document (voice notes, audio files, animated images, ...).
    Document {
        /// Opaque download handle understood by the connector.
        file_id: String,
        /// MIME type, e.g. `audio/ogg` or `image/gif`.
        mime: String,
    },

    /// A webpage preview. `None` when the service attached an empty preview.
    WebPage(Option<LinkPreview>),

    /// A shared geolocation.
    Geo {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        long: f64,
    },
}

/// One message as handed over by the connector.
///
/// # Construction
///
/// Use [`RawMessage::new`] for a plain text message and the builder methods
/// for media and service markers:
///
/// ```
/// use teletolo::message::{MediaPayload, RawMessage};
/// use chrono::Utc;
///
/// let photo = RawMessage::new(7, Utc::now(), "sunset")
///     .with_media(MediaPayload::Photo {
///         file_id: "AgACAgQ".into(),
///         mime: "image/jpeg".into(),
///     });
///
/// let pinned_notice = RawMessage::new(8, Utc::now(), "").as_service();
/// assert!(pinned_notice.service);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    /// Service-assigned message id, used for delete-after-download.
    pub id: i64,

    /// When the message was sent, always UTC.
    pub timestamp: DateTime<Utc>,

    /// Text body or media caption. May be empty.
    pub text: String,

    /// Attached media, if any.
    pub media: MediaPayload,

    /// True for service/system messages (pins, joins, ...), which the
    /// pipeline ignores.
    pub service: bool,
}

impl RawMessage {
    /// Creates a standard text message with no media.
    pub fn new(id: i64, timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            text: text.into(),
            media: MediaPayload::None,
            service: false,
        }
    }

    /// Attaches a media payload.
    #[must_use]
    pub fn with_media(mut self, media: MediaPayload) -> Self {
        self.media = media;
        self
    }

    /// Marks this as a service/system message.
    #[must_use]
    pub fn as_service(mut self) -> Self {
        self.service = true;
        self
    }
}
