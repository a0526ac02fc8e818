//! Media classification.
//!
//! [`classify`] inspects a message's media payload and decides how it will
//! render: as an image, an audio file, a link preview, an embedded map, or
//! plain text. The function is pure and total — every message maps to
//! exactly one [`ClassifiedKind`], and no I/O happens here.
//!
//! # Examples
//!
//! ```
//! use teletolo::classify::{classify, ClassifiedKind};
//! use teletolo::message::{MediaPayload, RawMessage};
//! use chrono::Utc;
//!
//! let msg = RawMessage::new(1, Utc::now(), "a photo").with_media(MediaPayload::Photo {
//!     file_id: "abc".into(),
//!     mime: "image/jpeg".into(),
//! });
//!
//! let (kind, ext) = classify(&msg);
//! assert_eq!(kind, ClassifiedKind::Photo);
//! assert_eq!(ext.as_deref(), Some("jpg"));
//! ```

use crate::message::{MediaPayload, RawMessage};

/// How a message will render as markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifiedKind {
    /// An image, downloaded and embedded with `![](...)`.
    ///
    /// Also covers documents whose MIME marks them as animated images
    /// (GIFs sent as documents).
    Photo,

    /// An audio document (voice note, music file), downloaded and linked.
    AudioDocument,

    /// A webpage preview with title, description, and an optional
    /// platform-specific embed directive.
    LinkPreview,

    /// A shared geolocation, rendered as an embedded map.
    Geolocation,

    /// Anything else: the text body renders verbatim.
    PlainText,
}

impl ClassifiedKind {
    /// The tag used in downloaded asset filenames (`image_...`, `audio_...`).
    pub fn asset_tag(self) -> &'static str {
        match self {
            Self::Photo => "image",
            Self::AudioDocument => "audio",
            Self::LinkPreview | Self::Geolocation | Self::PlainText => "",
        }
    }
}

/// Classifies a message by its media payload.
///
/// Returns the render kind plus a file extension for kinds that download an
/// asset ([`Photo`](ClassifiedKind::Photo) and
/// [`AudioDocument`](ClassifiedKind::AudioDocument)); `None` otherwise.
pub fn classify(msg: &RawMessage) -> (ClassifiedKind, Option<String>) {
    match &msg.media {
        MediaPayload::Photo { mime, .. } => {
            (ClassifiedKind::Photo, Some(image_extension(mime)))
        }
        MediaPayload::Document { mime, .. } if mime.starts_with("audio/") => {
            (ClassifiedKind::AudioDocument, Some(audio_extension(mime)))
        }
        // GIFs arrive as documents but render as images.
        MediaPayload::Document { mime, .. } if mime.contains("gif") => {
            (ClassifiedKind::Photo, Some(image_extension(mime)))
        }
        MediaPayload::WebPage(Some(_)) => (ClassifiedKind::LinkPreview, None),
        MediaPayload::Geo { .. } => (ClassifiedKind::Geolocation, None),
        MediaPayload::Document { .. } | MediaPayload::WebPage(None) | MediaPayload::None => {
            (ClassifiedKind::PlainText, None)
        }
    }
}

/// Maps an image MIME type to a file extension.
///
/// `image/jpeg` becomes `jpg`; anything else uses the last MIME segment.
fn image_extension(mime: &str) -> String {
    if mime.contains("jpeg") {
        "jpg".to_string()
    } else {
        last_segment(mime)
    }
}

/// Maps an audio MIME type to a file extension.
///
/// Ogg-audio variants (`audio/oga`, `audio/x-oga`) become `ogg`; anything
/// else uses the last MIME segment.
fn audio_extension(mime: &str) -> String {
    if mime.contains("oga") {
        "ogg".to_string()
    } else {
        last_segment(mime)
    }
}

fn last_segment(mime: &str) -> String {
    mime.rsplit('/').next().unwrap_or(mime).to_string()
}
