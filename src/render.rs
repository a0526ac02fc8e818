//! Block formatting: one message → one markdown fragment.
//!
//! [`render_block`] turns a classified message into a [`RenderedBlock`]:
//! photos and audio documents are downloaded through the connector and
//! embedded by local path, link previews become `[title](url)` lines with a
//! platform embed directive for known video/social hosts, and geolocations
//! become an embedded-map directive. Plain text passes through verbatim.
//!
//! An empty rendered fragment means the message has nothing to contribute
//! (for example a bare sticker); the caller skips it — that is a
//! diagnostic, not an error. A failed media download, on the other hand,
//! aborts the run: a consumed message must never be deleted upstream unless
//! its media actually landed on disk.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use crate::classify::ClassifiedKind;
use crate::config::Config;
use crate::connector::Connector;
use crate::error::Result;
use crate::message::{MediaPayload, RawMessage};

/// One rendered message: its display timestamp and markdown text.
///
/// The timestamp is converted to the display offset (usually the local
/// timezone); note that day grouping happens on the UTC date upstream, so
/// the two can disagree near midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    /// Message time in the display offset, used for the `{time}` placeholder.
    pub timestamp: DateTime<FixedOffset>,
    /// The markdown fragment. Empty means "skip this message".
    pub markdown: String,
}

/// Renders a message according to its classified kind.
///
/// `ext` is the asset file extension produced by
/// [`classify`](crate::classify::classify) for downloadable kinds. Photo
/// and audio arms suspend on the connector's media download.
pub async fn render_block<C: Connector>(
    conn: &C,
    cfg: &Config,
    msg: &RawMessage,
    kind: ClassifiedKind,
    ext: Option<&str>,
    display_offset: FixedOffset,
) -> Result<RenderedBlock> {
    let markdown = match kind {
        ClassifiedKind::Photo | ClassifiedKind::AudioDocument => {
            let ext = ext.unwrap_or("bin");
            download_and_embed(conn, cfg, msg, kind, ext).await?
        }
        ClassifiedKind::LinkPreview => link_preview_markdown(msg),
        ClassifiedKind::Geolocation => geolocation_markdown(msg),
        ClassifiedKind::PlainText => msg.text.clone(),
    };

    Ok(RenderedBlock {
        timestamp: msg.timestamp.with_timezone(&display_offset),
        markdown,
    })
}

/// Downloads the message's media and embeds it as `![](path)`, with the
/// caption on its own line above when present.
async fn download_and_embed<C: Connector>(
    conn: &C,
    cfg: &Config,
    msg: &RawMessage,
    kind: ClassifiedKind,
    ext: &str,
) -> Result<String> {
    let fname = format!(
        "{}{}_{}.{}",
        cfg.asset_prefix(),
        kind.asset_tag(),
        unix_timestamp_with_fraction(msg.timestamp),
        ext
    );
    let path = conn.download_media(&msg.media, &fname).await?;
    info!(kind = kind.asset_tag(), path = %path.display(), "media downloaded");

    let mut out = msg.text.clone();
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("![]({})", path.display()));
    Ok(out)
}

/// `caption\n[title](url)\ndescription` plus a `{{twitter url}}` or
/// `{{youtube url}}` directive for recognized hosts.
fn link_preview_markdown(msg: &RawMessage) -> String {
    let MediaPayload::WebPage(Some(preview)) = &msg.media else {
        return msg.text.clone();
    };

    let embed = if preview.url.contains("twitter") {
        format!("\n{{{{twitter {}}}}}", preview.url)
    } else if preview.url.contains("youtube") || preview.url.contains("youtu.be") {
        format!("\n{{{{youtube {}}}}}", preview.url)
    } else {
        String::new()
    };

    let mut out = msg.text.clone();
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "[{}]({})\n{}{}",
        preview.title, preview.url, preview.description, embed
    ));
    out
}

/// A hiccup-style embedded Google Maps iframe, parameterized by the
/// coordinates. The caption is ignored.
fn geolocation_markdown(msg: &RawMessage) -> String {
    let MediaPayload::Geo { lat, long } = &msg.media else {
        return msg.text.clone();
    };

    let lat = coordinate(*lat);
    let long = coordinate(*long);
    format!(
        "GPS location:\n\
         [:div {{:style {{:margin \"0 auto\" :width 400}}}} \
         [:iframe {{:src \
         \"https://maps.google.com/maps?q={lat},{long}&z=14&output=embed\"\
         }}]]"
    )
}

/// Formats a coordinate with the decimal part always present, so `40_f64`
/// renders as `40.0` rather than `40`.
fn coordinate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Formats a UTC timestamp as unix seconds with a fractional part.
///
/// The fraction is always present (`.0` for whole seconds) so asset
/// filenames have a stable shape: `image_1705314600.5.jpg`.
fn unix_timestamp_with_fraction(ts: DateTime<Utc>) -> String {
    let micros = ts.timestamp_micros();
    let secs = micros.div_euclid(1_000_000);
    let frac = micros.rem_euclid(1_000_000);
    if frac == 0 {
        format!("{secs}.0")
    } else {
        let frac = format!("{frac:06}");
        format!("{secs}.{}", frac.trim_end_matches('0'))
    }
}
