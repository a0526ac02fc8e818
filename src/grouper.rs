//! Window filtering and per-day grouping.
//!
//! [`group_messages`] walks the fetched batch once, drops service messages
//! and anything older than the look-back window, renders each survivor via
//! [`classify`](crate::classify::classify) +
//! [`render_block`](crate::render::render_block), and collects the
//! non-empty results into per-calendar-date buckets.
//!
//! # Grouping key vs display time
//!
//! Buckets are keyed by the **UTC** calendar date of the message timestamp,
//! while each rendered block carries the timestamp converted to the display
//! offset. For a message sent near midnight in a non-UTC locale, the
//! displayed time can belong to a different calendar day than the file it
//! lands in. This mirrors the tool's historical behavior and is pinned by a
//! regression test; changing it would silently re-home existing entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use tracing::debug;

use crate::classify::classify;
use crate::config::Config;
use crate::connector::Connector;
use crate::error::Result;
use crate::message::RawMessage;
use crate::render::{RenderedBlock, render_block};

/// Rendered blocks grouped by UTC calendar date.
///
/// Within a date, blocks keep source iteration order — newest first, since
/// the connector yields messages reverse-chronologically.
pub type DayBuckets = BTreeMap<NaiveDate, Vec<RenderedBlock>>;

/// Filters the batch to the look-back window and groups rendered blocks by day.
///
/// Returns the buckets plus the ids of every message that contributed a
/// non-empty block (the only ids eligible for delete-after-download).
/// Messages exactly `days_back` old are still inside the window.
pub async fn group_messages<C: Connector>(
    conn: &C,
    cfg: &Config,
    messages: &[RawMessage],
    now: DateTime<Utc>,
    display_offset: FixedOffset,
) -> Result<(DayBuckets, Vec<i64>)> {
    let window = Duration::days(cfg.days_back);
    let mut buckets = DayBuckets::new();
    let mut consumed_ids = Vec::new();

    for msg in messages {
        if msg.service {
            continue;
        }
        if now - msg.timestamp > window {
            continue;
        }

        let (kind, ext) = classify(msg);
        let block = render_block(conn, cfg, msg, kind, ext.as_deref(), display_offset).await?;
        if block.markdown.is_empty() {
            debug!(id = msg.id, kind = ?kind, "message skipped (empty render)");
            continue;
        }

        buckets
            .entry(msg.timestamp.date_naive())
            .or_default()
            .push(block);
        consumed_ids.push(msg.id);
    }

    Ok((buckets, consumed_ids))
}
