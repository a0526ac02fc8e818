//! Run orchestration.
//!
//! [`run`] wires the whole sequence together: authenticate, resolve the
//! target channel, fetch the message window, group and render, then write
//! journals or build the report, and finally delete consumed messages when
//! configured. One sequential pass; grouping completes before any output
//! is produced.

use chrono::{DateTime, Duration, FixedOffset, Local, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::connector::Connector;
use crate::error::Result;
use crate::grouper::group_messages;
use crate::journal::{JournalStats, append_to_journals, render_report};

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Entry and date counts (zero entries means nothing was written).
    pub stats: JournalStats,
    /// Report-mode text for stdout; `None` in append mode or when empty.
    pub report: Option<String>,
    /// Whether consumed messages were deleted from the channel.
    pub deleted: bool,
}

impl RunSummary {
    /// The user-facing count line, always reported.
    pub fn summary_line(&self) -> String {
        format!(
            "{} messages downloaded for {} different dates",
            self.stats.entries, self.stats.dates
        )
    }
}

/// Runs the full pipeline against the current instant and local timezone.
pub async fn run<C: Connector>(conn: &C, cfg: &Config) -> Result<RunSummary> {
    let now = Utc::now();
    let display_offset = *Local::now().offset();
    run_at(conn, cfg, now, display_offset).await
}

/// Runs the full pipeline with an explicit clock and display offset.
///
/// Split out from [`run`] so tests can pin `now` and exercise non-UTC
/// display offsets deterministically.
pub async fn run_at<C: Connector>(
    conn: &C,
    cfg: &Config,
    now: DateTime<Utc>,
    display_offset: FixedOffset,
) -> Result<RunSummary> {
    conn.authenticate().await?;
    let channel = conn.resolve_channel(&cfg.channel_id).await?;
    info!(channel = %channel.name, days_back = cfg.days_back, "fetching messages");

    let cutoff = now - Duration::days(cfg.days_back);
    let messages = conn
        .fetch_messages(&channel, cutoff, cfg.msg_limit)
        .await?;
    debug!(fetched = messages.len(), "messages fetched");

    let (buckets, consumed_ids) = group_messages(conn, cfg, &messages, now, display_offset).await?;
    let stats = JournalStats::of(&buckets);

    if stats.entries == 0 {
        return Ok(RunSummary {
            stats,
            report: None,
            deleted: false,
        });
    }

    let report = if cfg.append_to_journal {
        append_to_journals(cfg, &buckets)?;
        None
    } else {
        let (text, _) = render_report(cfg, &buckets);
        Some(text)
    };

    let deleted = if cfg.delete_after_download {
        conn.delete_messages(&channel, &consumed_ids).await?;
        info!(count = consumed_ids.len(), "downloaded messages deleted from channel");
        true
    } else {
        false
    };

    Ok(RunSummary {
        stats,
        report,
        deleted,
    })
}
