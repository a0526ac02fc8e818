//! # teletolo
//!
//! Dump a Telegram channel into dated, Logseq-friendly markdown journal
//! entries.
//!
//! ## Overview
//!
//! teletolo fetches the last few days of messages from a channel and turns
//! each one into a markdown block: photos and voice notes are downloaded
//! and embedded, link previews become `[title](url)` lines with platform
//! embed directives for YouTube and Twitter, and shared locations become an
//! embedded map. Blocks are grouped per calendar day and either appended to
//! `YYYY_MM_DD.md` journal files or printed as a grouped report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use teletolo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let cfg = Config::from_file("teletolo.toml")?
//!         .with_days_back(3)
//!         .with_append_to_journal(true);
//!     cfg.validate()?;
//!
//!     let conn = BotApiConnector::new(cfg.bot_token.clone().unwrap_or_default());
//!     let summary = teletolo::pipeline::run(&conn, &cfg).await?;
//!     println!("{}", summary.summary_line());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] — [`Config`](config::Config): options, templates, TOML file loading
//! - [`message`] — [`RawMessage`](message::RawMessage) and the
//!   [`MediaPayload`](message::MediaPayload) tagged union
//! - [`classify`] — [`classify`](classify::classify): media → render kind + extension
//! - [`render`] — [`render_block`](render::render_block): one message → one
//!   markdown fragment
//! - [`grouper`] — window filtering and per-UTC-date bucketing
//! - [`journal`] — append-mode file writes and report-mode rendering
//! - [`template`] — `{placeholder}` substitution for user templates
//! - [`connector`] — the [`Connector`](connector::Connector) seam and the
//!   Bot API implementation
//! - [`pipeline`] — run orchestration
//! - [`cli`] — clap argument surface
//! - [`error`] — unified error types ([`TeletoloError`], [`Result`])

pub mod classify;
pub mod cli;
pub mod config;
pub mod connector;
pub mod error;
pub mod grouper;
pub mod journal;
pub mod message;
pub mod pipeline;
pub mod render;
pub mod template;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TeletoloError};
pub use message::RawMessage;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use teletolo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TeletoloError};

    pub use crate::config::Config;

    pub use crate::message::{LinkPreview, MediaPayload, RawMessage};

    pub use crate::classify::{ClassifiedKind, classify};

    pub use crate::render::{RenderedBlock, render_block};

    pub use crate::grouper::{DayBuckets, group_messages};

    pub use crate::journal::{JournalStats, append_to_journals, render_report};

    pub use crate::connector::{ChannelRef, Connector, botapi::BotApiConnector};

    pub use crate::pipeline::{RunSummary, run, run_at};
}
