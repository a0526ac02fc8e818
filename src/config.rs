//! Runtime configuration.
//!
//! [`Config`] gathers every recognized option: the look-back window, output
//! templates, folder locations, and the mode flags. Values come from a TOML
//! config file (`teletolo.toml`), overridden by CLI flags; library users can
//! also build one directly.
//!
//! # Examples
//!
//! ```
//! use teletolo::config::Config;
//!
//! let cfg = Config::default()
//!     .with_days_back(3)
//!     .with_tags("#telegram #quick-note")
//!     .with_append_to_journal(true);
//!
//! assert_eq!(cfg.days_back, 3);
//! assert_eq!(cfg.asset_prefix(), "assets/");
//! ```
//!
//! # Templates
//!
//! `block_fmt` recognizes `{time}`, `{tags}`, `{date}`, and `{message}`;
//! `date_header_fmt` recognizes `{date}`. Unknown placeholders render as
//! literal text. `time_fmt` and `journal_date_fmt` are chrono `strftime`
//! strings.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::error::{Result, TeletoloError};

/// All recognized options for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Telegram bot token. Mandatory for any network action.
    pub bot_token: Option<String>,

    /// Channel to read from: a numeric chat id or a `@name`.
    pub channel_id: String,

    /// Maximum number of messages to consider, newest first.
    pub msg_limit: usize,

    /// Look-back window in days. A message exactly this old still counts.
    pub days_back: i64,

    /// Folder holding the per-day journal files.
    pub journal_folder: String,

    /// Folder where downloaded assets land.
    pub assets_folder: String,

    /// chrono format for the `{date}` placeholder.
    pub journal_date_fmt: String,

    /// chrono format for the `{time}` placeholder.
    pub time_fmt: String,

    /// String substituted for `{tags}`, e.g. `#telegram #quick-note`.
    pub tags: String,

    /// Template for each rendered block line.
    pub block_fmt: String,

    /// Template for report-mode date headers. Rendered-to-whitespace means
    /// "no header".
    pub date_header_fmt: String,

    /// Append entries to dated journal files instead of printing a report.
    pub append_to_journal: bool,

    /// Delete consumed messages from the channel after a successful run.
    pub delete_after_download: bool,

    /// Validate configuration and print the plan without any network or
    /// file action.
    pub dry_run: bool,

    /// Enable diagnostic logging.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            channel_id: "me".to_string(),
            msg_limit: 100,
            days_back: 7,
            journal_folder: "./journals".to_string(),
            assets_folder: "./assets".to_string(),
            journal_date_fmt: "%Y-%m-%d %A".to_string(),
            time_fmt: "%H:%M".to_string(),
            tags: String::new(),
            block_fmt: "**{time}** {tags} {message}".to_string(),
            date_header_fmt: "## {date}".to_string(),
            append_to_journal: false,
            delete_after_download: false,
            dry_run: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults; unknown keys are rejected so a
    /// typo does not silently become a no-op.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TeletoloError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| TeletoloError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Checks that mandatory credential fields are present and that the
    /// display format strings are valid.
    ///
    /// Called before any network action; a missing token or a bad strftime
    /// string is a fatal configuration error. Validating the formats here
    /// keeps a typo'd `--time-fmt` from aborting the run mid-output.
    pub fn validate(&self) -> Result<()> {
        match &self.bot_token {
            Some(token) if !token.trim().is_empty() => {}
            _ => {
                return Err(TeletoloError::config(
                    "bot_token is not set; put it in teletolo.toml or pass --bot-token (see README.md)",
                ));
            }
        }
        validate_strftime("time_fmt", &self.time_fmt)?;
        validate_strftime("journal_date_fmt", &self.journal_date_fmt)?;
        Ok(())
    }

    /// The prefix prepended to downloaded asset paths inside markdown.
    ///
    /// In append mode journal files live next to an `assets/` folder, so
    /// embedded links are relative to it; in report mode links are bare.
    pub fn asset_prefix(&self) -> &'static str {
        if self.append_to_journal { "assets/" } else { "" }
    }

    /// Sets the look-back window in days.
    #[must_use]
    pub fn with_days_back(mut self, days: i64) -> Self {
        self.days_back = days;
        self
    }

    /// Sets the `{tags}` substitution string.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Selects append mode (journal files) over report mode (stdout).
    #[must_use]
    pub fn with_append_to_journal(mut self, append: bool) -> Self {
        self.append_to_journal = append;
        self
    }

    /// Sets the journal folder.
    #[must_use]
    pub fn with_journal_folder(mut self, folder: impl Into<String>) -> Self {
        self.journal_folder = folder.into();
        self
    }

    /// Sets the block template.
    #[must_use]
    pub fn with_block_fmt(mut self, fmt: impl Into<String>) -> Self {
        self.block_fmt = fmt.into();
        self
    }

    /// Sets the date header template.
    #[must_use]
    pub fn with_date_header_fmt(mut self, fmt: impl Into<String>) -> Self {
        self.date_header_fmt = fmt.into();
        self
    }
}

/// Rejects strftime strings chrono cannot format.
///
/// chrono's formatter errors (and `to_string` aborts) on an unknown
/// specifier, so a bad format must be caught at validation time, not while
/// rendering output.
fn validate_strftime(which: &'static str, fmt: &str) -> Result<()> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(TeletoloError::config(format!(
            "{which} is not a valid date/time format string: '{fmt}'"
        )));
    }
    Ok(())
}
