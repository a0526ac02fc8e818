//! Unified error types for teletolo.
//!
//! This module provides a single [`TeletoloError`] enum covering all error
//! cases in the library, plus the crate-wide [`Result`] alias.
//!
//! # Error Handling Philosophy
//!
//! - **Configuration problems** are caught before any network action and
//!   carry enough context to fix the config file or flags.
//! - **Transport failures** (fetch, media download, delete) are fatal for
//!   the current run — there is no retry layer, by contract.
//! - A message that renders to empty text is *not* an error; it is skipped
//!   with a diagnostic and excluded from grouping and deletion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for teletolo operations.
pub type Result<T> = std::result::Result<T, TeletoloError>;

/// The error type for all teletolo operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TeletoloError {
    /// An I/O error occurred (journal file append, asset write, ...).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A mandatory configuration field is missing or invalid.
    ///
    /// Reported before any network action; the process exits nonzero.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is missing or wrong
        message: String,
    },

    /// The config file could not be read or parsed.
    #[error("Failed to read config file {}: {message}", path.display())]
    ConfigFile {
        /// Path of the offending file
        path: PathBuf,
        /// Parse or read failure description
        message: String,
    },

    /// A transport-level failure talking to the messaging service.
    ///
    /// Covers message fetch, media download, and deletion. Fatal for the
    /// current run — retries are the connector's (non-)responsibility.
    #[error("Transport error during {operation}: {source}")]
    Transport {
        /// What the connector was doing ("fetch messages", "download media", ...)
        operation: &'static str,
        /// The underlying HTTP error
        #[source]
        source: reqwest::Error,
    },

    /// The messaging service answered but rejected the request.
    #[error("Telegram API error during {operation}: {description}")]
    Api {
        /// What the connector was doing
        operation: &'static str,
        /// The service's error description
        description: String,
    },
}

impl TeletoloError {
    /// Wraps a [`reqwest::Error`] with the operation that produced it.
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    /// Builds a configuration error from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
