//! Command-line interface definition using clap.
//!
//! Every option here mirrors a [`Config`](crate::config::Config) field;
//! options left unset on the command line fall back to the config file
//! (`teletolo.toml`) and then to the documented defaults. [`Args::merge_into`]
//! performs that layering.

use clap::Parser;

use crate::config::Config;

/// Dump a Telegram channel into dated markdown journal entries.
#[derive(Parser, Debug, Clone)]
#[command(name = "teletolo")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    teletolo --channel-id @my_notes
    teletolo -c @my_notes -b 3 -t '#telegram #quick-note'
    teletolo -c @my_notes --append-to-journal --delete-after-download
    teletolo --config my-other-config.toml --dry-run")]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long, default_value = "teletolo.toml", value_name = "FILE")]
    pub config: String,

    /// Bot token from @BotFather
    #[arg(long, value_name = "TOKEN")]
    pub bot_token: Option<String>,

    /// Channel id or @name from which messages are retrieved
    #[arg(short = 'c', long, value_name = "CHANNEL")]
    pub channel_id: Option<String>,

    /// Maximum number of messages to check (from today backwards)
    #[arg(long, value_name = "N")]
    pub msg_limit: Option<usize>,

    /// Retrieve messages only for the last N days
    #[arg(short = 'b', long, value_name = "DAYS")]
    pub days_back: Option<i64>,

    /// Folder in which journal pages are stored
    #[arg(long, value_name = "DIR")]
    pub journal_folder: Option<String>,

    /// Folder in which assets (images, audios) are stored
    #[arg(long, value_name = "DIR")]
    pub assets_folder: Option<String>,

    /// chrono format for the {date} part of block and header templates
    #[arg(long, value_name = "FMT")]
    pub journal_date_fmt: Option<String>,

    /// chrono format for the {time} part of the block template
    #[arg(long, value_name = "FMT")]
    pub time_fmt: Option<String>,

    /// String prepended to each message, e.g. '#telegram #quick-note'
    #[arg(short = 't', long, value_name = "TAGS")]
    pub tags: Option<String>,

    /// Format for each dumped message; may include {time}, {tags}, {date}
    /// and {message}
    #[arg(long, value_name = "FMT")]
    pub block_fmt: Option<String>,

    /// Format for date headers (unused with --append-to-journal)
    #[arg(long, value_name = "FMT")]
    pub date_header_fmt: Option<String>,

    /// Append messages to the journal file matching their date instead of
    /// dumping them grouped to stdout
    #[arg(short = 'a', long)]
    pub append_to_journal: bool,

    /// Delete the downloaded messages from the Telegram channel
    #[arg(short = 'd', long)]
    pub delete_after_download: bool,

    /// Do not perform any action, only check parameters and credentials
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable diagnostic logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Layers CLI options over a base configuration (CLI wins).
    ///
    /// Boolean flags only override when set; absent value options leave the
    /// base untouched.
    pub fn merge_into(self, mut cfg: Config) -> Config {
        if let Some(v) = self.bot_token {
            cfg.bot_token = Some(v);
        }
        if let Some(v) = self.channel_id {
            cfg.channel_id = v;
        }
        if let Some(v) = self.msg_limit {
            cfg.msg_limit = v;
        }
        if let Some(v) = self.days_back {
            cfg.days_back = v;
        }
        if let Some(v) = self.journal_folder {
            cfg.journal_folder = v;
        }
        if let Some(v) = self.assets_folder {
            cfg.assets_folder = v;
        }
        if let Some(v) = self.journal_date_fmt {
            cfg.journal_date_fmt = v;
        }
        if let Some(v) = self.time_fmt {
            cfg.time_fmt = v;
        }
        if let Some(v) = self.tags {
            cfg.tags = v;
        }
        if let Some(v) = self.block_fmt {
            cfg.block_fmt = v;
        }
        if let Some(v) = self.date_header_fmt {
            cfg.date_header_fmt = v;
        }
        if self.append_to_journal {
            cfg.append_to_journal = true;
        }
        if self.delete_after_download {
            cfg.delete_after_download = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.verbose {
            cfg.verbose = true;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("teletolo").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let cfg = parse(&[]).merge_into(Config::default());
        assert_eq!(cfg.channel_id, "me");
        assert_eq!(cfg.days_back, 7);
        assert!(!cfg.append_to_journal);
    }

    #[test]
    fn cli_overrides_config_values() {
        let base = Config::default().with_days_back(30);
        let cfg = parse(&["-b", "3", "-c", "@notes", "-t", "#tg"]).merge_into(base);
        assert_eq!(cfg.days_back, 3);
        assert_eq!(cfg.channel_id, "@notes");
        assert_eq!(cfg.tags, "#tg");
    }

    #[test]
    fn flags_set_modes() {
        let cfg = parse(&["-a", "-d", "-n"]).merge_into(Config::default());
        assert!(cfg.append_to_journal);
        assert!(cfg.delete_after_download);
        assert!(cfg.dry_run);
    }

    #[test]
    fn unset_flag_keeps_config_file_value() {
        let base = Config::default().with_append_to_journal(true);
        let cfg = parse(&[]).merge_into(base);
        assert!(cfg.append_to_journal);
    }
}
