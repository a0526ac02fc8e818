//! Journal rendering: day buckets → files or a stdout report.
//!
//! Two mutually exclusive output modes:
//!
//! - **Append mode** ([`append_to_journals`]): one `YYYY_MM_DD.md` file per
//!   date under the journal folder, opened create-if-absent and append-only.
//!   Each entry is written as a blank-line separator plus a `- ...` list
//!   item, with no date header (the filename *is* the date).
//! - **Report mode** ([`render_report`]): a single string for stdout with a
//!   header line per date (from the header template, omitted when it
//!   renders to whitespace) and one list item per entry, indented under the
//!   header when one was printed.
//!
//! Buckets arrive newest-first; both modes emit entries in **reverse**
//! bucket order so the final output reads chronologically ascending.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::grouper::DayBuckets;
use crate::render::RenderedBlock;
use crate::template::substitute;

/// Counts reported back to the caller after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalStats {
    /// Blocks written or printed.
    pub entries: usize,
    /// Distinct calendar dates touched.
    pub dates: usize,
}

impl JournalStats {
    /// Totals for a bucket mapping, before any rendering.
    pub fn of(buckets: &DayBuckets) -> Self {
        Self {
            entries: buckets.values().map(Vec::len).sum(),
            dates: buckets.len(),
        }
    }
}

/// Formats one block as a markdown list item.
///
/// `date_display` is empty in append mode (the filename carries the date)
/// and the localized date string in report mode. The four-space indent is
/// applied only under a printed header.
fn format_block_line(
    cfg: &Config,
    date_display: &str,
    block: &RenderedBlock,
    indented: bool,
) -> String {
    let time = block.timestamp.format(&cfg.time_fmt).to_string();
    let body = substitute(
        &cfg.block_fmt,
        &[
            ("date", date_display),
            ("tags", &cfg.tags),
            ("time", &time),
            ("message", &block.markdown),
        ],
    );
    let prefix = if indented { "    " } else { "" };
    format!("{prefix}- {body}")
}

/// Appends every bucket to its dated journal file.
///
/// Files are named `YYYY_MM_DD.md` under `cfg.journal_folder`, created on
/// first touch. Appending twice for the same date is cumulative. Entries go
/// in reverse bucket order, so within one batch the file reads oldest to
/// newest.
pub fn append_to_journals(cfg: &Config, buckets: &DayBuckets) -> Result<JournalStats> {
    let folder = Path::new(&cfg.journal_folder);
    std::fs::create_dir_all(folder)?;

    for (date, blocks) in buckets {
        let file_name = format!("{}.md", date.format("%Y_%m_%d"));
        let path = folder.join(&file_name);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        for block in blocks.iter().rev() {
            writeln!(file)?;
            write!(file, "{}", format_block_line(cfg, "", block, false))?;
        }
        info!(
            count = blocks.len(),
            file = %path.display(),
            "entries appended to journal"
        );
    }

    Ok(JournalStats::of(buckets))
}

/// Renders all buckets as a grouped textual report.
///
/// The header template receives the localized `{date}`; when the rendered
/// header trims to nothing the header line is dropped and the block lines
/// are left unindented.
pub fn render_report(cfg: &Config, buckets: &DayBuckets) -> (String, JournalStats) {
    let mut out = String::new();

    for (date, blocks) in buckets {
        let day = date.format(&cfg.journal_date_fmt).to_string();
        let header = substitute(&cfg.date_header_fmt, &[("date", &day)]);
        let has_header = !header.trim().is_empty();
        if has_header {
            out.push_str(&header);
            out.push('\n');
        }
        for block in blocks.iter().rev() {
            out.push_str(&format_block_line(cfg, &day, block, has_header));
            out.push('\n');
        }
    }

    (out, JournalStats::of(buckets))
}
