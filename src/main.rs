//! # teletolo CLI
//!
//! Command-line interface for the teletolo library.

use std::path::Path;
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use teletolo::TeletoloError;
use teletolo::cli::Args;
use teletolo::config::Config;
use teletolo::connector::botapi::BotApiConnector;
use teletolo::pipeline;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), TeletoloError> {
    let args = <Args as ClapParser>::parse();

    // Config file first, CLI flags on top.
    let base = if Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };
    let cfg = args.merge_into(base);

    init_logging(cfg.verbose);
    cfg.validate()?;

    println!(
        "Retrieving a maximum of {} messages from past {} days from '{}' Telegram channel",
        cfg.msg_limit, cfg.days_back, cfg.channel_id
    );
    print!(
        "The results will be {} and the messages will be ",
        if cfg.append_to_journal {
            format!(
                "appended to journal files in {} (assets in {})",
                cfg.journal_folder, cfg.assets_folder
            )
        } else {
            "dumped in stdout".to_string()
        }
    );
    if cfg.delete_after_download {
        println!("deleted from the Telegram channel after download completes");
    } else {
        println!("kept in the Telegram channel");
    }
    println!();

    if cfg.dry_run {
        println!("DRY MODE. No action performed");
        return Ok(());
    }

    let token = cfg.bot_token.clone().unwrap_or_default();
    let conn = BotApiConnector::new(token);
    let summary = pipeline::run(&conn, &cfg).await?;

    println!("{}\n", summary.summary_line());
    if let Some(report) = &summary.report {
        print!("{report}");
    }
    if summary.deleted {
        println!("The messages downloaded were deleted");
    }
    Ok(())
}

/// Diagnostic logging to stderr; the report itself goes to stdout.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "teletolo=debug" } else { "teletolo=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
