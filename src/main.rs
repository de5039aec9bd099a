use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;

use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers;
use taskboard::io::config_io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Opt-in via RUST_LOG. The TUI owns the terminal, so its logs go to
/// `taskboard.log` in the data directory; CLI logs go to stderr.
fn init_tracing(cli: &Cli) {
    let Some(filter) = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
    else {
        return;
    };

    match log_target(cli) {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogTarget::File(file) => tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init(),
        LogTarget::Off => {}
    }
}

enum LogTarget {
    Stderr,
    File(File),
    /// TUI without a usable log file
    Off,
}

fn log_target(cli: &Cli) -> LogTarget {
    if cli.command.is_some() {
        return LogTarget::Stderr;
    }
    // The TUI owns the terminal, so never fall back to stderr
    match open_log_file(cli) {
        Some(file) => LogTarget::File(file),
        None => LogTarget::Off,
    }
}

fn open_log_file(cli: &Cli) -> Option<File> {
    let dir = config_io::resolve_data_dir(cli.data_dir.as_deref()).ok()?;
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("taskboard.log"))
        .ok()
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
