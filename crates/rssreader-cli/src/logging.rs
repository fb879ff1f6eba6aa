//! Logging.

use super::*;

use std::fs::File;

use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;

/// Crates whose events are recorded.
const LOG_TARGETS: [&str; 2] = ["rssreader", "rssreader_feeds"];

/// Install the global subscriber: stderr always, plus the configured log file.
pub fn setup_logging(cli: &Cli, config: &Config) -> Result<()> {
    let filter = LOG_TARGETS
        .iter()
        .fold(Targets::new().with_default(LevelFilter::OFF), |targets, target| {
            targets.with_target(*target, log_level(cli))
        });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filter.clone());

    let file_layer = match config.log.as_deref() {
        Some(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(open_log_file(log_file)?))
                .with_filter(filter),
        ),
        None => None,
    };

    let subscriber = tracing_subscriber::Registry::default()
        .with(stderr_layer)
        .with(file_layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        bail!("Unable to initialize logging.");
    }

    Ok(())
}

/// `--verbose` wins over `--debug`.
fn log_level(cli: &Cli) -> Level {
    match (cli.verbose, cli.debug) {
        (true, _) => Level::TRACE,
        (false, true) => Level::DEBUG,
        (false, false) => Level::INFO,
    }
}

/// Open the log file for appending, creating it and its parents.
fn open_log_file(log_file: &str) -> Result<File> {
    let path = match shellexpand::full(log_file) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => bail!("Unable to expand log file {log_file}: {e}"),
    };
    if let Some(parent_dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent_dir) {
            bail!("Unable to create log directory {parent_dir:?}: {e}");
        }
    }
    match std::fs::OpenOptions::new().append(true).create(true).open(&path) {
        Ok(file) => Ok(file),
        Err(e) => bail!("Unable to open log file {path:?}: {e}"),
    }
}
