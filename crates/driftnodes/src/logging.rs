//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to a file in the data
//! directory. Logging is skipped if that file cannot be created.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter.
const LOG_FILTER_ENV: &str = "DRIFTNODES_LOG";

const LOG_FILE_NAME: &str = "driftnodes.log";

/// Install the global subscriber. Returns the log file path when logging is active.
pub fn init() -> Option<PathBuf> {
    let dir = driftnodes_config::data_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path).ok()?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(path)
}
