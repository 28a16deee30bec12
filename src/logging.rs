//! Debug logging sinks for TRUNCATE_MIDDLE_DEBUG / TRUNCATE_MIDDLE_LOG.
//!
//! The library only emits `tracing` events. Hosts that already install a subscriber get them
//! for free; [`init`] is for hosts that do not.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a fmt subscriber according to `config`.
///
/// Returns whether a subscriber installed by this crate is active. Only the first call has any
/// effect.
pub fn init(config: &EnvConfig) -> io::Result<bool> {
    INSTALLED.get_or_try_init(|| install(config)).copied()
}

fn install(config: &EnvConfig) -> io::Result<bool> {
    if !config.debug && config.log_file.is_none() {
        return Ok(false);
    }

    let filter = EnvFilter::new("truncate_middle=debug");
    let result = match config.log_file.as_deref() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };

    // Another subscriber already owns the global slot; events still reach it.
    Ok(result.is_ok())
}
