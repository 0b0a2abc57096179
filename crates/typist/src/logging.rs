//! Tracing setup.
//!
//! The TUI owns the terminal, so its logs go to a file in the data
//! directory. Plain mode logs to stderr.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Log file name inside the data directory.
const LOG_FILE: &str = "typist.log";

/// Filter directives: `RUST_LOG` wins, then `--verbose`, then `info`.
fn directives(verbose: bool, env: Option<&str>) -> &str {
    match env.map(str::trim) {
        Some(env) if !env.is_empty() => env,
        _ if verbose => "debug",
        _ => "info",
    }
}

fn filter(verbose: bool) -> EnvFilter {
    let env = env::var(EnvFilter::DEFAULT_ENV).ok();
    let spec = directives(verbose, env.as_deref());
    EnvFilter::try_new(spec).unwrap_or_else(|err| {
        eprintln!("ignoring invalid {}: {err}", EnvFilter::DEFAULT_ENV);
        EnvFilter::new(directives(verbose, None))
    })
}

/// Install the global subscriber. Returns the log file path when logging
/// to a file.
pub fn init(target: LogTarget, verbose: bool) -> color_eyre::Result<Option<PathBuf>> {
    match target {
        LogTarget::Stderr => {
            fmt()
                .with_env_filter(filter(verbose))
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
        LogTarget::File => {
            let Some(dir) = typist_config::data_dir() else {
                return Ok(None);
            };
            fs::create_dir_all(&dir)?;
            let path = dir.join(LOG_FILE);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;

            fmt()
                .with_env_filter(filter(verbose))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            Ok(Some(path))
        }
    }
}
