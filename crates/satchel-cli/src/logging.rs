//! Logging setup for the Satchel CLI
//!
//! Maps repeated `-v` flags to a tracing level and installs a compact
//! console subscriber on stderr, so diagnostics never mix with command
//! output on stdout. `RUST_LOG` overrides the flag-derived level.

use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Level filter for a given verbosity count
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global logging system
pub fn init_logging(verbosity: u8, no_color: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    // Source locations only once the user asks for debug output
    let source_location = verbosity >= 2;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color && std::io::stderr().is_terminal())
        .with_file(source_location)
        .with_line_number(source_location)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
