//! Structured logging setup
//!
//! Logs go to stderr so stdout stays parseable in every output format.
//! Filter precedence: `RUST_LOG`, then `RELATA_LOG`, then `--log-level`,
//! then `--verbose`.

use std::error::Error;
use std::io;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted when `RUST_LOG` is unset
pub const LOG_ENV: &str = "RELATA_LOG";

const CRATE_TARGETS: [&str; 2] = ["relata", "relata_core"];

/// Helper macro for logging elapsed time at trace level.
///
/// ```rust,ignore
/// let start = Instant::now();
/// let lists = engine.rank_all(top_k);
/// trace_time!(start, "rank_all", owners = lists.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize the global subscriber from CLI flags
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn Error>> {
    let directive = match log_level {
        Some(level) => directive_for(level),
        None if verbose => directive_for("debug"),
        None => directive_for("warn"),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(io::stderr).with_ansi(false);

    if log_json {
        registry
            .with(layer.json().with_span_events(FmtSpan::CLOSE))
            .try_init()?;
    } else {
        registry.with(layer.compact().with_target(false)).try_init()?;
    }

    Ok(())
}

/// Resolve the filter directive for a requested level.
///
/// Bare levels ("debug") are scoped to the relata crates; full directives
/// ("relata_core=trace,rusqlite=warn") are passed through.
fn directive_for(level: &str) -> String {
    if level.contains('=') {
        return level.to_string();
    }
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
