//! Logger bootstrap for the binary.
//!
//! The library only talks to the `log` facade; the CLI decides where records
//! go. Messages use `event=... module=... status=...` key/value pairs.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Start logging to stderr at `level`. `RUST_LOG` takes precedence when set.
///
/// Keep the returned handle alive for the lifetime of the process.
pub fn init_logging(level: &str) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log level `{}`", level))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("failed to start logger")
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => anyhow::bail!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ),
    }
}
