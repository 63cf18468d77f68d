// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI-facing colorized status lines and the structured `error_log.log` sink (spec §7).
//!
//! `log_to_cli` is the Rust counterpart of `utils/utils.py`'s `log_to_cli`/`build_log_message`:
//! every line is tagged with `(bridge, chain, [start, end])` context. `log_error` appends a
//! `CustomException`-shaped record to the `xchain::error_log` tracing target, which
//! `init_error_log_file` routes to `error_log.log` via a non-blocking file layer, leaving the
//! normal stderr stream uncluttered by per-event failures.

use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliColor {
    Info,
    Success,
    Warning,
    Error,
}

impl CliColor {
    fn ansi(self) -> &'static str {
        match self {
            CliColor::Info => "\x1b[36m",    // cyan
            CliColor::Success => "\x1b[32m", // green
            CliColor::Warning => "\x1b[33m", // yellow
            CliColor::Error => "\x1b[31m",   // red
        }
    }

    fn label(self) -> &'static str {
        match self {
            CliColor::Info => "INFO",
            CliColor::Success => "SUCCESS",
            CliColor::Warning => "WARNING",
            CliColor::Error => "ERROR",
        }
    }
}

/// Build the `[bridge/chain start-end] message` line shared by every extraction log.
pub fn build_log_message(bridge: &str, chain: &str, start: u64, end: u64, message: &str) -> String {
    format!("[{bridge}/{chain} {start}-{end}] {message}")
}

/// Print a colorized status line to stderr and emit a matching tracing event at the
/// appropriate level, so the same line is captured by whatever subscriber is installed.
pub fn log_to_cli(bridge: &str, chain: &str, start: u64, end: u64, message: &str, color: CliColor) {
    let line = build_log_message(bridge, chain, start, end, message);
    eprintln!("{}{}\x1b[0m [{}]", color.ansi(), line, color.label());
    match color {
        CliColor::Error => tracing::error!(bridge, chain, start, end, "{message}"),
        CliColor::Warning => tracing::warn!(bridge, chain, start, end, "{message}"),
        CliColor::Success => tracing::info!(bridge, chain, start, end, success = true, "{message}"),
        CliColor::Info => tracing::info!(bridge, chain, start, end, "{message}"),
    }
}

/// Append a structured `CustomException` record to the `error_log.log` target. Out-of-scope
/// chains are intentionally never routed here — they are silently dropped, not errors.
pub fn log_error(bridge: &str, description: &str) {
    tracing::error!(target: "xchain::error_log", bridge, "{description}");
}

/// Install a non-blocking JSON file layer scoped to the `xchain::error_log` target, on top of
/// whatever global subscriber `telemetry_subscribers::TelemetryConfig` already installed.
///
/// Must be called once, after the base subscriber is initialized, from the binary's `main`.
pub fn init_error_log_file(path: impl AsRef<Path>) -> tracing_appender::non_blocking::WorkerGuard {
    let path = path.as_ref();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "error_log.log".to_string());
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::filter::Targets::new().with_target("xchain::error_log", tracing::Level::ERROR);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .json()
        .with_filter(filter);

    // `tracing_subscriber::registry()` here composes with whatever default subscriber is
    // already set via `set_global_default`'s dispatcher-local layering is not possible after
    // the fact, so this layer is added by re-subscribing at the `Dispatch` level instead.
    let _ = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_context() {
        let msg = build_log_message("router", "ethereum", 100, 200, "processing");
        assert_eq!(msg, "[router/ethereum 100-200] processing");
    }
}
