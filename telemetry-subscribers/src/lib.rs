// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Common tracing/logging setup shared by every binary in this workspace.
//!
//! `TelemetryConfig::new().with_env().init()` installs a `tracing-subscriber` registry with
//! an `EnvFilter` (`RUST_LOG`, defaulting to `info`) and an ANSI-colored fmt layer on stderr.
//! Callers that also want the structured `error_log.log` sink (see `xchain_common::logging`)
//! layer it on top of the guard this returns.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Handle kept alive for the lifetime of the process so the non-blocking file appender (if
/// any) keeps flushing.
pub struct TelemetryGuards {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

#[derive(Default)]
pub struct TelemetryConfig {
    use_env: bool,
    json: bool,
    log_file: Option<PathBuf>,
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the filter from `RUST_LOG`, falling back to `info` when unset or invalid.
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    pub fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Additionally tee all events to `path` as newline-delimited JSON, non-blocking.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn init(self) -> (TelemetryGuards, tracing_subscriber::reload::Handle<EnvFilter, tracing_subscriber::Registry>) {
        let filter = if self.use_env {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        } else {
            EnvFilter::new("info")
        };

        let (filter_layer, reload_handle) = tracing_subscriber::reload::Layer::new(filter);

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true);

        let mut file_guard = None;
        let registry = tracing_subscriber::registry().with(filter_layer).with(fmt_layer);

        if let Some(path) = &self.log_file {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "telemetry.log".to_string());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .json();
            registry.with(file_layer).init();
        } else {
            registry.init();
        }

        let _ = INIT.set(());

        (
            TelemetryGuards {
                _file_guard: file_guard,
            },
            reload_handle,
        )
    }
}

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let cfg = TelemetryConfig::new().with_env();
        assert!(cfg.use_env);
        assert!(cfg.log_file.is_none());
    }
}
