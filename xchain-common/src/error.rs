// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The error taxonomy of spec §7, `CustomException`'s Rust counterpart.
//!
//! `RpcFailure` is retried indefinitely inside the RPC pool (spec §4.1) and should rarely
//! escape it; it exists here so callers that bypass the pool (the Endpoint Probe's one-shot
//! canary request) can still report it uniformly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XchainError {
    /// Unknown bridge, unknown chain, missing argument, missing chain in a bridge's config.
    /// Fatal: the caller should abort the run.
    #[error("config error: {0}")]
    Config(String),

    /// Transient HTTP/JSON-RPC error. The RPC pool retries this indefinitely with backoff;
    /// it only surfaces if retries are explicitly bypassed (e.g. Endpoint Probe).
    #[error("rpc failure on {chain}: {message}")]
    Rpc { chain: String, message: String },

    /// Unknown topic0 or malformed payload. The owning event is skipped; extraction
    /// continues.
    #[error("decode error in {bridge}/{topic}: {message}")]
    Decode {
        bridge: String,
        topic: String,
        message: String,
    },

    /// A handler failed to process one event. `duplicate` distinguishes the recoverable
    /// unique-constraint case (rollback + rebind + single retry) from any other failure
    /// (event skipped, batch continues).
    #[error("handler error [{bridge}/{chain} {start}-{end} {contract}]: {message}")]
    Handler {
        bridge: String,
        chain: String,
        start: u64,
        end: u64,
        contract: String,
        message: String,
        duplicate: bool,
    },

    /// Token metadata/price provider lookup failed. Tried at most once per run per
    /// `(chain, contract)`; USD columns remain NULL on failure.
    #[error("provider error: {0}")]
    Provider(String),

    /// A programmer error (e.g. a bridge-specific natural key was not computed). Raised as
    /// fatal so extraction stops loudly rather than silently producing bad rows.
    #[error("integrity invariant violated: {0}")]
    Integrity(String),
}

impl XchainError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, XchainError::Handler { duplicate: true, .. })
    }
}

pub type XchainResult<T> = std::result::Result<T, XchainError>;
