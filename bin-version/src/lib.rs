// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Build-time version string shared by the CLI binary and the indexer.

#[macro_export]
macro_rules! git_revision {
    () => {
        $crate::git_version::git_version!(
            args = ["--always", "--dirty", "--exclude", "*"],
            fallback = "unknown"
        )
    };
}

#[macro_export]
macro_rules! version {
    () => {
        $crate::const_str::concat!(env!("CARGO_PKG_VERSION"), "-", $crate::git_revision!())
    };
}

pub use const_str;
pub use git_version;
