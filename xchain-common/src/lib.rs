// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

pub mod error;
pub mod logging;

pub use error::{XchainError, XchainResult};
