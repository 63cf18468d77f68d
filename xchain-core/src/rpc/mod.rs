// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

pub mod pool;
pub mod probe;

pub use pool::RpcPool;
