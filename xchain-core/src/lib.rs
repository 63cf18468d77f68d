// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chain-agnostic plumbing shared by every bridge: ABI/log decoding helpers, the
//! `Bridge`/`ChainName` vocabularies, RPC pooling, DB access, the Extractor and Generator
//! pipelines, and price enrichment. Per-bridge wiring lives under [`bridges`].

pub mod abi;
pub mod bridge;
pub mod bridges;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod extractor;
pub mod generator;
pub mod price;
pub mod provider;
pub mod rpc;
pub mod solana_extractor;
pub mod types;

pub use bridge::{Bridge, ChainName};
pub use dispatch::{BridgeModule, EventHandler, TransactionSink};
pub use extractor::{extract, ExtractTarget};
pub use generator::{generator_for, run as run_generator, CrossChainGenerator};
pub use price::PriceEnricher;
pub use solana_extractor::{extract_solana, SolanaInstructionDecoder};
