// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wire-level shapes passed between the RPC Pool, Decoder Registry, and Handlers.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

/// A single EVM log as returned by `eth_getLogs`, topics and data kept as 0x-prefixed hex.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub transaction_hash: String,
    pub block_number: u64,
    pub contract_address: String,
    pub topics: Vec<String>,
    pub data: String,
}

impl RawLog {
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// Canonical field value produced by a Decoder and consumed by a Handler. Addresses are
/// lowercased 0x-prefixed; uints are arbitrary-precision; never f64 (§3).
#[derive(Debug, Clone)]
pub enum FieldValue {
    Address(String),
    Bytes(String),
    Uint(BigDecimal),
    I64(i64),
    Bool(bool),
    Str(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Address(s) | FieldValue::Bytes(s) | FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<&BigDecimal> {
        match self {
            FieldValue::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::I64(v) => Some(*v),
            FieldValue::Uint(v) => v.to_string().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// `name → value` map a Decoder returns and a Handler consumes, enriched by the Extractor
/// with `transaction_hash` / `block_number` / `contract_address` / `topic` (§4.3).
pub type DecodedEvent = BTreeMap<String, FieldValue>;

pub const TX_HASH_KEY: &str = "transaction_hash";
pub const BLOCK_NUMBER_KEY: &str = "block_number";
pub const CONTRACT_ADDRESS_KEY: &str = "contract_address";
pub const TOPIC_KEY: &str = "topic";

/// Normalized transaction row shared by every bridge's `<bridge>_blockchain_transactions`
/// table (§3 `BlockchainTransaction`).
#[derive(Debug, Clone)]
pub struct BlockchainTransactionRow {
    pub transaction_hash: String,
    pub blockchain: String,
    pub block_number: i64,
    pub timestamp: i64,
    pub from_address: String,
    pub to_address: Option<String>,
    pub status: i32,
    pub fee: BigDecimal,
    pub value: Option<BigDecimal>,
}
