// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chainlink CCIP: `SendRequested`/`ExecutionStateChanged` on the OnRamp/OffRamp pair.
//! Natural key is `message_id`; CCIP encodes it as a 32-byte value already, so no
//! bridge-side hash computation is needed (contrast with Router, §8).

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewCcipExecutionStateChanged, NewCcipSendRequested};
use xchain_schema::schema::{ccip_execution_state_changed, ccip_send_requested};

pub const SEND_REQUESTED_TOPIC: &str = "0xd0c3c799bf9e2639de44391e7f524d229b2b55f5b1ea94b2bf7da42f7243dddd";
pub const EXECUTION_STATE_CHANGED_TOPIC: &str = "0xd4f851956a5d67c3997d1c9205045fef79bae2947fdee7e9e2641abc7391ef65";

/// The OnRamp emits `CCIPSendRequested((bytes32 messageId, ..., tokenAmounts, sourceTokenData))`
/// as ABI-encoded data; every field lives in `data`, not in topics.
fn decode_send_requested(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Tuple(vec![
        ParamType::Bytes,                          // sender (padded address bytes)
        ParamType::Bytes,                          // receiver (padded address bytes)
        ParamType::FixedBytes(32),                 // messageId
        ParamType::Uint(256),                      // sequenceNumber
        ParamType::Uint(256),                      // gasLimit
        ParamType::Bool,                           // strict
        ParamType::Uint(256),                      // nonce
        ParamType::Bytes,                          // feeToken (padded address bytes)
        ParamType::Uint(256),                      // feeTokenAmount
        ParamType::Bytes,                          // data
        ParamType::Array(Box::new(ParamType::Tuple(vec![
            ParamType::Bytes,   // token
            ParamType::Uint(256),
        ]))),                                       // tokenAmounts
        ParamType::Array(Box::new(ParamType::Bytes)), // sourceTokenData
    ])];
    let tokens = decode_abi("ccip", &types, &log.data)?;
    let message = tokens.into_iter().next().and_then(|t| t.into_tuple()).ok_or_else(|| XchainError::Decode {
        bridge: "ccip".into(),
        topic: SEND_REQUESTED_TOPIC.into(),
        message: "message tuple missing".into(),
    })?;

    let sender = lower_hex_bytes32(&message[0]).or_else(|| lower_hex_address(&message[0]));
    let receiver = lower_hex_bytes32(&message[1]).or_else(|| lower_hex_address(&message[1]));
    let message_id = lower_hex_bytes32(&message[2]);
    let sequence_number = token_uint_to_bigdecimal(&message[3]);
    let gas_limit = token_uint_to_bigdecimal(&message[4]);
    let strict = message[5].clone().into_bool();
    let nonce = token_uint_to_bigdecimal(&message[6]);
    let fee_token = lower_hex_bytes32(&message[7]).or_else(|| lower_hex_address(&message[7]));
    let fee_token_amount = token_uint_to_bigdecimal(&message[8]);
    let data = message[9].clone().into_bytes().map(|b| format!("0x{}", hex::encode(b)));

    let token_amounts = message[10].clone().into_array().unwrap_or_default();
    let (input_token, amount) = match token_amounts.as_slice() {
        [one] => {
            let tuple = one.clone().into_tuple().unwrap_or_default();
            let token = tuple.first().and_then(lower_hex_bytes32).or_else(|| tuple.first().and_then(lower_hex_address));
            let amt = tuple.get(1).and_then(token_uint_to_bigdecimal);
            (token, amt)
        }
        _ => (None, None),
    };

    // Output token is embedded at byte offset [512:576) of sourceTokenData[0] (32-byte
    // right-padded address), mirroring the source's `unpad_address(sourceTokenData[0][512:576])`.
    let source_token_data = message[11].clone().into_array().unwrap_or_default();
    let output_token = source_token_data.first().and_then(|t| t.clone().into_bytes()).and_then(|bytes| {
        bytes.get(512..576).map(|slice| format!("0x{}", hex::encode(&slice[slice.len().saturating_sub(20)..])))
    });

    let mut out = DecodedEvent::new();
    if let Some(v) = sender {
        out.insert("sender".into(), FieldValue::Address(v));
    }
    if let Some(v) = receiver {
        out.insert("receiver".into(), FieldValue::Address(v));
    }
    if let Some(v) = message_id {
        out.insert("message_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = sequence_number {
        out.insert("sequence_number".into(), FieldValue::Uint(v));
    }
    if let Some(v) = gas_limit {
        out.insert("gas_limit".into(), FieldValue::Uint(v));
    }
    out.insert("strict".into(), FieldValue::Bool(strict.unwrap_or(false)));
    if let Some(v) = nonce {
        out.insert("nonce".into(), FieldValue::Uint(v));
    }
    if let Some(v) = fee_token {
        out.insert("fee_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = fee_token_amount {
        out.insert("fee_token_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = data {
        out.insert("data".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = input_token {
        out.insert("input_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = amount {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = output_token {
        out.insert("output_token".into(), FieldValue::Address(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(SEND_REQUESTED_TOPIC.into()));
    Ok(out)
}

fn decode_execution_state_changed(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Uint(64), ParamType::FixedBytes(32), ParamType::Uint(8), ParamType::Bytes];
    let tokens = decode_abi("ccip", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(token_uint_to_bigdecimal) {
        out.insert("sequence_number".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("message_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(2).and_then(|t| t.clone().into_uint()) {
        out.insert("state".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(3).and_then(|t| t.clone().into_bytes()) {
        out.insert("return_data".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(EXECUTION_STATE_CHANGED_TOPIC.into()));
    Ok(out)
}

struct SendRequestedHandler;

#[async_trait]
impl EventHandler for SendRequestedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        // The source drops messages carrying arbitrary calldata; only pure token transfers
        // (`message.data == ''`) are tracked as cross-chain transfers.
        if event.get("data").and_then(FieldValue::as_str).map(|s| s != "0x").unwrap_or(false) {
            return Ok(None);
        }
        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewCcipSendRequested {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            message_id: get_str("message_id").ok_or_else(|| XchainError::Integrity("missing message_id".into()))?,
            nonce: get_uint("nonce").unwrap_or_default(),
            sender: get_str("sender").unwrap_or_default(),
            receiver: get_str("receiver").unwrap_or_default(),
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            gas_limit: get_uint("gas_limit").unwrap_or_default(),
            strict: event.get("strict").and_then(FieldValue::as_bool).unwrap_or(false),
            fee_token: get_str("fee_token").unwrap_or_default(),
            fee_token_amount: get_uint("fee_token_amount").unwrap_or_default(),
            input_token: get_str("input_token"),
            amount: get_uint("amount"),
            output_token: get_str("output_token"),
        };

        let inserted = diesel::insert_into(ccip_send_requested::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| XchainError::Handler {
                bridge: "ccip".into(),
                chain: ctx.blockchain.to_string(),
                start: 0,
                end: 0,
                contract: String::new(),
                message: e.to_string(),
                duplicate: false,
            })?;

        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct ExecutionStateChangedHandler;

#[async_trait]
impl EventHandler for ExecutionStateChangedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewCcipExecutionStateChanged {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            message_id: get_str("message_id").ok_or_else(|| XchainError::Integrity("missing message_id".into()))?,
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            state: event.get("state").and_then(FieldValue::as_i64).unwrap_or_default() as i32,
            return_data: get_str("return_data"),
        };

        let inserted = diesel::insert_into(ccip_execution_state_changed::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| XchainError::Handler {
                bridge: "ccip".into(),
                chain: ctx.blockchain.to_string(),
                start: 0,
                end: 0,
                contract: String::new(),
                message: e.to_string(),
                duplicate: false,
            })?;

        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Ccip)
        .register(SEND_REQUESTED_TOPIC, decode_send_requested, Arc::new(SendRequestedHandler))
        .register(EXECUTION_STATE_CHANGED_TOPIC, decode_execution_state_changed, Arc::new(ExecutionStateChangedHandler))
}
