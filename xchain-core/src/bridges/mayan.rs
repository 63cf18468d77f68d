// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Mayan Swift (order book) plus Mayan Forwarder (swap-then-forward). The forwarder events
//! carry an order-params blob (`mayanData`/`protocolData`) whose layout is a bespoke binary
//! encoding produced by the forwarder contract, not ABI-encoded tuples; decoding it is out of
//! scope here (§DESIGN.md) so only the fields present directly on the log are tracked, and
//! results are filtered to the Mayan Swift protocol address the way the source does.
//! `OrderCreated`/`OrderFulfilled`/`OrderUnlocked` come from the Swift contract itself.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::bridge::NATIVE_TOKEN_SENTINEL;
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{
    NewMayanForwarded, NewMayanOrderCreated, NewMayanOrderFulfilled, NewMayanOrderUnlocked,
    NewMayanSwapAndForwarded,
};
use xchain_schema::schema::{
    mayan_forwarded, mayan_order_created, mayan_order_fulfilled, mayan_order_unlocked,
    mayan_swap_and_forwarded,
};

pub const SWAP_AND_FORWARDED_ETH_TOPIC: &str =
    "0x7cbff921ae1f3ea71284120d2aabde13587df067f2bb5c831ea6e35d7a9242ac";
pub const SWAP_AND_FORWARDED_ERC20_TOPIC: &str =
    "0x23278f58875126c795a4072b98b5851fe9b21cea19895b02a6224fefbb1e3298";
pub const FORWARDED_ETH_TOPIC: &str =
    "0xb8543d214cab9591941648db8d40126a163bfd0db4a865678320b921e1398043";
pub const FORWARDED_ERC20_TOPIC: &str =
    "0xbf150db6b4a14b084f7346b4bc300f552ce867afe55be27bce2d6b37e3307cda";
pub const ORDER_CREATED_TOPIC: &str = "0x918554b6bd6e2895ce6553de5de0e1a69db5289aa0e4fe193a0dcd1f14347477";
pub const ORDER_FULFILLED_TOPIC: &str = "0x6ec9b1b5a9f54d929394f18dac4ba1b1cc79823f2266c2d09cab8a3b4700b40b";
pub const ORDER_UNLOCKED_TOPIC: &str = "0x4bdcff348c4d11383c487afb95f732f243d93fbfc478aa736a4981cf6a640911";

/// Only this contract's swap/forward legs are tracked, matching the source's hardcoded filter.
const MAYAN_SWIFT_PROTOCOL: &str = "0xc38e4e6a15593f908255214653d3d947ca1c2338";

fn decode_swap_and_forwarded(log: &RawLog, with_token_in: bool) -> XchainResult<DecodedEvent> {
    let mut types = Vec::new();
    if with_token_in {
        types.push(ParamType::Address); // tokenIn
    }
    types.push(ParamType::Uint(256)); // amountIn
    types.push(ParamType::Address); // swapProtocol
    types.push(ParamType::Address); // middleToken
    types.push(ParamType::Uint(256)); // middleAmount
    types.push(ParamType::Address); // mayanProtocol
    types.push(ParamType::Bytes); // mayanData (order params, not decoded)

    let tokens = decode_abi("mayan", &types, &log.data)?;
    let mut idx = 0usize;
    let mut out = DecodedEvent::new();

    let token_in = if with_token_in {
        let v = tokens.get(idx).and_then(lower_hex_address);
        idx += 1;
        v.unwrap_or_else(|| NATIVE_TOKEN_SENTINEL.to_string())
    } else {
        NATIVE_TOKEN_SENTINEL.to_string()
    };
    out.insert("token_in".into(), FieldValue::Address(token_in));

    if let Some(v) = tokens.get(idx).and_then(token_uint_to_bigdecimal) {
        out.insert("amount_in".into(), FieldValue::Uint(v));
    }
    idx += 1;
    if let Some(v) = tokens.get(idx).and_then(lower_hex_address) {
        out.insert("swap_protocol".into(), FieldValue::Address(v));
    }
    idx += 1;
    if let Some(v) = tokens.get(idx).and_then(lower_hex_address) {
        out.insert("middle_token".into(), FieldValue::Address(v));
    }
    idx += 1;
    if let Some(v) = tokens.get(idx).and_then(token_uint_to_bigdecimal) {
        out.insert("middle_amount".into(), FieldValue::Uint(v));
    }
    idx += 1;
    let mayan_protocol = tokens.get(idx).and_then(lower_hex_address).unwrap_or_default();
    out.insert("mayan_protocol".into(), FieldValue::Address(mayan_protocol));

    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(
        TOPIC_KEY.into(),
        FieldValue::Str(if with_token_in {
            SWAP_AND_FORWARDED_ERC20_TOPIC.into()
        } else {
            SWAP_AND_FORWARDED_ETH_TOPIC.into()
        }),
    );
    Ok(out)
}

fn decode_swap_and_forwarded_eth(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_swap_and_forwarded(log, false)
}

fn decode_swap_and_forwarded_erc20(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_swap_and_forwarded(log, true)
}

fn decode_forwarded(log: &RawLog, with_token: bool) -> XchainResult<DecodedEvent> {
    let mut types = Vec::new();
    if with_token {
        types.push(ParamType::Address); // token
        types.push(ParamType::Uint(256)); // amount
    }
    types.push(ParamType::Address); // mayanProtocol
    types.push(ParamType::Bytes); // protocolData (order params, not decoded)

    let tokens = decode_abi("mayan", &types, &log.data)?;
    let mut idx = 0usize;
    let mut out = DecodedEvent::new();

    if with_token {
        let token = tokens.get(idx).and_then(lower_hex_address).unwrap_or_default();
        out.insert("token".into(), FieldValue::Address(token));
        idx += 1;
        if let Some(v) = tokens.get(idx).and_then(token_uint_to_bigdecimal) {
            out.insert("amount".into(), FieldValue::Uint(v));
        }
        idx += 1;
    } else {
        out.insert("token".into(), FieldValue::Address(NATIVE_TOKEN_SENTINEL.to_string()));
    }

    let mayan_protocol = tokens.get(idx).and_then(lower_hex_address).unwrap_or_default();
    out.insert("mayan_protocol".into(), FieldValue::Address(mayan_protocol));

    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(
        TOPIC_KEY.into(),
        FieldValue::Str(if with_token { FORWARDED_ERC20_TOPIC.into() } else { FORWARDED_ETH_TOPIC.into() }),
    );
    Ok(out)
}

fn decode_forwarded_eth(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_forwarded(log, false)
}

fn decode_forwarded_erc20(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_forwarded(log, true)
}

fn decode_order_created(log: &RawLog) -> XchainResult<DecodedEvent> {
    let tokens = decode_abi("mayan", &[ParamType::FixedBytes(32)], &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("order_key".into(), FieldValue::Bytes(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(ORDER_CREATED_TOPIC.into()));
    Ok(out)
}

fn decode_order_unlocked(log: &RawLog) -> XchainResult<DecodedEvent> {
    let tokens = decode_abi("mayan", &[ParamType::FixedBytes(32)], &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("order_key".into(), FieldValue::Bytes(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(ORDER_UNLOCKED_TOPIC.into()));
    Ok(out)
}

fn decode_order_fulfilled(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::FixedBytes(32), ParamType::Uint(64), ParamType::Uint(256)];
    let tokens = decode_abi("mayan", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("order_key".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("sequence".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("net_amount".into(), FieldValue::Uint(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(ORDER_FULFILLED_TOPIC.into()));
    Ok(out)
}

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<bigdecimal::BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn handler_err(chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: "mayan".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct SwapAndForwardedHandler;

#[async_trait]
impl EventHandler for SwapAndForwardedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        if get_str(&event, "mayan_protocol").as_deref() != Some(MAYAN_SWIFT_PROTOCOL) {
            return Ok(None);
        }
        let row = NewMayanSwapAndForwarded {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            token_in: get_str(&event, "token_in").unwrap_or_default(),
            amount_in: get_uint(&event, "amount_in").unwrap_or_default(),
            swap_protocol: get_str(&event, "swap_protocol"),
            middle_token: get_str(&event, "middle_token"),
            middle_amount: get_uint(&event, "middle_amount"),
            mayan_protocol: get_str(&event, "mayan_protocol").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(mayan_swap_and_forwarded::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct ForwardedHandler;

#[async_trait]
impl EventHandler for ForwardedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        if get_str(&event, "mayan_protocol").as_deref() != Some(MAYAN_SWIFT_PROTOCOL) {
            return Ok(None);
        }
        let row = NewMayanForwarded {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            token: get_str(&event, "token").unwrap_or_default(),
            amount: get_uint(&event, "amount"),
            mayan_protocol: get_str(&event, "mayan_protocol").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(mayan_forwarded::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct OrderCreatedHandler;

#[async_trait]
impl EventHandler for OrderCreatedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewMayanOrderCreated {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            order_key: get_str(&event, "order_key").ok_or_else(|| XchainError::Integrity("missing order_key".into()))?,
        };

        let inserted = diesel::insert_into(mayan_order_created::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct OrderUnlockedHandler;

#[async_trait]
impl EventHandler for OrderUnlockedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewMayanOrderUnlocked {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            order_key: get_str(&event, "order_key").ok_or_else(|| XchainError::Integrity("missing order_key".into()))?,
        };

        let inserted = diesel::insert_into(mayan_order_unlocked::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct OrderFulfilledHandler;

#[async_trait]
impl EventHandler for OrderFulfilledHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewMayanOrderFulfilled {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            order_key: get_str(&event, "order_key").ok_or_else(|| XchainError::Integrity("missing order_key".into()))?,
            sequence: get_uint(&event, "sequence"),
            net_amount: get_uint(&event, "net_amount"),
        };

        let inserted = diesel::insert_into(mayan_order_fulfilled::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Mayan)
        .register(SWAP_AND_FORWARDED_ETH_TOPIC, decode_swap_and_forwarded_eth, Arc::new(SwapAndForwardedHandler))
        .register(SWAP_AND_FORWARDED_ERC20_TOPIC, decode_swap_and_forwarded_erc20, Arc::new(SwapAndForwardedHandler))
        .register(FORWARDED_ETH_TOPIC, decode_forwarded_eth, Arc::new(ForwardedHandler))
        .register(FORWARDED_ERC20_TOPIC, decode_forwarded_erc20, Arc::new(ForwardedHandler))
        .register(ORDER_CREATED_TOPIC, decode_order_created, Arc::new(OrderCreatedHandler))
        .register(ORDER_FULFILLED_TOPIC, decode_order_fulfilled, Arc::new(OrderFulfilledHandler))
        .register(ORDER_UNLOCKED_TOPIC, decode_order_unlocked, Arc::new(OrderUnlockedHandler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_and_forwarded_protocol_filter_is_case_insensitive_source() {
        assert_eq!(MAYAN_SWIFT_PROTOCOL, MAYAN_SWIFT_PROTOCOL.to_lowercase());
    }
}
