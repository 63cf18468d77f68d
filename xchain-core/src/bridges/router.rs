// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Router Protocol Gateway: `FundsDeposited`/`iUSDCDeposited`/`DepositInfoUpdate` on the
//! source-chain Gateway contract, `FundsPaid` on the destination. The correlation key between
//! the two sides is not an on-chain field but a `messageHash` each side derives independently
//! from the deposit parameters (§8), so the Decoder computes it the same way Router's own
//! relayer does rather than reading it off the event.

use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use ethers::abi::{encode, Token};
use ethers::utils::keccak256;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::abi::{decode_abi, decode_ascii_bytes32, encode_ascii_bytes32, lower_hex_address, token_uint_to_bigdecimal};
use crate::bridge::ChainName;
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use ethers::types::U256;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{
    NewRouterDepositInfoUpdate, NewRouterFundsDeposited, NewRouterFundsPaid, NewRouterIusdcDeposited,
};
use xchain_schema::schema::{
    router_deposit_info_update, router_funds_deposited, router_funds_paid, router_iusdc_deposited,
};

pub const FUNDS_DEPOSITED_TOPIC: &str = "0x6f223106c8e3df857d691613d18d1478cc7c629a1fdf16c7b461d36729fcc7ad";
pub const FUNDS_DEPOSITED_WITH_MESSAGE_TOPIC: &str = "0x3dbc28a2fa93575c89d951d683c45ddb951a2ecf6bc9b9704a61589fa0fcb70f";
pub const IUSDC_DEPOSITED_TOPIC: &str = "0x297a8bc8b87367a63661d6429dbab51be5cefd71ce6a3050fa900a8f276d66d9";
pub const DEPOSIT_INFO_UPDATE_TOPIC: &str = "0x86896302632bf6dc8a3ac0ae7ddf17d5a5d5c1ca1aad37b4b920a587c51135b1";
pub const FUNDS_PAID_TOPIC: &str = "0x0f3ca0b27903ec13ef88a7ea8be837cc19b0d7f71a735f2083215739a8004464";
pub const FUNDS_PAID_WITH_MESSAGE_TOPIC: &str = "0x21937deaa62558dad619c8d730a7d1d7ef41731fc194c32973511e1455cb37ad";

/// Fallback token decimals per chain, used only when a deposit event's token field resolves
/// to a known stablecoin the ABI does not report decimals for (§8 `TOKEN_DECIMALS`). BNB's
/// tracked stables are 6-decimal; every other chain's are 18.
static TOKEN_DECIMALS: Lazy<HashMap<ChainName, u32>> = Lazy::new(|| {
    use ChainName::*;
    HashMap::from([
        (Ethereum, 18),
        (Arbitrum, 18),
        (Optimism, 18),
        (Polygon, 18),
        (Base, 18),
        (Bnb, 6),
    ])
});

/// `destChainId` is ASCII-decimal-encoded into a bytes32 slot (§4.4), round-tripped through
/// `encode_ascii_bytes32`/`decode_ascii_bytes32` rather than parsed as a binary integer.
fn message_hash(
    amount: &U256,
    src_chain_id: u64,
    deposit_id: &U256,
    dest_token: &str,
    recipient: &str,
    destination_forwarder: &str,
) -> XchainResult<String> {
    let src_chain_id_bytes32 = encode_ascii_bytes32(src_chain_id);
    let dest_token: ethers::types::Address = dest_token.parse().map_err(|e| XchainError::Decode {
        bridge: "router".into(),
        topic: String::new(),
        message: format!("invalid dest_token address: {e}"),
    })?;
    let recipient: ethers::types::Address = recipient.parse().map_err(|e| XchainError::Decode {
        bridge: "router".into(),
        topic: String::new(),
        message: format!("invalid recipient address: {e}"),
    })?;
    let destination_forwarder: ethers::types::Address =
        destination_forwarder.parse().map_err(|e| XchainError::Decode {
            bridge: "router".into(),
            topic: String::new(),
            message: format!("invalid destination_forwarder address: {e}"),
        })?;

    let encoded = encode(&[
        Token::Uint(*amount),
        Token::FixedBytes(src_chain_id_bytes32.to_vec()),
        Token::Uint(*deposit_id),
        Token::Address(dest_token),
        Token::Address(recipient),
        Token::Address(destination_forwarder),
    ]);
    Ok(format!("0x{}", hex::encode(keccak256(encoded))))
}

fn upscale_to_18_decimals(amount: U256, decimals: u32) -> Option<U256> {
    if decimals >= 18 {
        return Some(amount);
    }
    let scale = U256::from(10u64).checked_pow(U256::from(18 - decimals))?;
    amount.checked_mul(scale)
}

fn decode_funds_deposited(log: &RawLog, topic: &str, with_message: bool) -> XchainResult<DecodedEvent> {
    let mut types = vec![
        ParamType::Uint(256), // partnerId
        ParamType::Uint(256), // amount
        ParamType::Uint(256), // depositId
        ParamType::FixedBytes(32), // destChainIdBytes
        ParamType::Address,   // srcToken
        ParamType::Address,   // depositor
        ParamType::Address,   // recipient
        ParamType::Address,   // destToken
        ParamType::Address,   // destinationForwarder
    ];
    if with_message {
        types.push(ParamType::Bytes); // message
    }
    let tokens = decode_abi("router", &types, &log.data)?;

    let mut out = DecodedEvent::new();
    let partner_id = tokens.first().and_then(token_uint_to_bigdecimal);
    let amount_u256 = tokens.get(1).and_then(|t| t.clone().into_uint());
    let deposit_id_u256 = tokens.get(2).and_then(|t| t.clone().into_uint());
    let dest_chain_id_bytes = tokens.get(3).and_then(|t| t.clone().into_fixed_bytes());
    let src_token = tokens.get(4).and_then(lower_hex_address);
    let depositor = tokens.get(5).and_then(lower_hex_address);
    let recipient = tokens.get(6).and_then(lower_hex_address);
    let dest_token = tokens.get(7).and_then(lower_hex_address);
    let destination_forwarder = tokens.get(8).and_then(lower_hex_address);
    let message = if with_message {
        tokens.get(9).and_then(|t| t.clone().into_bytes()).map(|b| format!("0x{}", hex::encode(b)))
    } else {
        None
    };

    if let Some(v) = partner_id {
        out.insert("partner_id".into(), FieldValue::Uint(v));
    }
    if let Some(v) = amount_u256 {
        out.insert("amount".into(), FieldValue::Uint(crate::abi::u256_to_bigdecimal(v)));
    }
    if let Some(v) = deposit_id_u256 {
        out.insert("deposit_id".into(), FieldValue::Uint(crate::abi::u256_to_bigdecimal(v)));
    }
    if let Some(ref b) = dest_chain_id_bytes {
        out.insert("dest_chain_id_bytes".into(), FieldValue::Bytes(format!("0x{}", hex::encode(b))));
        if let Ok(id) = decode_ascii_bytes32(b) {
            out.insert("dest_chain_id".into(), FieldValue::I64(id as i64));
        }
    }
    if let Some(v) = src_token {
        out.insert("src_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = depositor {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = recipient {
        out.insert("recipient".into(), FieldValue::Address(v));
    }
    if let Some(v) = dest_token {
        out.insert("dest_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = destination_forwarder {
        out.insert("destination_forwarder".into(), FieldValue::Address(v));
    }
    if let Some(v) = message {
        out.insert("message".into(), FieldValue::Bytes(v));
    }
    out.insert("has_message".into(), FieldValue::Bool(with_message));
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(topic.into()));
    Ok(out)
}

fn decode_funds_deposited_plain(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_funds_deposited(log, FUNDS_DEPOSITED_TOPIC, false)
}

fn decode_funds_deposited_with_message(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_funds_deposited(log, FUNDS_DEPOSITED_WITH_MESSAGE_TOPIC, true)
}

fn decode_iusdc_deposited(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Uint(256),     // depositId
        ParamType::FixedBytes(32), // destChainIdBytes
        ParamType::Uint(256),     // amount
        ParamType::Address,       // depositor
        ParamType::Address,       // recipient
    ];
    let tokens = decode_abi("router", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(token_uint_to_bigdecimal) {
        out.insert("deposit_id".into(), FieldValue::Uint(v));
    }
    if let Some(b) = tokens.get(1).and_then(|t| t.clone().into_fixed_bytes()) {
        out.insert("dest_chain_id_bytes".into(), FieldValue::Bytes(format!("0x{}", hex::encode(&b))));
        if let Ok(id) = decode_ascii_bytes32(&b) {
            out.insert("dest_chain_id".into(), FieldValue::I64(id as i64));
        }
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(4).and_then(lower_hex_address) {
        out.insert("recipient".into(), FieldValue::Address(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(IUSDC_DEPOSITED_TOPIC.into()));
    Ok(out)
}

fn decode_deposit_info_update(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Uint(256), ParamType::Uint(256)];
    let tokens = decode_abi("router", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(token_uint_to_bigdecimal) {
        out.insert("deposit_id".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("dest_amount".into(), FieldValue::Uint(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(DEPOSIT_INFO_UPDATE_TOPIC.into()));
    Ok(out)
}

fn decode_funds_paid(log: &RawLog, topic: &str, with_message: bool) -> XchainResult<DecodedEvent> {
    let mut types = vec![ParamType::FixedBytes(32)]; // messageHash
    if with_message {
        types.push(ParamType::Address); // forwarder
    }
    let tokens = decode_abi("router", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(|t| t.clone().into_fixed_bytes()) {
        out.insert("message_hash".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    if with_message {
        if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
            out.insert("forwarder".into(), FieldValue::Address(v));
        }
    }
    out.insert("has_message".into(), FieldValue::Bool(with_message));
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(topic.into()));
    Ok(out)
}

fn decode_funds_paid_plain(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_funds_paid(log, FUNDS_PAID_TOPIC, false)
}

fn decode_funds_paid_with_message(log: &RawLog) -> XchainResult<DecodedEvent> {
    decode_funds_paid(log, FUNDS_PAID_WITH_MESSAGE_TOPIC, true)
}

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn to_u256(v: &BigDecimal) -> U256 {
    U256::from_dec_str(&v.to_string()).unwrap_or_default()
}

fn handler_err(chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: "router".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct FundsDepositedHandler;

#[async_trait]
impl EventHandler for FundsDepositedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let dest_chain_name = event
            .get("dest_chain_id")
            .and_then(FieldValue::as_i64)
            .and_then(|id| crate::bridge::evm_chain_name(id as u64));

        // Stable-token fallback: when the event carries no dest_token, fall back to the
        // chain's tracked stablecoin decimals and skip hash computation (no address to hash).
        let hash = match (
            get_uint(&event, "amount"),
            event.get("dest_chain_id").and_then(FieldValue::as_i64),
            get_uint(&event, "deposit_id"),
            get_str(&event, "dest_token"),
            get_str(&event, "recipient"),
            get_str(&event, "destination_forwarder"),
        ) {
            (Some(amount), Some(src_chain_id), Some(deposit_id), Some(dest_token), Some(recipient), Some(forwarder)) => {
                let decimals = dest_chain_name.and_then(|c| TOKEN_DECIMALS.get(&c).copied()).unwrap_or(18);
                let scaled = upscale_to_18_decimals(to_u256(&amount), decimals).unwrap_or_else(|| to_u256(&amount));
                message_hash(&scaled, src_chain_id as u64, &to_u256(&deposit_id), &dest_token, &recipient, &forwarder).ok()
            }
            _ => None,
        };

        let row = NewRouterFundsDeposited {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            partner_id: get_uint(&event, "partner_id").unwrap_or_default(),
            deposit_id: get_uint(&event, "deposit_id").unwrap_or_default(),
            has_message: event.get("has_message").and_then(FieldValue::as_bool).unwrap_or(false),
            message_hash: hash,
            dest_chain_id_bytes: get_str(&event, "dest_chain_id_bytes").unwrap_or_default(),
            dest_chain_name: dest_chain_name.map(|c| c.to_string()),
            amount: get_uint(&event, "amount").unwrap_or_default(),
            dest_amount: None,
            src_token: get_str(&event, "src_token").unwrap_or_default(),
            depositor: get_str(&event, "depositor").unwrap_or_default(),
            dest_token: get_str(&event, "dest_token"),
            recipient: get_str(&event, "recipient"),
            destination_forwarder: get_str(&event, "destination_forwarder"),
            message: get_str(&event, "message"),
        };

        let inserted = diesel::insert_into(router_funds_deposited::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct IusdcDepositedHandler;

#[async_trait]
impl EventHandler for IusdcDepositedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let dest_chain_name = event
            .get("dest_chain_id")
            .and_then(FieldValue::as_i64)
            .and_then(|id| crate::bridge::evm_chain_name(id as u64));

        let deposit_id = get_uint(&event, "deposit_id").unwrap_or_default();
        let src_chain_id = event.get("dest_chain_id").and_then(FieldValue::as_i64).unwrap_or(0);
        let amount = get_uint(&event, "amount").unwrap_or_default();
        let depositor = get_str(&event, "depositor").unwrap_or_default();
        let recipient = get_str(&event, "recipient").unwrap_or_default();

        // iUSDC's recipient doubles as the Circle-side message destination; the message hash
        // uses the depositor's own address as `destinationForwarder` since no forwarder field
        // exists on this event (§8).
        let Ok(hash) = message_hash(&to_u256(&amount), src_chain_id as u64, &to_u256(&deposit_id), &recipient, &recipient, &depositor) else {
            return Ok(None);
        };

        let row = NewRouterIusdcDeposited {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            deposit_id,
            dest_chain_id_bytes: get_str(&event, "dest_chain_id_bytes").unwrap_or_default(),
            dest_chain_name: dest_chain_name.map(|c| c.to_string()),
            amount,
            depositor,
            recipient,
            message_hash: hash,
        };

        let inserted = diesel::insert_into(router_iusdc_deposited::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct DepositInfoUpdateHandler;

#[async_trait]
impl EventHandler for DepositInfoUpdateHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewRouterDepositInfoUpdate {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            deposit_id: get_uint(&event, "deposit_id").unwrap_or_default(),
            dest_amount: get_uint(&event, "dest_amount").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(router_deposit_info_update::table)
            .values(&row)
            .on_conflict((router_deposit_info_update::blockchain, router_deposit_info_update::deposit_id))
            .do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct FundsPaidHandler;

#[async_trait]
impl EventHandler for FundsPaidHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewRouterFundsPaid {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            message_hash: get_str(&event, "message_hash").ok_or_else(|| XchainError::Integrity("missing message_hash".into()))?,
            has_message: event.get("has_message").and_then(FieldValue::as_bool).unwrap_or(false),
            forwarder: get_str(&event, "forwarder"),
        };

        let inserted = diesel::insert_into(router_funds_paid::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Router)
        .register(FUNDS_DEPOSITED_TOPIC, decode_funds_deposited_plain, Arc::new(FundsDepositedHandler))
        .register(FUNDS_DEPOSITED_WITH_MESSAGE_TOPIC, decode_funds_deposited_with_message, Arc::new(FundsDepositedHandler))
        .register(IUSDC_DEPOSITED_TOPIC, decode_iusdc_deposited, Arc::new(IusdcDepositedHandler))
        .register(DEPOSIT_INFO_UPDATE_TOPIC, decode_deposit_info_update, Arc::new(DepositInfoUpdateHandler))
        .register(FUNDS_PAID_TOPIC, decode_funds_paid_plain, Arc::new(FundsPaidHandler))
        .register(FUNDS_PAID_WITH_MESSAGE_TOPIC, decode_funds_paid_with_message, Arc::new(FundsPaidHandler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_upscale_fills_to_eighteen_places() {
        let amount = U256::from(1_000_000u64); // 1.0 at 6 decimals
        let scaled = upscale_to_18_decimals(amount, 6).unwrap();
        assert_eq!(scaled, U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(12)));
    }

    #[test]
    fn decimal_upscale_is_noop_at_eighteen_places() {
        let amount = U256::from(42u64);
        assert_eq!(upscale_to_18_decimals(amount, 18).unwrap(), amount);
    }
}
