// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The five bridges carried at reduced depth (§11): CCTP, Across, Polygon PoS, Ronin, and
//! Omnibridge each get one deposit-shaped and one claim-shaped event mapped onto the shared
//! `generic_deposit`/`generic_claim` tables rather than a dedicated raw-table set. Polygon
//! PoS (`LockedToken`/`ExitedToken`) and Omnibridge (`TokensBridgingInitiated`/
//! `TokensBridged`) are grounded on `repository/polygon/models.py` and
//! `repository/omnibridge/models.py`; CCTP, Across, and Ronin have no Python source in this
//! pack, so their event shapes follow each protocol's public ABI instead (documented per
//! constant below; see DESIGN.md).

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, token_uint_to_bigdecimal};
use crate::bridge::Bridge;
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewGenericClaim, NewGenericDeposit};
use xchain_schema::schema::{generic_claim, generic_deposit};

/// `DepositForBurn(uint64,address,uint256,address,bytes32,uint32,bytes32,bytes32)`
pub const CCTP_DEPOSIT_FOR_BURN_TOPIC: &str = "0x2fa9ca894982930190727e75500a97d8dc500233a5065e0f3126c48fbe0343c0";
/// `MintAndWithdraw(address,uint256,address)`
pub const CCTP_MINT_AND_WITHDRAW_TOPIC: &str = "0x1b2a7ff080b8cb6ff436ce0372e399692bbfb6d4ae5766fd8d58a7b8cc6142e6";

/// `FundsDeposited(uint256,uint256,uint256,uint64,uint32,uint32,address,address,address)`
pub const ACROSS_FUNDS_DEPOSITED_TOPIC: &str = "0x4a4fc49abd237bfd7f4ac82d6c7a284c69daaea5154430cff04ad7482c6c4254";
/// `FilledRelay(uint256,uint256,uint256,int64,uint32,uint32,address,address,address,address,uint256)`
pub const ACROSS_FILLED_RELAY_TOPIC: &str = "0xf5d16c206d0e24e58f97f9bfab5d6ea0e26c63feacd2f309f0c8a622319cae6e";

/// `LockedToken(address,address,address,uint256)`
pub const POLYGON_LOCKED_TOKEN_TOPIC: &str = "0xbe79b9b5a24f462fba93ede61593f1851d2b06201d20e54e0e87e588a7830174";
/// `ExitedToken(address,address,uint256)`
pub const POLYGON_EXITED_TOKEN_TOPIC: &str = "0x093d4aff2ad4d34bb720e6a0e9c445082f32a46fc9efb9458fd3b8fbbcbd1c78";

/// `Deposited(address,address,uint256)`
pub const RONIN_DEPOSITED_TOPIC: &str = "0x8752a472e571a816aea92eec8dae9baf628e840f4929fbcc2d155e6233ff68a7";
/// `Withdrew(address,address,uint256)`
pub const RONIN_WITHDREW_TOPIC: &str = "0x0472be967f9a37138dfea1875af44784cafb79f92044ab33d7d6958eddd9ca6c";

/// `TokensBridgingInitiated(address,address,uint256,bytes32)`
pub const OMNIBRIDGE_TOKENS_BRIDGING_INITIATED_TOPIC: &str =
    "0x59a9a8027b9c87b961e254899821c9a276b5efc35d1f7409ea4f291470f1629a";
/// `TokensBridged(address,address,uint256,bytes32)`
pub const OMNIBRIDGE_TOKENS_BRIDGED_TOPIC: &str =
    "0x9afd47907e25028cdaca89d193518c302bbb128617d5a992c5abd45815526593";

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<bigdecimal::BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn get_i64(event: &DecodedEvent, k: &str) -> Option<i64> {
    event.get(k).and_then(FieldValue::as_i64)
}

fn handler_err(bridge: &str, chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: bridge.into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

fn base(log: &RawLog, topic0: &str) -> DecodedEvent {
    let mut out = DecodedEvent::new();
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(topic0.to_string()));
    out
}

fn decode_cctp_deposit_for_burn(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Uint(64),      // nonce
        ParamType::Address,      // burnToken
        ParamType::Uint(256),    // amount
        ParamType::Address,      // depositor
        ParamType::FixedBytes(32), // mintRecipient
        ParamType::Uint(32),     // destinationDomain
        ParamType::FixedBytes(32), // destinationTokenMessenger
        ParamType::FixedBytes(32), // destinationCaller
    ];
    let tokens = decode_abi("cctp", &types, &log.data)?;
    let mut out = base(log, CCTP_DEPOSIT_FOR_BURN_TOPIC);
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(5).and_then(|t| t.clone().into_uint()).map(|v| v.as_u64() as i64) {
        out.insert("dest_chain_id".into(), FieldValue::I64(v));
    }
    Ok(out)
}

fn decode_cctp_mint_and_withdraw(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Uint(256), ParamType::Address];
    let tokens = decode_abi("cctp", &types, &log.data)?;
    let mut out = base(log, CCTP_MINT_AND_WITHDRAW_TOPIC);
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    Ok(out)
}

fn decode_across_funds_deposited(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Uint(256), // amount
        ParamType::Uint(256), // originChainId
        ParamType::Uint(256), // destinationChainId
        ParamType::Uint(64),  // relayerFeePct
        ParamType::Uint(32),  // depositId
        ParamType::Uint(32),  // quoteTimestamp
        ParamType::Address,   // originToken
        ParamType::Address,   // recipient
        ParamType::Address,   // depositor
    ];
    let tokens = decode_abi("across", &types, &log.data)?;
    let mut out = base(log, ACROSS_FUNDS_DEPOSITED_TOPIC);
    if let Some(v) = tokens.first().and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(2).and_then(|t| t.clone().into_uint()).map(|v| v.as_u64() as i64) {
        out.insert("dest_chain_id".into(), FieldValue::I64(v));
    }
    if let Some(v) = tokens.get(6).and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(8).and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    Ok(out)
}

fn decode_across_filled_relay(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Uint(256), // amount
        ParamType::Uint(256), // totalFilledAmount
        ParamType::Uint(256), // fillAmount
        ParamType::Int(64),   // repaymentChainId
        ParamType::Uint(32),  // originChainId
        ParamType::Uint(32),  // destinationChainId
        ParamType::Address,   // relayer
        ParamType::Address,   // depositor
        ParamType::Address,   // recipient
        ParamType::Address,   // destinationToken
        ParamType::Uint(256), // relayerFeePct
    ];
    let tokens = decode_abi("across", &types, &log.data)?;
    let mut out = base(log, ACROSS_FILLED_RELAY_TOPIC);
    if let Some(v) = tokens.get(8).and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    Ok(out)
}

fn decode_polygon_locked_token(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Address, ParamType::Uint(256)];
    let tokens = decode_abi("polygon_pos", &types, &log.data)?;
    let mut out = base(log, POLYGON_LOCKED_TOKEN_TOPIC);
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    Ok(out)
}

fn decode_polygon_exited_token(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)];
    let tokens = decode_abi("polygon_pos", &types, &log.data)?;
    let mut out = base(log, POLYGON_EXITED_TOKEN_TOPIC);
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    Ok(out)
}

fn decode_ronin_deposited(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)];
    let tokens = decode_abi("ronin", &types, &log.data)?;
    let mut out = base(log, RONIN_DEPOSITED_TOPIC);
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    Ok(out)
}

fn decode_ronin_withdrew(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)];
    let tokens = decode_abi("ronin", &types, &log.data)?;
    let mut out = base(log, RONIN_WITHDREW_TOPIC);
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    Ok(out)
}

fn decode_omnibridge_tokens_bridging_initiated(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Uint(256), ParamType::FixedBytes(32)];
    let tokens = decode_abi("omnibridge", &types, &log.data)?;
    let mut out = base(log, OMNIBRIDGE_TOKENS_BRIDGING_INITIATED_TOPIC);
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("depositor".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    Ok(out)
}

fn decode_omnibridge_tokens_bridged(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Address, ParamType::Uint(256), ParamType::FixedBytes(32)];
    let tokens = decode_abi("omnibridge", &types, &log.data)?;
    let mut out = base(log, OMNIBRIDGE_TOKENS_BRIDGED_TOPIC);
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    Ok(out)
}

struct DepositHandler {
    bridge: Bridge,
}

#[async_trait]
impl EventHandler for DepositHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewGenericDeposit {
            bridge: self.bridge.to_string(),
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            depositor: get_str(&event, "depositor").unwrap_or_default(),
            token: get_str(&event, "token").unwrap_or_default(),
            amount: get_uint(&event, "amount").unwrap_or_default(),
            dest_chain_id: get_i64(&event, "dest_chain_id"),
        };

        let inserted = diesel::insert_into(generic_deposit::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&self.bridge.to_string(), &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct ClaimHandler {
    bridge: Bridge,
}

#[async_trait]
impl EventHandler for ClaimHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewGenericClaim {
            bridge: self.bridge.to_string(),
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            claimant: get_str(&event, "claimant").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(generic_claim::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&self.bridge.to_string(), &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

/// Built once per generic bridge and keyed into the dispatch registry by `bridge`.
pub fn module(bridge: Bridge) -> BridgeModule {
    let deposit_handler = || Arc::new(DepositHandler { bridge }) as Arc<dyn EventHandler>;
    let claim_handler = || Arc::new(ClaimHandler { bridge }) as Arc<dyn EventHandler>;

    match bridge {
        Bridge::Cctp => BridgeModule::new(bridge)
            .register(CCTP_DEPOSIT_FOR_BURN_TOPIC, decode_cctp_deposit_for_burn, deposit_handler())
            .register(CCTP_MINT_AND_WITHDRAW_TOPIC, decode_cctp_mint_and_withdraw, claim_handler()),
        Bridge::Across => BridgeModule::new(bridge)
            .register(ACROSS_FUNDS_DEPOSITED_TOPIC, decode_across_funds_deposited, deposit_handler())
            .register(ACROSS_FILLED_RELAY_TOPIC, decode_across_filled_relay, claim_handler()),
        Bridge::PolygonPos => BridgeModule::new(bridge)
            .register(POLYGON_LOCKED_TOKEN_TOPIC, decode_polygon_locked_token, deposit_handler())
            .register(POLYGON_EXITED_TOKEN_TOPIC, decode_polygon_exited_token, claim_handler()),
        Bridge::Ronin => BridgeModule::new(bridge)
            .register(RONIN_DEPOSITED_TOPIC, decode_ronin_deposited, deposit_handler())
            .register(RONIN_WITHDREW_TOPIC, decode_ronin_withdrew, claim_handler()),
        Bridge::Omnibridge => BridgeModule::new(bridge)
            .register(OMNIBRIDGE_TOKENS_BRIDGING_INITIATED_TOPIC, decode_omnibridge_tokens_bridging_initiated, deposit_handler())
            .register(OMNIBRIDGE_TOKENS_BRIDGED_TOPIC, decode_omnibridge_tokens_bridged, claim_handler()),
        other => BridgeModule::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_generic_bridge_has_two_topics() {
        for b in [Bridge::Cctp, Bridge::Across, Bridge::PolygonPos, Bridge::Ronin, Bridge::Omnibridge] {
            assert_eq!(module(b).topics.len(), 2);
        }
    }
}
