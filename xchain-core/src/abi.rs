// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Small ABI-decode helpers shared by every bridge's Decoder (§4.3): canonical lowercase
//! 0x-prefixed addresses/bytes, arbitrary-precision uints, never `f64`.

use bigdecimal::BigDecimal;
use ethers::abi::{decode, ParamType, Token};
use ethers::types::{H256, U256};
use xchain_common::{XchainError, XchainResult};

pub fn hex_to_bytes(bridge: &str, hex_str: &str) -> XchainResult<Vec<u8>> {
    hex::decode(hex_str.trim_start_matches("0x")).map_err(|e| XchainError::Decode {
        bridge: bridge.to_string(),
        topic: String::new(),
        message: format!("invalid hex {hex_str}: {e}"),
    })
}

pub fn decode_abi(bridge: &str, types: &[ParamType], data_hex: &str) -> XchainResult<Vec<Token>> {
    let bytes = hex_to_bytes(bridge, data_hex)?;
    decode(types, &bytes).map_err(|e| XchainError::Decode {
        bridge: bridge.to_string(),
        topic: String::new(),
        message: format!("ABI decode failed: {e}"),
    })
}

pub fn lower_hex_address(token: &Token) -> Option<String> {
    token.clone().into_address().map(|a| format!("{a:#x}"))
}

pub fn lower_hex_bytes32(token: &Token) -> Option<String> {
    token.clone().into_fixed_bytes().map(|b| format!("0x{}", hex::encode(b)))
}

pub fn token_uint_to_bigdecimal(token: &Token) -> Option<BigDecimal> {
    token.clone().into_uint().map(u256_to_bigdecimal)
}

pub fn u256_to_bigdecimal(value: U256) -> BigDecimal {
    value.to_string().parse().expect("U256 decimal string always parses")
}

/// A topic slot (already 32 bytes) interpreted as a right-aligned address, lowercased.
pub fn topic_to_address(topic: &str) -> XchainResult<String> {
    let bytes = hex_to_bytes("", topic)?;
    if bytes.len() < 20 {
        return Err(XchainError::Decode {
            bridge: String::new(),
            topic: topic.to_string(),
            message: "topic too short for address".into(),
        });
    }
    Ok(format!("0x{}", hex::encode(&bytes[bytes.len() - 20..])))
}

pub fn topic_to_h256(topic: &str) -> XchainResult<H256> {
    let bytes = hex_to_bytes("", topic)?;
    Ok(H256::from_slice(&bytes))
}

pub fn topic_to_u256(topic: &str) -> XchainResult<U256> {
    let bytes = hex_to_bytes("", topic)?;
    Ok(U256::from_big_endian(&bytes))
}

/// `bytes(str(chain_id), "ascii")` left-justified and null-padded to 32 bytes — Router's
/// `destChainIdBytes` / `srcChainId_bytes32` encoding (§4.4, §8 round-trip law).
pub fn encode_ascii_bytes32(chain_id: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    let ascii = chain_id.to_string();
    out[..ascii.len()].copy_from_slice(ascii.as_bytes());
    out
}

pub fn decode_ascii_bytes32(bytes: &[u8]) -> XchainResult<u64> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| XchainError::Decode {
            bridge: String::new(),
            topic: String::new(),
            message: "invalid ASCII bytes32 chain id".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bytes32_roundtrips() {
        for id in [1u64, 42161, 8453, 999_999_999] {
            let encoded = encode_ascii_bytes32(id);
            assert_eq!(decode_ascii_bytes32(&encoded).unwrap(), id);
        }
    }

    #[test]
    fn topic_to_address_takes_last_20_bytes() {
        let topic = format!("0x{}{}", "00".repeat(12), "11".repeat(20));
        assert_eq!(topic_to_address(&topic).unwrap(), format!("0x{}", "11".repeat(20)));
    }
}
