// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Closed enumerations used as routing keys (§3 `Bridge`, `ChainName`).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum_macros::{Display, EnumIter, EnumString};

/// Cross-chain protocol identifiers. Stable lowercase string form doubles as the filename
/// stem for raw/cross-chain tables and the `--bridge` CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Bridge {
    Ccip,
    Debridge,
    Cow,
    Mayan,
    Portal,
    Wormhole,
    Router,
    Synapse,
    Eco,
    Fly,
    Stargate,
    Cctp,
    Across,
    #[strum(serialize = "polygon_pos")]
    PolygonPos,
    Ronin,
    Omnibridge,
}

impl Bridge {
    /// The five bridges carried at reduced depth (§11): a shared `generic_*` schema keyed
    /// by this name rather than a dedicated raw-table set per protocol.
    pub fn is_generic(self) -> bool {
        matches!(
            self,
            Bridge::Cctp | Bridge::Across | Bridge::PolygonPos | Bridge::Ronin | Bridge::Omnibridge
        )
    }
}

/// Short lowercase chain names (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ChainName {
    Ethereum,
    Arbitrum,
    Polygon,
    Base,
    Optimism,
    Bnb,
    Avalanche,
    Scroll,
    Linea,
    Gnosis,
    Ronin,
    Solana,
}

/// Process-wide EVM `chainId` table (the numbers embedded on-chain, e.g. in `eth_chainId`
/// or a bridge's destination-chain-id field when the bridge uses plain EVM numbering).
pub static EVM_CHAIN_IDS: Lazy<HashMap<ChainName, u64>> = Lazy::new(|| {
    use ChainName::*;
    HashMap::from([
        (Ethereum, 1),
        (Optimism, 10),
        (Bnb, 56),
        (Gnosis, 100),
        (Polygon, 137),
        (Base, 8453),
        (Arbitrum, 42161),
        (Avalanche, 43114),
        (Linea, 59144),
        (Scroll, 534352),
        (Ronin, 2020),
    ])
});

/// Wormhole's own chain numbering, reused by Mayan for its `src_chain_id` field (§3: "a
/// second per-bridge override table exists where a bridge uses its own numbering").
pub static WORMHOLE_CHAIN_IDS: Lazy<HashMap<ChainName, u16>> = Lazy::new(|| {
    use ChainName::*;
    HashMap::from([
        (Solana, 1),
        (Ethereum, 2),
        (Bnb, 4),
        (Polygon, 5),
        (Avalanche, 6),
        (Arbitrum, 23),
        (Optimism, 24),
        (Gnosis, 25),
        (Base, 30),
    ])
});

/// LayerZero V2 endpoint ids, reused by Stargate for its `dstEid`/`srcEid` fields (the
/// bridge's own numbering, distinct from both the plain EVM and Wormhole tables).
pub static LAYERZERO_EID: Lazy<HashMap<ChainName, u32>> = Lazy::new(|| {
    use ChainName::*;
    HashMap::from([
        (Ethereum, 30101),
        (Bnb, 30102),
        (Avalanche, 30106),
        (Polygon, 30109),
        (Arbitrum, 30110),
        (Optimism, 30111),
        (Base, 30184),
        (Linea, 30183),
        (Scroll, 30214),
        (Gnosis, 30145),
    ])
});

fn reverse<K: Copy + Eq + std::hash::Hash, V: Copy + Eq + std::hash::Hash>(
    table: &HashMap<K, V>,
) -> HashMap<V, K> {
    table.iter().map(|(k, v)| (*v, *k)).collect()
}

/// `chain_id → ChainName` for plain EVM numbering. Returns `None` for an id outside the
/// user's configured chain set or not in the table (§4.4 `convert_id_to_blockchain_name`);
/// the caller treats `None` as "out-of-scope chain", dropping the event silently.
pub fn evm_chain_name(chain_id: u64) -> Option<ChainName> {
    reverse(&EVM_CHAIN_IDS).get(&chain_id).copied()
}

pub fn wormhole_chain_name(chain_id: u16) -> Option<ChainName> {
    reverse(&WORMHOLE_CHAIN_IDS).get(&chain_id).copied()
}

pub fn layerzero_chain_name(eid: u32) -> Option<ChainName> {
    reverse(&LAYERZERO_EID).get(&eid).copied()
}

/// The sentinel address representing a chain's native token in `token_metadata` (§3).
pub const NATIVE_TOKEN_SENTINEL: &str = "0x0000000000000000000000000000000000000000";

/// `{symbol, wrapped_native_contract}` per chain, grounded on `config/constants.py`'s
/// `BLOCKCHAIN_IDS` map (§4.8 `populate_native_tokens` reads `native_token_contract` and
/// `get_blockchain_native_token_symbol` from that same table). Solana has no wrapped-native
/// contract Alchemy can price, so it is intentionally absent here.
pub static NATIVE_TOKENS: Lazy<HashMap<ChainName, (&'static str, &'static str)>> = Lazy::new(|| {
    use ChainName::*;
    HashMap::from([
        (Ethereum, ("ETH", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")),
        (Arbitrum, ("ETH", "0x82af49447d8a07e3bd95bd0d56f35241523fbab1")),
        (Optimism, ("ETH", "0x4200000000000000000000000000000000000006")),
        (Base, ("ETH", "0x4200000000000000000000000000000000000006")),
        (Polygon, ("POL", "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")),
        (Bnb, ("BNB", "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c")),
        (Avalanche, ("AVAX", "0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7")),
        (Scroll, ("ETH", "0x5300000000000000000000000000000000000004")),
        (Linea, ("ETH", "0xe5d7c2a44ffddf6b295a15c148167daaaf5cf34f")),
        (Gnosis, ("XDAI", "0xe91d153e0b41518a2ce8dd3d7944fa863463a97d")),
        (Ronin, ("RON", "0xe514d9deb7966c8be0ca922de8a064264ea6bcd4")),
    ])
});

/// Looks up a chain's native-token symbol and wrapped-native contract (§4.8).
pub fn native_token_info(chain: ChainName) -> Option<(&'static str, &'static str)> {
    NATIVE_TOKENS.get(&chain).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn bridge_string_form_is_lowercase() {
        assert_eq!(Bridge::Ccip.to_string(), "ccip");
        assert_eq!(Bridge::PolygonPos.to_string(), "polygon_pos");
        assert_eq!(Bridge::from_str("debridge").unwrap(), Bridge::Debridge);
    }

    #[test]
    fn generic_bridges_are_flagged() {
        assert!(Bridge::Cctp.is_generic());
        assert!(!Bridge::Router.is_generic());
    }

    #[test]
    fn evm_chain_id_roundtrips() {
        assert_eq!(evm_chain_name(42161), Some(ChainName::Arbitrum));
        assert_eq!(evm_chain_name(999_999), None);
    }

    #[test]
    fn layerzero_eid_roundtrips() {
        assert_eq!(layerzero_chain_name(30110), Some(ChainName::Arbitrum));
        assert_eq!(layerzero_chain_name(0), None);
    }

    #[test]
    fn wormhole_chain_id_is_distinct_from_evm() {
        assert_eq!(wormhole_chain_name(23), Some(ChainName::Arbitrum));
        assert_ne!(
            *EVM_CHAIN_IDS.get(&ChainName::Arbitrum).unwrap() as u16,
            *WORMHOLE_CHAIN_IDS.get(&ChainName::Arbitrum).unwrap()
        );
    }
}
