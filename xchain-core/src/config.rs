// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! RPC config YAML load/write (§6 `config/rpcs_config.yaml`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use xchain_common::{XchainError, XchainResult};

/// One `{name, contract, topics, start_block, end_block, rpcs}` group for a chain, as read
/// from `rpcs_base_config.yaml` (probe input) or written to `rpcs_config.yaml` (pool input).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRpcEntry {
    pub name: String,
    pub contract: String,
    pub topics: Vec<String>,
    pub start_block: u64,
    pub end_block: u64,
    pub rpcs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfigFile {
    pub blockchains: Vec<ChainRpcEntry>,
}

impl RpcConfigFile {
    pub fn load(path: impl AsRef<Path>) -> XchainResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| XchainError::Config(format!("reading {}: {e}", path.display())))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| XchainError::Config(format!("parsing {}: {e}", path.display())))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> XchainResult<()> {
        let path = path.as_ref();
        let serialized = serde_yaml::to_string(self)
            .map_err(|e| XchainError::Config(format!("serializing {}: {e}", path.display())))?;
        std::fs::write(path, serialized)
            .map_err(|e| XchainError::Config(format!("writing {}: {e}", path.display())))
    }

    pub fn endpoints_by_chain(&self) -> std::collections::HashMap<String, Vec<String>> {
        self.blockchains
            .iter()
            .map(|entry| (entry.name.clone(), entry.rpcs.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_yaml() {
        let config = RpcConfigFile {
            blockchains: vec![ChainRpcEntry {
                name: "ethereum".into(),
                contract: "0xabc".into(),
                topics: vec!["0x1".into()],
                start_block: 1,
                end_block: 2,
                rpcs: vec!["https://rpc.example".into()],
            }],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rpcs_config.yaml");
        config.write(&path).unwrap();
        let loaded = RpcConfigFile::load(&path).unwrap();
        assert_eq!(loaded.blockchains[0].name, "ethereum");
    }
}
