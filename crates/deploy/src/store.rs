//! Persisted deployment records.
//!
//! The on-disk layout follows hardhat-deploy: one JSON file per contract under
//! `<root>/<network>/<Name>.json`, plus a `.chainId` file recording which chain
//! the directory belongs to.

use std::path::{Path, PathBuf};

use alloy_core::primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{DeployArgs, DeployError};

/// Name of the file holding the chain ID of a deployments directory.
pub const CHAIN_ID_FILENAME: &str = ".chainId";

/// Evidence that a contract has been deployed on a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub args: DeployArgs,
    /// Implementation behind a proxy record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub abi: serde_json::Value,
    /// Unix timestamp of the deployment.
    #[serde(default)]
    pub deployed_at: i64,
}

impl DeploymentRecord {
    pub fn new(address: Address, args: DeployArgs) -> Self {
        Self {
            address,
            transaction_hash: None,
            args,
            implementation: None,
            abi: serde_json::Value::Null,
            deployed_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Name of the record holding the implementation behind proxy `name`.
pub fn implementation_name(name: &str) -> String {
    format!("{name}_Implementation")
}

/// Query and persistence interface for deployment records.
pub trait DeploymentStore {
    fn get_or_null(&self, name: &str) -> Result<Option<DeploymentRecord>>;

    fn save(&self, name: &str, record: &DeploymentRecord) -> Result<()>;

    /// Fetch a record that must exist.
    fn get(&self, name: &str) -> Result<DeploymentRecord> {
        self.get_or_null(name)?
            .ok_or_else(|| DeployError::MissingDependency(name.to_string()).into())
    }

    /// Address of a record that must exist.
    fn address_of(&self, name: &str) -> Result<Address> {
        Ok(self.get(name)?.address)
    }
}

/// Deployment records stored as JSON files.
#[derive(Debug, Clone)]
pub struct FileDeploymentStore {
    dir: PathBuf,
}

impl FileDeploymentStore {
    /// Open (creating if needed) the deployments directory of `network`.
    ///
    /// Fails with [`DeployError::ChainMismatch`] when the directory was created
    /// for a different chain.
    pub fn open(root: &Path, network: &str, chain_id: u64) -> Result<Self> {
        let dir = root.join(network);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create deployments directory {}", dir.display()))?;

        let chain_id_path = dir.join(CHAIN_ID_FILENAME);
        if chain_id_path.exists() {
            let content = std::fs::read_to_string(&chain_id_path)
                .with_context(|| format!("Failed to read {}", chain_id_path.display()))?;
            let recorded: u64 = content
                .trim()
                .parse()
                .with_context(|| format!("Invalid chain id in {}", chain_id_path.display()))?;
            if recorded != chain_id {
                return Err(DeployError::ChainMismatch {
                    recorded,
                    connected: chain_id,
                }
                .into());
            }
        } else {
            std::fs::write(&chain_id_path, chain_id.to_string())
                .with_context(|| format!("Failed to write {}", chain_id_path.display()))?;
        }

        tracing::debug!(dir = %dir.display(), chain_id, "Deployments directory opened");

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl DeploymentStore for FileDeploymentStore {
    fn get_or_null(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        let path = self.record_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let record = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deployment record {}", path.display()))?;
        Ok(Some(record))
    }

    fn save(&self, name: &str, record: &DeploymentRecord) -> Result<()> {
        let path = self.record_path(name);
        let json = serde_json::to_string_pretty(record)
            .context("Failed to serialize deployment record")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(name, address = %record.address, path = %path.display(), "Deployment saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_core::primitives::address;
    use tempdir::TempDir;

    use super::*;
    use crate::deploy_args;

    #[test]
    fn test_missing_record_is_none() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();

        assert!(store.get_or_null("Operator").unwrap().is_none());
    }

    #[test]
    fn test_get_missing_is_missing_dependency() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();

        let err = store.get("LiquidityVault").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeployError>(),
            Some(&DeployError::MissingDependency("LiquidityVault".to_string()))
        );
    }

    #[test]
    fn test_save_then_get() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();
        let vault = address!("0x1000000000000000000000000000000000000001");
        let mut record = DeploymentRecord::new(vault, deploy_args![Address::ZERO, 100u64]);
        record.implementation = Some(address!("0x2000000000000000000000000000000000000002"));

        store.save("LiquidityVault", &record).unwrap();

        assert_eq!(store.get("LiquidityVault").unwrap(), record);
        assert_eq!(store.address_of("LiquidityVault").unwrap(), vault);
        assert!(store.dir().join("LiquidityVault.json").exists());
    }

    #[test]
    fn test_reads_minimal_hardhat_record() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();
        std::fs::write(
            store.dir().join("DatastreamOracle.json"),
            r#"{ "address": "0x3000000000000000000000000000000000000003", "abi": [] }"#,
        )
        .unwrap();

        assert_eq!(
            store.address_of("DatastreamOracle").unwrap(),
            address!("0x3000000000000000000000000000000000000003")
        );
    }

    #[test]
    fn test_reads_hardhat_record_with_args() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();
        std::fs::write(
            store.dir().join("LiquidityVault.json"),
            r#"{
                "address": "0x1000000000000000000000000000000000000001",
                "abi": [],
                "transactionHash": "0x00000000000000000000000000000000000000000000000000000000000000aa",
                "receipt": { "status": 1, "blockNumber": 123 },
                "args": [
                    "0x382CCccbD3b142D7DA063bF68cd0c89634767F76",
                    "100",
                    "Clober Liquidity Vault",
                    "CLV"
                ],
                "numDeployments": 1,
                "implementation": "0x2000000000000000000000000000000000000002",
                "execute": { "methodName": "initialize", "args": ["0xfb976Bae0b3Ef71843F1c6c63da7Df2e44B3836d"] }
            }"#,
        )
        .unwrap();

        let record = store.get("LiquidityVault").unwrap();

        assert_eq!(record.address, address!("0x1000000000000000000000000000000000000001"));
        assert_eq!(
            record.implementation,
            Some(address!("0x2000000000000000000000000000000000000002"))
        );
        assert_eq!(
            record.args,
            deploy_args![
                address!("0x382CCccbD3b142D7DA063bF68cd0c89634767F76"),
                100u64,
                "Clober Liquidity Vault",
                "CLV",
            ]
        );
        // Re-encodes to the same constructor arguments hardhat-deploy sent.
        assert_eq!(record.args.abi_encode().len(), 32 * 8);
    }

    #[test]
    fn test_datastream_record_written_elsewhere() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();
        std::fs::write(
            store.dir().join("DatastreamOracle.json"),
            r#"{
                "address": "0x3000000000000000000000000000000000000003",
                "abi": [],
                "args": [
                    "0xAA9575d63dFC224b9583fC303dB3188C08d5C85A",
                    { "type": "BigNumber", "hex": "0x64" },
                    86400
                ],
                "numDeployments": 2
            }"#,
        )
        .unwrap();

        assert_eq!(
            store.address_of("DatastreamOracle").unwrap(),
            address!("0x3000000000000000000000000000000000000003")
        );
    }

    #[test]
    fn test_saved_record_keeps_hardhat_args_shape() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        let store = FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();
        store
            .save(
                "Rebalancer",
                &DeploymentRecord::new(Address::ZERO, deploy_args![Address::ZERO, 5u64]),
            )
            .unwrap();

        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(store.dir().join("Rebalancer.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            raw["args"],
            serde_json::json!(["0x0000000000000000000000000000000000000000", "5"])
        );
    }

    #[test]
    fn test_chain_mismatch() {
        let temp_dir = TempDir::new("clv-test").expect("Failed to create temp dir");
        FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();

        // Reopening for the same chain is fine.
        FileDeploymentStore::open(temp_dir.path(), "base", 8453).unwrap();

        let err = FileDeploymentStore::open(temp_dir.path(), "base", 146).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeployError>(),
            Some(&DeployError::ChainMismatch {
                recorded: 8453,
                connected: 146,
            })
        );
    }

    #[test]
    fn test_implementation_name() {
        assert_eq!(implementation_name("Operator"), "Operator_Implementation");
    }
}
