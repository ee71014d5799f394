//! Layered settings: built-in defaults, then the TOML file, then `CLV_*` env vars.

use std::{path::PathBuf, time::Duration};

use alloy_core::primitives::{Address, B256};
use anyhow::{Context, Result};
use clv_deploy::LocalWallet;
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix of environment variables overriding settings.
const ENV_PREFIX: &str = "CLV_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Network name, also the deployments subdirectory.
    pub network: String,
    pub rpc_url: String,
    /// Sender of every transaction. Defaults to the node's first account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployer: Option<Address>,
    /// Hex private key for signing locally. Never written back out.
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
    pub deployments_dir: PathBuf,
    pub artifacts_dir: PathBuf,
    /// Pause after each administrative write.
    pub tx_delay_ms: u64,
    pub receipt_timeout_secs: u64,
    /// Accounts registered by `operator:set`.
    pub operators: Vec<Address>,
    /// Pools configured by `strategy:config`.
    pub pool_keys: Vec<B256>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: "hardhat".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            deployer: None,
            private_key: None,
            deployments_dir: PathBuf::from("deployments"),
            artifacts_dir: PathBuf::from("artifacts"),
            tx_delay_ms: 1000,
            receipt_timeout_secs: 120,
            operators: Vec::new(),
            pool_keys: Vec::new(),
        }
    }
}

impl Settings {
    /// Defaults, then `file`, then the environment.
    fn layered(file: impl Provider) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings, reading `path` if it exists.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults and environment");
        }

        Self::layered(Toml::file(path))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, network: Option<String>, rpc_url: Option<Url>) -> Self {
        if let Some(network) = network {
            self.network = network;
        }
        if let Some(rpc_url) = rpc_url {
            self.rpc_url = rpc_url.to_string();
        }
        self
    }

    /// The signing wallet, when a private key is configured.
    pub fn wallet(&self) -> Result<Option<LocalWallet>> {
        self.private_key
            .as_deref()
            .map(LocalWallet::from_private_key)
            .transpose()
    }

    pub fn rpc_url(&self) -> Result<Url> {
        Url::parse(&self.rpc_url).with_context(|| format!("Invalid rpc_url {:?}", self.rpc_url))
    }

    pub fn tx_delay(&self) -> Duration {
        Duration::from_millis(self.tx_delay_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
