use std::path::PathBuf;

use alloy_core::primitives::{Address, B256};
use clap::{Parser, Subcommand};
use clv_deploy::Step;
use tracing::level_filters::LevelFilter;
use url::Url;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "Clv.toml";

#[derive(Debug, Parser)]
#[command(name = "clv")]
#[command(
    author,
    version,
    about = "Deploy and administer the Clober liquidity vault contracts"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "CLV_VERBOSITY", default_value_t = LevelFilter::INFO, global = true)]
    pub verbosity: LevelFilter,

    /// Path to the configuration file.
    ///
    /// Values from the file are overridden by `CLV_*` environment variables.
    #[arg(long, alias = "conf", env = "CLV_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Network name; deployment records live under `<deployments-dir>/<network>`.
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// JSON-RPC endpoint of the network.
    #[arg(long, alias = "rpc", global = true)]
    pub rpc_url: Option<Url>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Deploy contracts, skipping the ones already recorded.
    Deploy {
        /// Steps to run (dependencies are added automatically). Runs every step when empty.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<Step>,
    },

    /// Point a UUPS proxy at its recorded `<target>_Implementation`.
    Upgrade {
        /// Name of the proxied deployment.
        #[arg(long)]
        target: String,
    },

    /// Deploy a fresh implementation for a proxied deployment.
    DeployImplementation {
        /// Name of the proxied deployment.
        #[arg(long)]
        target: String,
    },

    /// Register operator accounts on the Operator contract.
    #[command(name = "operator:set")]
    OperatorSet {
        /// Operator to register, in addition to the configured ones.
        #[arg(long = "operator")]
        operators: Vec<Address>,
    },

    /// Write the default strategy config for unconfigured pools.
    #[command(name = "strategy:config")]
    StrategyConfig {
        /// Pool key to configure, in addition to the configured ones.
        #[arg(long = "pool-key")]
        pool_keys: Vec<B256>,
    },

    /// Print the resolved configuration.
    Config,
}
