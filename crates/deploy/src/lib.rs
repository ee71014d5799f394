//! clv-deploy - Deployment library for the Clober liquidity vault contracts.
//!
//! This crate deploys the vault contracts (oracle, liquidity vault, operator,
//! rebalancer and strategy) on the supported networks, keeps hardhat-deploy
//! style deployment records, and runs the administrative tasks that follow a
//! deployment.

pub mod abi;
pub mod artifacts;
pub mod chains;
pub mod client;
pub mod deployer;
mod error;
pub mod registry;
pub mod rpc;
pub mod runner;
pub mod steps;
pub mod store;
pub mod tasks;
mod types;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use artifacts::{Artifact, ArtifactStore};
pub use chains::Chain;
pub use client::ContractClient;
pub use deployer::{ContractDeployer, RpcDeployer};
pub use error::DeployError;
pub use rpc::{RpcClient, TransactionSender};
pub use runner::{StepReport, resolve_order, run};
pub use steps::{DeployContext, Step};
pub use store::{DeploymentRecord, DeploymentStore, FileDeploymentStore};
pub use tasks::{Action, FixedDelay, ItemStatus, Pacer};
pub use types::{DeployArg, DeployArgs, DeployRequest, Execute, ProxyKind, ProxyOptions, StepOutcome};
pub use wallet::LocalWallet;
