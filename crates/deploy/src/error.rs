//! Typed failures surfaced by deployment steps and tasks.
//!
//! Everything else (RPC transport, file IO, JSON decoding) travels as an
//! [`anyhow::Error`] with context. These variants exist so callers can tell the
//! fail-closed cases apart with `err.downcast_ref::<DeployError>()`.

use alloy_core::primitives::B256;

/// Deployment and task errors that callers may want to match on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    /// The chain is not part of the step's classification.
    #[error("Unknown chain {chain_id} for {contract}")]
    UnsupportedChain {
        contract: &'static str,
        chain_id: u64,
    },

    /// A registry table has no entry for the chain.
    #[error("No {table} configured for chain {chain_id}")]
    MissingChainConfig { table: &'static str, chain_id: u64 },

    /// A step needs a deployment record that does not exist yet.
    #[error("No deployment found for {0}")]
    MissingDependency(String),

    /// The transaction was mined but reverted.
    #[error("Transaction {0} reverted")]
    TransactionFailed(B256),

    /// The deployments directory was written for another chain.
    #[error("Deployments directory belongs to chain {recorded}, connected to chain {connected}")]
    ChainMismatch { recorded: u64, connected: u64 },

    /// No compiled artifact for the contract.
    #[error("No artifact found for {0}")]
    MissingArtifact(String),
}
