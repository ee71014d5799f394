//! Generic read/write access to deployed contracts.

use std::future::Future;

use alloy_core::{
    primitives::{Address, B256, Bytes},
    sol_types::SolCall,
};
use anyhow::{Context, Result};

use crate::rpc::{RpcClient, TransactionSender};

/// On-chain read/write interface against deployed addresses.
pub trait ContractClient: Sync {
    /// The account write transactions are sent from.
    fn signer(&self) -> Address;

    /// Execute a read-only call and return the raw return data.
    fn call(&self, to: Address, data: Bytes) -> impl Future<Output = Result<Bytes>> + Send;

    /// Submit a transaction and wait for it to succeed.
    fn send(&self, to: Address, data: Bytes) -> impl Future<Output = Result<B256>> + Send;
}

impl ContractClient for RpcClient {
    fn signer(&self) -> Address {
        self.from()
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.eth_call(to, &data).await
    }

    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        let tx_hash = self.send_transaction(Some(to), data).await?;
        self.wait_for_receipt(tx_hash).await?;
        Ok(tx_hash)
    }
}

/// Call a view method and decode its return values.
pub async fn read<C: SolCall>(
    client: &impl ContractClient,
    to: Address,
    call: C,
) -> Result<C::Return> {
    let data = client
        .call(to, call.abi_encode().into())
        .await
        .with_context(|| format!("Failed to call {} on {}", C::SIGNATURE, to))?;

    C::abi_decode_returns(&data, true)
        .with_context(|| format!("Failed to decode {} result from {}", C::SIGNATURE, to))
}

/// Send a state-changing call, returning the transaction hash.
pub async fn write<C: SolCall>(client: &impl ContractClient, to: Address, call: C) -> Result<B256> {
    client
        .send(to, call.abi_encode().into())
        .await
        .with_context(|| format!("Failed to send {} to {}", C::SIGNATURE, to))
}
