//! The deploy-and-verify collaborator.

use std::future::Future;

use alloy_core::{
    hex,
    primitives::{Address, B256},
};
use anyhow::{Context, Result};

use crate::{
    DeployArgs, DeployRequest, deploy_args,
    artifacts::{Artifact, ArtifactStore},
    rpc::{RpcClient, TransactionSender},
    store::{DeploymentRecord, DeploymentStore, implementation_name},
};

/// Artifact name of the ERC-1967 proxy placed in front of UUPS implementations.
pub const PROXY_ARTIFACT: &str = "ERC1967Proxy";

/// Deploys contracts and persists their deployment records.
pub trait ContractDeployer: Sync {
    /// Deploy `request.name` (behind a proxy when requested) and record it.
    ///
    /// Re-calling with an existing record returns the recorded address without
    /// sending anything.
    fn deploy_with_verify(
        &self,
        request: DeployRequest,
    ) -> impl Future<Output = Result<Address>> + Send;

    /// Deploy a fresh implementation of `name` and overwrite its
    /// `<name>_Implementation` record.
    fn deploy_implementation(
        &self,
        name: &str,
        args: DeployArgs,
    ) -> impl Future<Output = Result<Address>> + Send;
}

/// [`ContractDeployer`] that sends creation transactions over JSON-RPC.
#[derive(Debug, Clone)]
pub struct RpcDeployer<S, T = RpcClient> {
    rpc: T,
    store: S,
    artifacts: ArtifactStore,
}

impl<S: DeploymentStore + Sync, T: TransactionSender> RpcDeployer<S, T> {
    pub fn new(rpc: T, store: S, artifacts: ArtifactStore) -> Self {
        Self {
            rpc,
            store,
            artifacts,
        }
    }

    async fn create(&self, artifact: &Artifact, args: &DeployArgs) -> Result<(Address, B256)> {
        let mut code = artifact.bytecode.to_vec();
        code.extend(args.abi_encode());

        let tx_hash = self.rpc.send_transaction(None, code.into()).await?;
        tracing::info!(contract = %artifact.contract_name, %tx_hash, "Deploying contract...");

        let receipt = self.rpc.wait_for_receipt(tx_hash).await?;
        let address = receipt
            .contract_address
            .context("Creation receipt has no contract address")?;

        tracing::info!(
            contract = %artifact.contract_name,
            %address,
            constructor_args = %hex::encode_prefixed(args.abi_encode()),
            "Contract deployed, verify on the block explorer with these constructor arguments"
        );

        Ok((address, tx_hash))
    }

    fn record(artifact: &Artifact, address: Address, tx_hash: B256, args: DeployArgs) -> DeploymentRecord {
        DeploymentRecord {
            transaction_hash: Some(tx_hash),
            abi: artifact.abi.clone(),
            ..DeploymentRecord::new(address, args)
        }
    }
}

impl<S, T> ContractDeployer for RpcDeployer<S, T>
where
    S: DeploymentStore + Sync,
    T: TransactionSender,
{
    async fn deploy_with_verify(&self, request: DeployRequest) -> Result<Address> {
        if let Some(existing) = self.store.get_or_null(&request.name)? {
            tracing::info!(name = %request.name, address = %existing.address, "Reusing existing deployment");
            return Ok(existing.address);
        }

        let artifact = self.artifacts.load(&request.name)?;

        let Some(proxy) = &request.proxy else {
            let (address, tx_hash) = self.create(&artifact, &request.args).await?;
            self.store.save(
                &request.name,
                &Self::record(&artifact, address, tx_hash, request.args),
            )?;
            return Ok(address);
        };

        let implementation_name = implementation_name(&request.name);
        let implementation = match self.store.get_or_null(&implementation_name)? {
            Some(existing) => existing.address,
            None => {
                let (address, tx_hash) = self.create(&artifact, &request.args).await?;
                self.store.save(
                    &implementation_name,
                    &Self::record(&artifact, address, tx_hash, request.args.clone()),
                )?;
                address
            }
        };

        let proxy_artifact = self.artifacts.load(PROXY_ARTIFACT)?;
        let (address, tx_hash) = self
            .create(
                &proxy_artifact,
                &deploy_args![implementation, proxy.init_calldata()],
            )
            .await
            .with_context(|| format!("Failed to deploy {} proxy", proxy.proxy_contract))?;

        tracing::info!(
            name = %request.name,
            proxy = %address,
            %implementation,
            initializer = %proxy.execute.args.signature(&proxy.execute.method_name),
            "Proxy deployed and initialized"
        );

        let record = DeploymentRecord {
            implementation: Some(implementation),
            ..Self::record(&artifact, address, tx_hash, request.args)
        };
        self.store.save(&request.name, &record)?;

        Ok(address)
    }

    async fn deploy_implementation(&self, name: &str, args: DeployArgs) -> Result<Address> {
        let artifact = self.artifacts.load(name)?;
        let (address, tx_hash) = self.create(&artifact, &args).await?;
        self.store.save(
            &implementation_name(name),
            &Self::record(&artifact, address, tx_hash, args),
        )?;
        Ok(address)
    }
}
