//! UUPS upgrades of proxied deployments.

use alloy_core::primitives::{Address, B256, Bytes};
use anyhow::Result;

use crate::{
    abi::IUUPSUpgradeable,
    client::{ContractClient, write},
    deployer::ContractDeployer,
    store::{DeploymentStore, implementation_name},
};

/// Point proxy `target` at the recorded `<target>_Implementation`.
pub async fn upgrade(
    client: &impl ContractClient,
    store: &impl DeploymentStore,
    target: &str,
) -> Result<B256> {
    let proxy = store.get(target)?;
    let implementation = store.get(&implementation_name(target))?;

    if proxy.implementation == Some(implementation.address) {
        tracing::warn!(
            target_contract = target,
            implementation = %implementation.address,
            "Proxy record already points at this implementation"
        );
    }

    let tx_hash = write(
        client,
        proxy.address,
        IUUPSUpgradeable::upgradeToAndCallCall {
            newImplementation: implementation.address,
            data: Bytes::new(),
        },
    )
    .await?;

    tracing::info!(
        target_contract = target,
        proxy = %proxy.address,
        implementation = %implementation.address,
        %tx_hash,
        "Upgrade tx sent"
    );

    Ok(tx_hash)
}

/// Deploy a new implementation of proxy `target` with the constructor args
/// recorded for it, replacing `<target>_Implementation`.
pub async fn deploy_implementation(
    contracts: &impl ContractDeployer,
    store: &impl DeploymentStore,
    target: &str,
) -> Result<Address> {
    let proxy = store.get(target)?;
    if proxy.implementation.is_none() {
        anyhow::bail!("{} is not deployed behind a proxy", target);
    }

    let address = contracts.deploy_implementation(target, proxy.args).await?;
    tracing::info!(
        target_contract = target,
        %address,
        "New implementation deployed, run upgrade to activate it"
    );

    Ok(address)
}

#[cfg(test)]
mod tests {
    use alloy_core::{primitives::address, sol_types::SolCall};

    use super::*;
    use crate::{
        DeployError, deploy_args,
        store::DeploymentRecord,
        testing::{MemoryStore, MockContracts, RecordingDeployer},
    };

    const SIGNER: Address = address!("0x00000000000000000000000000000000000000de");
    const PROXY: Address = address!("0x00000000000000000000000000000000000000a1");
    const IMPLEMENTATION: Address = address!("0x00000000000000000000000000000000000000a2");

    fn proxied_vault() -> MemoryStore {
        let store = MemoryStore::default().with("LiquidityVault_Implementation", IMPLEMENTATION);
        let mut record = DeploymentRecord::new(PROXY, deploy_args![Address::ZERO, 100u64]);
        record.implementation = Some(address!("0x00000000000000000000000000000000000000a0"));
        store.save("LiquidityVault", &record).unwrap();
        store
    }

    #[tokio::test]
    async fn test_upgrade_calls_proxy() {
        let contracts = MockContracts::new(SIGNER);

        upgrade(&contracts, &proxied_vault(), "LiquidityVault")
            .await
            .unwrap();

        let writes = contracts.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, PROXY);

        let call = IUUPSUpgradeable::upgradeToAndCallCall::abi_decode(&writes[0].1, true).unwrap();
        assert_eq!(call.newImplementation, IMPLEMENTATION);
        assert!(call.data.is_empty());
    }

    #[tokio::test]
    async fn test_upgrade_without_implementation_record() {
        let store = MemoryStore::default().with("Operator", PROXY);
        let contracts = MockContracts::new(SIGNER);

        let err = upgrade(&contracts, &store, "Operator").await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<DeployError>(),
            Some(&DeployError::MissingDependency(
                "Operator_Implementation".to_string()
            ))
        );
        assert!(contracts.writes().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_implementation_reuses_recorded_args() {
        let store = proxied_vault();
        let deployer = RecordingDeployer::new(store.clone());

        let address = deploy_implementation(&deployer, &store, "LiquidityVault")
            .await
            .unwrap();

        assert_eq!(
            deployer.implementations(),
            vec![(
                "LiquidityVault".to_string(),
                deploy_args![Address::ZERO, 100u64]
            )]
        );
        assert_eq!(
            store.address_of("LiquidityVault_Implementation").unwrap(),
            address
        );
    }

    #[tokio::test]
    async fn test_deploy_implementation_rejects_plain_contract() {
        let store = MemoryStore::default().with("Rebalancer", PROXY);
        let deployer = RecordingDeployer::new(store.clone());

        assert!(
            deploy_implementation(&deployer, &store, "Rebalancer")
                .await
                .is_err()
        );
        assert!(deployer.implementations().is_empty());
    }
}
