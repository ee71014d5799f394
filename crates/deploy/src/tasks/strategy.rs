//! `strategy:config`: give unconfigured pools the default strategy config.

use alloy_core::primitives::{B256, aliases::U24};
use anyhow::Result;

use super::{Action, ItemStatus, Pacer};
use crate::{
    abi::ISimpleOracleStrategy::{self, Config},
    client::{ContractClient, read, write},
    steps::simple_oracle_strategy::NAME,
    store::DeploymentStore,
};

/// Configuration written to pools that have none yet.
pub const DEFAULT_CONFIG: Config = Config {
    referenceThreshold: U24::from_limbs([10_000]),
    rebalanceThreshold: U24::from_limbs([50_000]),
    rateA: U24::from_limbs([1_000_000]),
    rateB: U24::from_limbs([1_000_000]),
    minRateA: U24::from_limbs([3_000]),
    minRateB: U24::from_limbs([3_000]),
    priceThresholdA: U24::from_limbs([10_000]),
    priceThresholdB: U24::from_limbs([10_000]),
};

/// A pool counts as configured once its rebalance threshold is set.
fn is_configured(config: &Config) -> bool {
    !config.rebalanceThreshold.is_zero()
}

/// Write [`DEFAULT_CONFIG`] for every pool key that has no configuration.
pub async fn configure_strategies(
    client: &impl ContractClient,
    store: &impl DeploymentStore,
    pool_keys: &[B256],
    pacer: &impl Pacer,
) -> Result<Vec<ItemStatus>> {
    let strategy = store.address_of(NAME)?;

    let mut actions = Vec::with_capacity(pool_keys.len());
    for &key in pool_keys {
        let config = read(client, strategy, ISimpleOracleStrategy::getConfigCall { key })
            .await?
            ._0;
        if is_configured(&config) {
            tracing::info!(pool = %key, "Pool registered");
            actions.push(Action::Unchanged);
            continue;
        }

        let tx_hash = write(
            client,
            strategy,
            ISimpleOracleStrategy::setConfigCall {
                key,
                config: DEFAULT_CONFIG,
            },
        )
        .await?;
        tracing::info!(pool = %key, %tx_hash, "Set config for pool");
        actions.push(Action::Sent(tx_hash));
        pacer.pause().await;
    }

    let mut statuses = Vec::with_capacity(pool_keys.len());
    for (&key, action) in pool_keys.iter().zip(actions) {
        let config = read(client, strategy, ISimpleOracleStrategy::getConfigCall { key })
            .await?
            ._0;
        let confirmed = is_configured(&config);
        tracing::info!(pool = %key, registered = confirmed, "Pool status");
        statuses.push(ItemStatus {
            item: key.to_string(),
            action,
            confirmed,
        });
    }

    Ok(statuses)
}
