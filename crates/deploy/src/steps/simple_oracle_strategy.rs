//! Oracle-driven strategy feeding the rebalancer.

use alloy_core::primitives::Address;
use anyhow::Result;

use super::{DATASTREAM_ORACLE, Plan, rebalancer};
use crate::{
    DeployError, DeployRequest, ProxyOptions,
    chains::Chain,
    deploy_args,
    registry::{BOOK_MANAGER, SAFE_WALLET},
    store::DeploymentStore,
};

pub const NAME: &str = "SimpleOracleStrategy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrategyOwner {
    Deployer,
    Safe,
}

fn classify(chain_id: u64) -> Option<StrategyOwner> {
    match Chain::from_id(chain_id)? {
        Chain::ArbitrumSepolia => Some(StrategyOwner::Deployer),
        Chain::Base => Some(StrategyOwner::Safe),
        _ => None,
    }
}

/// The Rebalancer record is resolved before the chain is classified.
pub fn plan(chain_id: u64, deployer: Address, store: &impl DeploymentStore) -> Result<Plan> {
    let rebalancer = store.address_of(rebalancer::NAME)?;

    let owner = match classify(chain_id) {
        Some(StrategyOwner::Deployer) => deployer,
        Some(StrategyOwner::Safe) => SAFE_WALLET.require(chain_id)?,
        None => {
            return Err(DeployError::UnsupportedChain {
                contract: NAME,
                chain_id,
            }
            .into());
        }
    };
    let oracle = store.address_of(DATASTREAM_ORACLE)?;

    Ok(Plan {
        owner,
        request: DeployRequest::new(
            NAME,
            deploy_args![oracle, rebalancer, BOOK_MANAGER.require(chain_id)?],
        )
        .with_proxy(ProxyOptions::uups_initialize(deploy_args![owner])),
    })
}
