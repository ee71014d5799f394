//! Rebalancer bound to the book manager.

use alloy_core::primitives::{Address, address};
use anyhow::Result;

use super::Plan;
use crate::{
    DeployError, DeployRequest, chains::Chain, deploy_args, registry::BOOK_MANAGER,
};

pub const NAME: &str = "Rebalancer";

const ARBITRUM_OWNER: Address = address!("0xfb976Bae0b3Ef71843F1c6c63da7Df2e44B3836d");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebalancerOwner {
    Deployer,
    Arbitrum,
}

fn classify(chain_id: u64) -> Option<RebalancerOwner> {
    let chain = Chain::from_id(chain_id)?;
    if chain.is_testnet() || chain.is_development() {
        Some(RebalancerOwner::Deployer)
    } else if chain == Chain::Arbitrum {
        Some(RebalancerOwner::Arbitrum)
    } else {
        None
    }
}

pub fn plan(chain_id: u64, deployer: Address) -> Result<Plan> {
    let owner = match classify(chain_id) {
        Some(RebalancerOwner::Deployer) => deployer,
        Some(RebalancerOwner::Arbitrum) => ARBITRUM_OWNER,
        None => {
            return Err(DeployError::UnsupportedChain {
                contract: NAME,
                chain_id,
            }
            .into());
        }
    };

    Ok(Plan {
        owner,
        request: DeployRequest::new(NAME, deploy_args![BOOK_MANAGER.require(chain_id)?, owner]),
    })
}
