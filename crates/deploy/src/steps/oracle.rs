//! Chainlink price oracle with L2 sequencer uptime checks.

use alloy_core::primitives::Address;
use anyhow::Result;

use super::Plan;
use crate::{
    DeployError, DeployRequest,
    chains::Chain,
    deploy_args,
    registry::{CHAINLINK_SEQUENCER_ORACLE, ORACLE_TIMEOUT, SAFE_WALLET, SEQUENCER_GRACE_PERIOD},
};

pub const NAME: &str = "ChainlinkOracle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OracleChain {
    /// Prices come from the separately deployed DatastreamOracle.
    Datastream,
    /// Owned by the chain's Safe.
    Safe,
    Deployer,
}

fn classify(chain_id: u64) -> Option<OracleChain> {
    match Chain::from_id(chain_id)? {
        Chain::Base => Some(OracleChain::Datastream),
        Chain::Sonic => Some(OracleChain::Safe),
        Chain::MonadTestnet | Chain::RiseTestnet | Chain::ArbitrumSepolia => {
            Some(OracleChain::Deployer)
        }
        Chain::Sepolia | Chain::Arbitrum | Chain::BerachainTestnet | Chain::Hardhat => None,
    }
}

pub fn plan(chain_id: u64, deployer: Address) -> Result<Option<Plan>> {
    let owner = match classify(chain_id) {
        Some(OracleChain::Datastream) => return Ok(None),
        Some(OracleChain::Safe) => SAFE_WALLET.require(chain_id)?,
        Some(OracleChain::Deployer) => deployer,
        None => {
            return Err(DeployError::UnsupportedChain {
                contract: NAME,
                chain_id,
            }
            .into());
        }
    };

    let args = deploy_args![
        CHAINLINK_SEQUENCER_ORACLE.require(chain_id)?,
        ORACLE_TIMEOUT.require(chain_id)?,
        SEQUENCER_GRACE_PERIOD.require(chain_id)?,
        owner,
    ];

    Ok(Some(Plan {
        owner,
        request: DeployRequest::new(NAME, args),
    }))
}
