//! The liquidity vault, deployed behind a UUPS proxy.

use alloy_core::primitives::Address;
use anyhow::Result;

use super::Plan;
use crate::{
    DeployError, DeployRequest, ProxyOptions,
    chains::Chain,
    deploy_args,
    registry::{BOOK_MANAGER, SAFE_WALLET},
};

pub const NAME: &str = "LiquidityVault";

const RATE: u64 = 100;
const TOKEN_NAME: &str = "Clober Liquidity Vault";
const TOKEN_SYMBOL: &str = "CLV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VaultOwner {
    Deployer,
    Safe,
}

fn classify(chain_id: u64) -> Option<VaultOwner> {
    let chain = Chain::from_id(chain_id)?;
    if chain.is_testnet() || chain.is_development() {
        return Some(VaultOwner::Deployer);
    }
    match chain {
        Chain::Arbitrum | Chain::Base => Some(VaultOwner::Safe),
        _ => None,
    }
}

pub fn plan(chain_id: u64, deployer: Address) -> Result<Plan> {
    let owner = match classify(chain_id) {
        Some(VaultOwner::Deployer) => deployer,
        Some(VaultOwner::Safe) => SAFE_WALLET.require(chain_id)?,
        None => {
            return Err(DeployError::UnsupportedChain {
                contract: NAME,
                chain_id,
            }
            .into());
        }
    };

    let args = deploy_args![
        BOOK_MANAGER.require(chain_id)?,
        RATE,
        TOKEN_NAME,
        TOKEN_SYMBOL,
    ];

    Ok(Plan {
        owner,
        request: DeployRequest::new(NAME, args)
            .with_proxy(ProxyOptions::uups_initialize(deploy_args![owner])),
    })
}

#[cfg(test)]
mod tests {
    use alloy_core::primitives::address;

    use super::*;
    use crate::chains::ids::{ARBITRUM, BASE, HARDHAT, MONAD_TESTNET, SONIC};

    const DEPLOYER: Address = address!("0x00000000000000000000000000000000000000de");

    #[test]
    fn test_base_is_owned_by_safe() {
        let plan = plan(BASE, DEPLOYER).unwrap();

        let safe = address!("0xfb976Bae0b3Ef71843F1c6c63da7Df2e44B3836d");
        assert_eq!(plan.owner, safe);
        assert_eq!(
            plan.request.args,
            deploy_args![
                address!("0x382CCccbD3b142D7DA063bF68cd0c89634767F76"),
                100u64,
                "Clober Liquidity Vault",
                "CLV",
            ]
        );
        assert_eq!(
            plan.request.proxy,
            Some(ProxyOptions::uups_initialize(deploy_args![safe]))
        );
    }

    #[test]
    fn test_testnet_is_owned_by_deployer() {
        let plan = plan(MONAD_TESTNET, DEPLOYER).unwrap();
        assert_eq!(plan.owner, DEPLOYER);
    }

    #[test]
    fn test_arbitrum_has_no_book_manager() {
        let err = plan(ARBITRUM, DEPLOYER).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeployError>(),
            Some(&DeployError::MissingChainConfig {
                table: "book manager",
                chain_id: ARBITRUM,
            })
        );
    }

    #[test]
    fn test_hardhat_has_no_book_manager() {
        assert!(plan(HARDHAT, DEPLOYER).is_err());
    }

    #[test]
    fn test_sonic_is_unsupported() {
        let err = plan(SONIC, DEPLOYER).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeployError>(),
            Some(&DeployError::UnsupportedChain {
                contract: "LiquidityVault",
                chain_id: SONIC,
            })
        );
    }
}
