//! Vault operator, plus the post-deploy check that its owner may operate it.

use alloy_core::primitives::{Address, U256, address};
use anyhow::Result;

use super::{DATASTREAM_ORACLE, Plan, liquidity_vault};
use crate::{
    DeployError, DeployRequest, ProxyOptions,
    abi::IOperator,
    chains::Chain,
    client::{ContractClient, read, write},
    deploy_args,
    store::DeploymentStore,
};

pub const NAME: &str = "Operator";

/// Bot account operating the vault on sonic.
const SONIC_OWNER: Address = address!("0x872251F2C0cC5699c9e0C226371c4D747fDA247f");

/// 0.05 native token.
const BASE_FEE: u64 = 10u64.pow(18) / 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorChain {
    Base,
    Sonic,
    Testnet,
}

fn classify(chain_id: u64) -> Option<OperatorChain> {
    match Chain::from_id(chain_id)? {
        Chain::Base => Some(OperatorChain::Base),
        Chain::Sonic => Some(OperatorChain::Sonic),
        Chain::MonadTestnet | Chain::ArbitrumSepolia => Some(OperatorChain::Testnet),
        Chain::Sepolia
        | Chain::Arbitrum
        | Chain::BerachainTestnet
        | Chain::RiseTestnet
        | Chain::Hardhat => None,
    }
}

pub fn plan(chain_id: u64, deployer: Address, store: &impl DeploymentStore) -> Result<Plan> {
    let (owner, datastream, fee) = match classify(chain_id) {
        Some(OperatorChain::Base) => (
            deployer,
            store.address_of(DATASTREAM_ORACLE)?,
            U256::from(BASE_FEE),
        ),
        Some(OperatorChain::Sonic) => (SONIC_OWNER, Address::ZERO, U256::ZERO),
        Some(OperatorChain::Testnet) => (deployer, Address::ZERO, U256::ZERO),
        None => {
            return Err(DeployError::UnsupportedChain {
                contract: NAME,
                chain_id,
            }
            .into());
        }
    };
    let vault = store.address_of(liquidity_vault::NAME)?;

    Ok(Plan {
        owner,
        request: DeployRequest::new(NAME, deploy_args![vault, datastream])
            .with_proxy(ProxyOptions::uups_initialize(deploy_args![owner, fee])),
    })
}

/// Make sure `owner` is registered as an operator of a freshly deployed Operator.
///
/// Only the owner can register itself; when the signer is someone else the
/// missing registration is logged for manual follow-up.
pub async fn reconcile(
    client: &impl ContractClient,
    operator: Address,
    owner: Address,
) -> Result<()> {
    let registered = read(client, operator, IOperator::isOperatorCall { operator: owner })
        .await?
        ._0;
    if registered {
        tracing::debug!(%owner, "Owner already registered as operator");
        return Ok(());
    }

    let signer = client.signer();
    if signer != owner {
        tracing::info!(
            %owner,
            %signer,
            "Owner is not an operator yet, call setOperator(owner, true) from the owner account"
        );
        return Ok(());
    }

    let tx_hash = write(
        client,
        operator,
        IOperator::setOperatorCall {
            operator: owner,
            status: true,
        },
    )
    .await?;
    tracing::info!(%owner, %tx_hash, "Registered owner as operator");

    Ok(())
}
