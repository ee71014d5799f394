//! `operator:set`: register operator accounts on the deployed Operator.

use alloy_core::primitives::Address;
use anyhow::Result;

use super::{Action, ItemStatus, Pacer};
use crate::{
    abi::IOperator,
    client::{ContractClient, read, write},
    steps::operator::NAME,
    store::DeploymentStore,
};

/// Grant operator status to every address in `operators` that lacks it.
pub async fn set_operators(
    client: &impl ContractClient,
    store: &impl DeploymentStore,
    operators: &[Address],
    pacer: &impl Pacer,
) -> Result<Vec<ItemStatus>> {
    let contract = store.address_of(NAME)?;
    let owner = read(client, contract, IOperator::ownerCall {}).await?._0;
    tracing::info!(operator = %contract, %owner, "Operator owner");

    let mut actions = Vec::with_capacity(operators.len());
    for &address in operators {
        let registered = read(client, contract, IOperator::isOperatorCall { operator: address })
            .await?
            ._0;
        if registered {
            tracing::info!(%address, "Already an operator");
            actions.push(Action::Unchanged);
            continue;
        }

        let tx_hash = write(
            client,
            contract,
            IOperator::setOperatorCall {
                operator: address,
                status: true,
            },
        )
        .await?;
        tracing::info!(%address, %tx_hash, "Registered operator");
        actions.push(Action::Sent(tx_hash));
        pacer.pause().await;
    }

    let mut statuses = Vec::with_capacity(operators.len());
    for (&address, action) in operators.iter().zip(actions) {
        let confirmed = read(client, contract, IOperator::isOperatorCall { operator: address })
            .await?
            ._0;
        tracing::info!(%address, is_operator = confirmed, "Operator status");
        statuses.push(ItemStatus {
            item: address.to_string(),
            action,
            confirmed,
        });
    }

    Ok(statuses)
}
