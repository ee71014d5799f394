//! Contract deployment steps.
//!
//! Every step follows the same shape:
//! - return early when a record for the contract already exists
//! - classify the chain into the step's own category enum
//! - build the constructor args and proxy initializer for that category
//! - hand the request to the [`ContractDeployer`]
//!
//! The per-step modules only implement the classification and request
//! building (`plan`); [`Step::deploy`] drives the shared flow.

pub mod liquidity_vault;
pub mod operator;
pub mod oracle;
pub mod rebalancer;
pub mod simple_oracle_strategy;

use alloy_core::primitives::Address;
use anyhow::Result;

use crate::{
    DeployRequest, StepOutcome, client::ContractClient, deployer::ContractDeployer,
    store::DeploymentStore,
};

/// Deployed outside this tool; only ever looked up.
pub const DATASTREAM_ORACLE: &str = "DatastreamOracle";

/// Everything a step needs to run against one network.
pub struct DeployContext<'a, S, D, C> {
    pub chain_id: u64,
    /// Account the deployment transactions come from.
    pub deployer: Address,
    pub store: &'a S,
    pub contracts: &'a D,
    pub client: &'a C,
}

impl<'a, S, D, C> DeployContext<'a, S, D, C>
where
    C: ContractClient,
{
    /// Context whose deployer is the client's signer.
    pub fn new(chain_id: u64, store: &'a S, contracts: &'a D, client: &'a C) -> Self {
        Self {
            chain_id,
            deployer: client.signer(),
            store,
            contracts,
            client,
        }
    }
}

/// A resolved deployment: who will own the contract and what to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub owner: Address,
    pub request: DeployRequest,
}

/// The deployable units, addressed by tag on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Step {
    Oracle,
    LiquidityVault,
    Operator,
    Rebalancer,
    SimpleOracleStrategy,
}

impl Step {
    /// Name of the deployment record the step produces.
    pub fn contract_name(&self) -> &'static str {
        match self {
            Step::Oracle => oracle::NAME,
            Step::LiquidityVault => liquidity_vault::NAME,
            Step::Operator => operator::NAME,
            Step::Rebalancer => rebalancer::NAME,
            Step::SimpleOracleStrategy => simple_oracle_strategy::NAME,
        }
    }

    /// Steps that must have run before this one.
    pub fn dependencies(&self) -> &'static [Step] {
        match self {
            Step::Oracle | Step::LiquidityVault | Step::Rebalancer => &[],
            Step::Operator => &[Step::LiquidityVault, Step::Oracle],
            Step::SimpleOracleStrategy => &[Step::Oracle, Step::Rebalancer],
        }
    }

    /// Resolve what this step would deploy on `chain_id`.
    ///
    /// `Ok(None)` means the chain uses a contract this tool does not deploy.
    pub fn plan(
        &self,
        chain_id: u64,
        deployer: Address,
        store: &impl DeploymentStore,
    ) -> Result<Option<Plan>> {
        match self {
            Step::Oracle => oracle::plan(chain_id, deployer),
            Step::LiquidityVault => liquidity_vault::plan(chain_id, deployer).map(Some),
            Step::Operator => operator::plan(chain_id, deployer, store).map(Some),
            Step::Rebalancer => rebalancer::plan(chain_id, deployer).map(Some),
            Step::SimpleOracleStrategy => {
                simple_oracle_strategy::plan(chain_id, deployer, store).map(Some)
            }
        }
    }

    /// Run the step.
    pub async fn deploy<S, D, C>(&self, ctx: &DeployContext<'_, S, D, C>) -> Result<StepOutcome>
    where
        S: DeploymentStore,
        D: ContractDeployer,
        C: ContractClient,
    {
        let name = self.contract_name();

        if let Some(existing) = ctx.store.get_or_null(name)? {
            tracing::info!(step = %self, address = %existing.address, "Already deployed, skipping");
            return Ok(StepOutcome::AlreadyDeployed(existing.address));
        }

        let Some(plan) = self.plan(ctx.chain_id, ctx.deployer, ctx.store)? else {
            tracing::info!(step = %self, chain_id = ctx.chain_id, "Not deployed on this chain");
            return Ok(StepOutcome::NotRequired);
        };

        tracing::info!(
            step = %self,
            owner = %plan.owner,
            proxied = plan.request.proxy.is_some(),
            "Deploying {}",
            name
        );

        let address = ctx.contracts.deploy_with_verify(plan.request).await?;

        // Best effort: the record is already saved and reruns skip this step.
        if let Step::Operator = self {
            if let Err(e) = operator::reconcile(ctx.client, address, plan.owner).await {
                tracing::warn!(
                    error = ?e,
                    operator = %address,
                    owner = %plan.owner,
                    "Could not register the owner as operator, run operator:set manually"
                );
            }
        }

        tracing::info!(step = %self, %address, "Deployed {}", name);
        Ok(StepOutcome::Deployed(address))
    }
}
