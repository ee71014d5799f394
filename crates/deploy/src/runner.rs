//! Runs deployment steps in dependency order.

use std::collections::HashSet;

use anyhow::{Context, Result};
use strum::IntoEnumIterator;

use crate::{
    StepOutcome,
    client::ContractClient,
    deployer::ContractDeployer,
    steps::{DeployContext, Step},
    store::DeploymentStore,
};

/// Outcome of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Expand `tags` with their dependencies, dependencies first.
///
/// No tags selects every step. Each step appears once.
pub fn resolve_order(tags: &[Step]) -> Vec<Step> {
    fn visit(step: Step, seen: &mut HashSet<Step>, order: &mut Vec<Step>) {
        if !seen.insert(step) {
            return;
        }
        for dependency in step.dependencies() {
            visit(*dependency, seen, order);
        }
        order.push(step);
    }

    let selected: Vec<Step> = if tags.is_empty() {
        Step::iter().collect()
    } else {
        tags.to_vec()
    };

    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(selected.len());
    for step in selected {
        visit(step, &mut seen, &mut order);
    }
    order
}

/// Run the steps selected by `tags` one after another.
///
/// The first failing step aborts the run; records saved by earlier steps stay.
pub async fn run<S, D, C>(ctx: &DeployContext<'_, S, D, C>, tags: &[Step]) -> Result<Vec<StepReport>>
where
    S: DeploymentStore,
    D: ContractDeployer,
    C: ContractClient,
{
    let order = resolve_order(tags);
    tracing::info!(
        chain_id = ctx.chain_id,
        deployer = %ctx.deployer,
        steps = ?order,
        "Running deployment"
    );

    let mut reports = Vec::with_capacity(order.len());
    for step in order {
        let outcome = step
            .deploy(ctx)
            .await
            .with_context(|| format!("Deployment step {step} failed"))?;
        reports.push(StepReport { step, outcome });
    }

    tracing::info!("Deployment complete");
    Ok(reports)
}
