//! clv deploys the Clober liquidity vault contracts and runs their admin tasks.

mod cli;
mod config;
mod report;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use clv_deploy::{
    ArtifactStore, Chain, DeployContext, FileDeploymentStore, FixedDelay, RpcClient, RpcDeployer,
    tasks,
};
use config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let settings = Settings::load(&cli.config)?.with_overrides(cli.network, cli.rpc_url);

    if cli.command == Command::Config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let rpc = RpcClient::connect(
        settings.rpc_url()?,
        settings.deployer,
        settings.wallet()?,
        settings.receipt_timeout(),
    )
    .await?;
    let chain_id = rpc.chain_id().await?;

    tracing::info!(
        network = %settings.network,
        chain_id,
        chain = ?Chain::from_id(chain_id),
        signer = %rpc.from(),
        local_signing = rpc.signs_locally(),
        "Connected"
    );

    let store = FileDeploymentStore::open(&settings.deployments_dir, &settings.network, chain_id)?;
    let pacer = FixedDelay(settings.tx_delay());

    match cli.command {
        Command::Deploy { tags } => {
            let deployer = RpcDeployer::new(
                rpc.clone(),
                store.clone(),
                ArtifactStore::new(&settings.artifacts_dir),
            );
            let ctx = DeployContext::new(chain_id, &store, &deployer, &rpc);
            let reports = clv_deploy::run(&ctx, &tags).await?;
            println!("{}", report::deployments(&reports));
        }
        Command::Upgrade { target } => {
            let tx_hash = tasks::upgrade(&rpc, &store, &target).await?;
            println!("Upgrade tx: {tx_hash}");
        }
        Command::DeployImplementation { target } => {
            let deployer = RpcDeployer::new(
                rpc.clone(),
                store.clone(),
                ArtifactStore::new(&settings.artifacts_dir),
            );
            let address = tasks::deploy_implementation(&deployer, &store, &target).await?;
            println!("{target}_Implementation: {address}");
        }
        Command::OperatorSet { operators } => {
            let mut all = settings.operators.clone();
            all.extend(operators);
            let statuses = tasks::set_operators(&rpc, &store, &all, &pacer).await?;
            println!("{}", report::items("Operator", &statuses));
        }
        Command::StrategyConfig { pool_keys } => {
            let mut all = settings.pool_keys.clone();
            all.extend(pool_keys);
            let statuses = tasks::configure_strategies(&rpc, &store, &all, &pacer).await?;
            println!("{}", report::items("Pool", &statuses));
        }
        // Printed before connecting.
        Command::Config => {}
    }

    Ok(())
}
