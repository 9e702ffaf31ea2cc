pub mod arguments;
pub mod chain;
pub mod config;
pub mod deploy;
pub mod encryption_key;
#[cfg(test)]
mod test_util;

use {
    chain::Onchain,
    config::Config,
    contracts::Artifacts,
    deploy::{Deployer, Deployment, DeploymentError},
    std::{process::ExitCode, sync::Arc},
};

pub async fn main(args: arguments::Arguments) -> ExitCode {
    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{:?}", anyhow::Error::new(err));
            return ExitCode::FAILURE;
        }
    };

    report(run(config).await)
}

/// Logs the outcome of a run and maps it to the exit status of the process.
///
/// A failure is a single error event that also lists the contracts deployed
/// before it, so the addresses end up on stderr next to the cause.
fn report(result: Result<Deployment, DeploymentError>) -> ExitCode {
    match result {
        Ok(deployment) => {
            tracing::debug!(?deployment, "deployment finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let completed = err
                .completed
                .iter()
                .map(|contract| format!("{} at {}", contract.name, contract.address))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::error!(%completed, "{:?}", anyhow::Error::new(err));
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<Deployment, DeploymentError> {
    let deployer_address = config.signer.address();
    let private_key = config.signer.to_bytes();
    let provider = ethrpc::alloy::provider_with_signer(&config.node_url, "deployer", config.signer);
    let deployer = Deployer::new(
        Arc::new(Onchain::new(provider, deployer_address)),
        Artifacts::new(config.artifacts_dir),
        config.outputs,
    );
    deployer
        .run(&private_key, &deploy::default_targets())
        .await
}
