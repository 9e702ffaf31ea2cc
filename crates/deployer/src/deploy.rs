//! Deployment of the registry and the contracts registered in it.
//!
//! A run consists of these steps, executed strictly one after another:
//! 1. export the encryption public key of the deploying account
//! 2. deploy the `ContractRegistry` and persist its address
//! 3. for every [`DeploymentTarget`], in order: deploy the contract with the
//!    registry address as its only constructor argument, then register it in
//!    the registry under its key
//!
//! The first failing step ends the run. The returned [`DeploymentError`]
//! names the step and lists the contracts that were deployed before it, so a
//! partially completed run can be inspected. Nothing is resumed; running
//! again deploys a fresh set of contracts.

use {
    crate::{chain::Chain, config::Outputs, encryption_key},
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256},
    },
    anyhow::Context,
    contracts::{Artifacts, names},
    std::{fmt, sync::Arc},
};

/// A contract that is deployed after the registry and registered in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub name: String,
    pub registry_key: String,
}

impl DeploymentTarget {
    pub fn new(name: impl Into<String>, registry_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry_key: registry_key.into(),
        }
    }
}

/// The contracts of the project in deployment order.
pub fn default_targets() -> Vec<DeploymentTarget> {
    vec![
        DeploymentTarget::new(names::POLICY, "policy"),
        DeploymentTarget::new(names::CLAIM_APPLICATION, "claimApplication"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    /// Key under which the contract is registered. `None` for the registry
    /// itself.
    pub registry_key: Option<String>,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Deployment {
    pub deployer: Address,
    pub encryption_public_key: String,
    pub registry: DeployedContract,
    pub contracts: Vec<DeployedContract>,
}

/// Step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    ExportKey,
    DeployRegistry,
    PersistRegistryAddress { address: Address },
    Deploy { name: String },
    /// The contract exists on chain but is not in the registry.
    Register { name: String, address: Address },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportKey => write!(f, "exporting the encryption public key"),
            Self::DeployRegistry => write!(f, "deploying {}", names::CONTRACT_REGISTRY),
            Self::PersistRegistryAddress { address } => write!(
                f,
                "persisting the address of {} deployed at {address}",
                names::CONTRACT_REGISTRY
            ),
            Self::Deploy { name } => write!(f, "deploying {name}"),
            Self::Register { name, address } => write!(
                f,
                "registering {name} deployed at {address} in {}",
                names::CONTRACT_REGISTRY
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("deployment failed while {stage}")]
pub struct DeploymentError {
    pub stage: Stage,
    /// Contracts deployed before the failing step, in deployment order.
    pub completed: Vec<DeployedContract>,
    #[source]
    pub source: anyhow::Error,
}

impl DeploymentError {
    fn new(stage: Stage, source: anyhow::Error) -> Self {
        Self {
            stage,
            completed: Vec::new(),
            source,
        }
    }
}

pub struct Deployer {
    chain: Arc<dyn Chain>,
    artifacts: Artifacts,
    outputs: Outputs,
}

impl Deployer {
    pub fn new(chain: Arc<dyn Chain>, artifacts: Artifacts, outputs: Outputs) -> Self {
        Self {
            chain,
            artifacts,
            outputs,
        }
    }

    /// Runs all steps of a deployment. See the module documentation.
    pub async fn run(
        &self,
        private_key: &B256,
        targets: &[DeploymentTarget],
    ) -> Result<Deployment, DeploymentError> {
        let encryption_public_key =
            encryption_key::export(private_key, &self.outputs.encryption_public_key)
                .map_err(|err| DeploymentError::new(Stage::ExportKey, err))?;

        let deployer = self.chain.deployer();
        tracing::info!("Deploying contracts with the account: {deployer}");

        let registry = self.deploy_registry().await?;

        let mut contracts = Vec::with_capacity(targets.len());
        for target in targets {
            match self.deploy_dependent(target, registry.address).await {
                Ok(contract) => contracts.push(contract),
                Err(mut err) => {
                    err.completed = std::iter::once(registry)
                        .chain(contracts)
                        .collect();
                    return Err(err);
                }
            }
        }

        tracing::info!("All contracts deployed");
        Ok(Deployment {
            deployer,
            encryption_public_key,
            registry,
            contracts,
        })
    }

    /// Deploys the registry and writes its address to the configured file.
    pub async fn deploy_registry(&self) -> Result<DeployedContract, DeploymentError> {
        let name = names::CONTRACT_REGISTRY;
        let address = self
            .deploy(name, &[])
            .await
            .map_err(|err| DeploymentError::new(Stage::DeployRegistry, err))?;
        tracing::info!("{name} deployed to address: {address}");

        let contract = DeployedContract {
            name: name.to_owned(),
            address,
            registry_key: None,
        };
        let path = &self.outputs.registry_address;
        std::fs::write(path, address.to_string())
            .with_context(|| format!("failed to write registry address to {path:?}"))
            .map_err(|err| {
                let mut err = DeploymentError::new(Stage::PersistRegistryAddress { address }, err);
                err.completed = vec![contract.clone()];
                err
            })?;

        Ok(contract)
    }

    /// Deploys `target` with the registry address as constructor argument and
    /// registers it under its key.
    ///
    /// These are two separate transactions. When the registration fails the
    /// error carries the address of the already deployed contract.
    pub async fn deploy_dependent(
        &self,
        target: &DeploymentTarget,
        registry: Address,
    ) -> Result<DeployedContract, DeploymentError> {
        let name = &target.name;
        let address = self
            .deploy(name, &[DynSolValue::Address(registry)])
            .await
            .map_err(|err| DeploymentError::new(Stage::Deploy { name: name.clone() }, err))?;
        tracing::info!("{name} deployed to address: {address}");

        self.chain
            .add_contract(registry, &target.registry_key, address)
            .await
            .map_err(|err| {
                tracing::warn!(
                    %address,
                    key = %target.registry_key,
                    "{name} is deployed but not registered"
                );
                DeploymentError::new(
                    Stage::Register {
                        name: name.clone(),
                        address,
                    },
                    err,
                )
            })?;
        tracing::info!("{name} added to {}", names::CONTRACT_REGISTRY);

        Ok(DeployedContract {
            name: name.clone(),
            address,
            registry_key: Some(target.registry_key.clone()),
        })
    }

    async fn deploy(&self, name: &str, args: &[DynSolValue]) -> anyhow::Result<Address> {
        let code = self.artifacts.load(name)?.deploy_code(args)?;
        self.chain.deploy(name, code).await
    }
}
