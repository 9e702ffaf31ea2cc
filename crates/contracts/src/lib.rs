//! Compiled contract artifacts and the Solidity bindings the deployment
//! tooling talks to.
pub mod artifacts;
pub mod registry;

pub use {
    artifacts::{Artifact, ArtifactError, Artifacts},
    registry::ContractRegistry,
};

/// Names of the contracts deployed by this project, as they appear in the
/// compiler output.
pub mod names {
    pub const CONTRACT_REGISTRY: &str = "ContractRegistry";
    pub const POLICY: &str = "Policy";
    pub const CLAIM_APPLICATION: &str = "ClaimApplication";
}
