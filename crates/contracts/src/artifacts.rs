//! Loading of compiled contracts.
//!
//! Contracts are compiled by an external toolchain. Hardhat writes one JSON
//! artifact per contract to `artifacts/contracts/<Name>.sol/<Name>.json`
//! with the creation code as a hex string, Foundry writes them to
//! `out/<Name>.sol/<Name>.json` with the code nested under `object`. Both
//! layouts and flat `<dir>/<Name>.json` files are understood here.

use {
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        json_abi::JsonAbi,
        primitives::Bytes,
    },
    serde::Deserialize,
    std::path::PathBuf,
};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for contract {name} (searched {searched:?})")]
    NotFound { name: String, searched: Vec<PathBuf> },
    #[error("failed to read artifact {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path:?}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact for contract {0} has no creation code, is it abstract?")]
    EmptyBytecode(String),
    #[error("contract {name} takes {expected} constructor arguments but {actual} were given")]
    ConstructorArity {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid constructor arguments for contract {name}")]
    ConstructorArguments {
        name: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
}

/// A compiled contract ready to be deployed.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    /// Returns the data of a contract creation transaction: the creation code
    /// followed by the ABI encoded constructor arguments.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        let encoded_args = match self.abi.constructor() {
            Some(constructor) => {
                if constructor.inputs.len() != args.len() {
                    return Err(ArtifactError::ConstructorArity {
                        name: self.contract_name.clone(),
                        expected: constructor.inputs.len(),
                        actual: args.len(),
                    });
                }
                constructor.abi_encode_input(args).map_err(|source| {
                    ArtifactError::ConstructorArguments {
                        name: self.contract_name.clone(),
                        source,
                    }
                })?
            }
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(ArtifactError::ConstructorArity {
                    name: self.contract_name.clone(),
                    expected: 0,
                    actual: args.len(),
                });
            }
        };

        let mut code = Vec::with_capacity(self.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&encoded_args);
        Ok(code.into())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hardhat(Bytes),
    Foundry { object: Bytes },
}

impl From<RawBytecode> for Bytes {
    fn from(value: RawBytecode) -> Self {
        match value {
            RawBytecode::Hardhat(bytes) | RawBytecode::Foundry { object: bytes } => bytes,
        }
    }
}

/// Directory with compiler output.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Candidate locations of a contract's artifact, most specific first.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let file = format!("{name}.json");
        let sol = format!("{name}.sol");
        vec![
            self.dir.join("contracts").join(&sol).join(&file),
            self.dir.join(&sol).join(&file),
            self.dir.join(&file),
        ]
    }

    /// Loads the artifact of the contract `name`.
    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let candidates = self.candidates(name);
        let Some(path) = candidates.iter().find(|path| path.is_file()) else {
            return Err(ArtifactError::NotFound {
                name: name.to_owned(),
                searched: candidates,
            });
        };
        tracing::debug!(?path, name, "loading artifact");

        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        let raw: RawArtifact =
            serde_json::from_str(&contents).map_err(|source| ArtifactError::Malformed {
                path: path.clone(),
                source,
            })?;

        let bytecode = Bytes::from(raw.bytecode);
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(name.to_owned()));
        }

        Ok(Artifact {
            contract_name: raw.contract_name.unwrap_or_else(|| name.to_owned()),
            abi: raw.abi,
            bytecode,
        })
    }
}
