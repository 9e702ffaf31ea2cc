//! Validated configuration of a deployment run.
//!
//! [`Arguments`] are what the user typed or exported, [`Config`] is what the
//! deployment actually works with. The conversion rejects incomplete setups
//! before anything touches the network or the file system.

use {
    crate::arguments::Arguments,
    alloy::signers::local::{LocalSignerError, PrivateKeySigner},
    std::path::PathBuf,
    url::Url,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no node to connect to, set INFURA_API_KEY or NODE_URL")]
    MissingNodeUrl,
    #[error("invalid node url")]
    InvalidNodeUrl(#[source] url::ParseError),
    #[error("no deployer account, set PRIVATE_KEY")]
    MissingPrivateKey,
    #[error("PRIVATE_KEY is not a valid secp256k1 private key")]
    InvalidPrivateKey(#[source] LocalSignerError),
}

/// Files written by a deployment run.
#[derive(Debug, Clone)]
pub struct Outputs {
    pub encryption_public_key: PathBuf,
    pub registry_address: PathBuf,
}

pub struct Config {
    pub node_url: Url,
    pub signer: PrivateKeySigner,
    pub artifacts_dir: PathBuf,
    pub outputs: Outputs,
}

impl TryFrom<Arguments> for Config {
    type Error = ConfigError;

    fn try_from(args: Arguments) -> Result<Self, Self::Error> {
        let node_url = node_url(
            args.node_url.as_deref(),
            &args.network,
            args.infura_api_key.as_deref(),
        )?;

        let private_key = args
            .private_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingPrivateKey)?;
        let signer = private_key
            .parse::<PrivateKeySigner>()
            .map_err(ConfigError::InvalidPrivateKey)?;

        Ok(Self {
            node_url,
            signer,
            artifacts_dir: args.artifacts_dir,
            outputs: Outputs {
                encryption_public_key: args.encryption_public_key_path,
                registry_address: args.registry_address_path,
            },
        })
    }
}

fn node_url(
    explicit: Option<&str>,
    network: &str,
    infura_api_key: Option<&str>,
) -> Result<Url, ConfigError> {
    let url = match (explicit, infura_api_key.map(str::trim)) {
        (Some(url), _) => url.to_owned(),
        (None, Some(key)) if !key.is_empty() => {
            format!("https://{network}.infura.io/v3/{key}")
        }
        _ => return Err(ConfigError::MissingNodeUrl),
    };
    url.parse().map_err(ConfigError::InvalidNodeUrl)
}
