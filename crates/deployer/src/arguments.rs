use {clap::Parser, std::path::PathBuf};

#[derive(Parser)]
pub struct Arguments {
    /// API key of the Infura project used to reach the network. Not needed
    /// when `--node-url` is given.
    #[clap(long, env, hide_env_values = true)]
    pub infura_api_key: Option<String>,

    /// Hex encoded private key of the account that deploys and owns the
    /// contracts.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Infura network name, e.g. `sepolia` or `mainnet`.
    #[clap(long, env, default_value = "sepolia")]
    pub network: String,

    /// The Ethereum node URL to connect to. Takes precedence over the Infura
    /// URL derived from `--network` and `--infura-api-key`.
    #[clap(long, env, hide_env_values = true)]
    pub node_url: Option<String>,

    /// Directory containing the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// File the encryption public key of the deploying account is written to.
    #[clap(long, env, default_value = "encryption-public-key.txt")]
    pub encryption_public_key_path: PathBuf,

    /// File the address of the deployed ContractRegistry is written to.
    #[clap(long, env, default_value = "contract-registry-address.txt")]
    pub registry_address_path: PathBuf,

    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = |value: &Option<String>| if value.is_some() { "SECRET" } else { "None" };
        writeln!(f, "infura_api_key: {}", secret(&self.infura_api_key))?;
        writeln!(f, "private_key: {}", secret(&self.private_key))?;
        writeln!(f, "network: {}", self.network)?;
        writeln!(f, "node_url: {}", secret(&self.node_url))?;
        writeln!(f, "artifacts_dir: {:?}", self.artifacts_dir)?;
        writeln!(
            f,
            "encryption_public_key_path: {:?}",
            self.encryption_public_key_path
        )?;
        writeln!(f, "registry_address_path: {:?}", self.registry_address_path)?;
        writeln!(f, "log_filter: {}", self.log_filter)?;
        Ok(())
    }
}
