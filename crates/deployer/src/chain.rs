//! The on-chain operations a deployment needs, behind a trait so the
//! orchestration can be tested with mocks.

use {
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::Provider,
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, ensure},
    contracts::ContractRegistry,
    ethrpc::AlloyProvider,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Account that signs and pays for every transaction.
    fn deployer(&self) -> Address;

    /// Submits a contract creation transaction with `code` (creation code
    /// plus encoded constructor arguments) and waits until it is mined.
    ///
    /// Returns the address of the new contract.
    async fn deploy(&self, name: &str, code: Bytes) -> Result<Address>;

    /// Calls `addContract(key, contract)` on the registry and waits until the
    /// transaction is mined.
    async fn add_contract(&self, registry: Address, key: &str, contract: Address) -> Result<()>;
}

/// [`Chain`] backed by a node. Transactions are signed by the wallet of the
/// provider.
pub struct Onchain {
    provider: AlloyProvider,
    deployer: Address,
}

impl Onchain {
    pub fn new(provider: AlloyProvider, deployer: Address) -> Self {
        Self { provider, deployer }
    }
}

#[async_trait::async_trait]
impl Chain for Onchain {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(&self, name: &str, code: Bytes) -> Result<Address> {
        let tx = TransactionRequest::default()
            .from(self.deployer)
            .with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .with_context(|| format!("failed to submit deployment of {name}"))?;
        tracing::debug!(name, tx = ?pending.tx_hash(), "submitted contract creation");

        let receipt = pending
            .get_receipt()
            .await
            .with_context(|| format!("failed to confirm deployment of {name}"))?;
        ensure!(
            receipt.status(),
            "deployment of {name} reverted in transaction {:?}",
            receipt.transaction_hash
        );
        receipt
            .contract_address
            .with_context(|| format!("receipt for deployment of {name} has no contract address"))
    }

    async fn add_contract(&self, registry: Address, key: &str, contract: Address) -> Result<()> {
        let registry = ContractRegistry::Instance::new(registry, self.provider.clone());
        let pending = registry
            .addContract(key.to_owned(), contract)
            .from(self.deployer)
            .send()
            .await
            .with_context(|| format!("failed to submit registration of {key}"))?;
        tracing::debug!(key, tx = ?pending.tx_hash(), "submitted registration");

        let receipt = pending
            .get_receipt()
            .await
            .with_context(|| format!("failed to confirm registration of {key}"))?;
        ensure!(
            receipt.status(),
            "registration of {key} reverted in transaction {:?}",
            receipt.transaction_hash
        );
        Ok(())
    }
}
