use alloy::providers::DynProvider;

// Generate the bindings in a private module. That allows us to re-export all
// items in our own module while also adding some items ourselves.
mod private {
    alloy::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        interface ContractRegistry {
            function addContract(string key, address contractAddress) external;
        }
    );
}

#[allow(non_snake_case)]
pub mod ContractRegistry {
    pub use super::private::ContractRegistry::*;

    pub type Instance = ContractRegistryInstance<super::DynProvider>;
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{Address, keccak256},
            sol_types::SolCall,
        },
    };

    #[test]
    fn add_contract_call_data() {
        assert_eq!(
            ContractRegistry::addContractCall::SIGNATURE,
            "addContract(string,address)"
        );
        assert_eq!(
            ContractRegistry::addContractCall::SELECTOR,
            keccak256("addContract(string,address)")[..4]
        );

        let contract = Address::repeat_byte(0x42);
        let call = ContractRegistry::addContractCall {
            key: "policy".to_owned(),
            contractAddress: contract,
        };
        let data = call.abi_encode();

        // selector, string offset, address, string length, string data
        assert_eq!(data.len(), 4 + 32 * 4);
        assert_eq!(&data[4 + 32 + 12..4 + 64], contract.as_slice());
        assert_eq!(data[4 + 64 + 31], 6);
        assert_eq!(&data[4 + 96..4 + 96 + 6], b"policy");

        let decoded = ContractRegistry::addContractCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.key, "policy");
        assert_eq!(decoded.contractAddress, contract);
    }
}
