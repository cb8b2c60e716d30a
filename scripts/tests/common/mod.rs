//! A mocked chain for exercising the deploy scripts without a node

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, B256};
use hatter_scripts::{
    artifacts::ContractArtifact,
    client::{ChainConnector, DeterministicDeployer, ModuleFactory, TransactionWatcher},
    errors::ScriptError,
    types::{DeploymentReceipt, ModuleCall},
};

/// The first default account of an Anvil node
pub const TEST_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The address the mocked factory reports for deployed modules
pub const MOCK_MODULE_ADDRESS: Address = address!("00000000000000000000000000000000000000aa");

/// The block the mocked chain includes transactions in
pub const MOCK_BLOCK_NUMBER: u64 = 42;

/// The state of the mocked chain
#[derive(Default)]
pub struct MockState {
    /// The number of contract handles resolved through the connector
    pub connections: usize,
    /// The signers contract handles were resolved with
    pub signers: Vec<Address>,
    /// Deployed code, by address
    pub code: HashMap<Address, Bytes>,
    /// Reject submissions, as a node does when gas estimation reverts
    pub reject_submission: bool,
    /// Include submitted transactions with a failed status
    pub revert_on_inclusion: bool,
    /// Module calls submitted to the factory
    pub module_calls: Vec<ModuleCall>,
    /// Module calls simulated on the factory
    pub simulated_calls: Vec<ModuleCall>,
    /// Create2 deployments submitted to the proxy
    pub create2_deployments: Vec<(B256, Bytes)>,
    /// Hashes of the transactions waited on
    pub confirmed: Vec<TxHash>,
}

/// A mocked chain, shared between the connector and the handles it creates
#[derive(Clone, Default)]
pub struct MockChain {
    /// The shared chain state
    state: Arc<Mutex<MockState>>,
}

impl MockChain {
    /// A chain on which the given addresses host contract code
    pub fn with_contracts(addresses: &[Address]) -> Self {
        let chain = Self::default();
        for addr in addresses {
            chain.deploy_code(*addr, Bytes::from_static(&[0x60, 0x80]));
        }
        chain
    }

    /// Lock the chain state
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Place code at an address
    pub fn deploy_code(&self, address: Address, code: Bytes) {
        self.state().code.insert(address, code);
    }

    /// Submit a transaction with the given calldata, returning its hash
    fn submit_tx(&self, calldata: &[u8]) -> Result<TxHash, ScriptError> {
        if self.state().reject_submission {
            return Err(ScriptError::ContractInteraction("execution reverted".to_string()));
        }
        Ok(keccak256(calldata))
    }

    /// Wait on a submitted transaction
    fn confirm_tx(&self, tx_hash: TxHash) -> DeploymentReceipt {
        let mut state = self.state();
        state.confirmed.push(tx_hash);

        DeploymentReceipt {
            transaction_hash: tx_hash,
            block_number: Some(MOCK_BLOCK_NUMBER),
            gas_used: 21_000,
            success: !state.revert_on_inclusion,
        }
    }

    /// Record a resolved contract handle
    fn connect(&self, signer: &PrivateKeySigner) {
        let mut state = self.state();
        state.connections += 1;
        state.signers.push(signer.address());
    }
}

impl ChainConnector for MockChain {
    type Factory = MockFactory;
    type Deployer = MockDeployer;

    async fn module_factory(
        &self,
        signer: PrivateKeySigner,
        factory_address: Address,
    ) -> Result<MockFactory, ScriptError> {
        self.connect(&signer);
        Ok(MockFactory {
            chain: self.clone(),
            address: factory_address,
        })
    }

    async fn deterministic_deployer(
        &self,
        signer: PrivateKeySigner,
        proxy_address: Address,
    ) -> Result<MockDeployer, ScriptError> {
        self.connect(&signer);
        Ok(MockDeployer {
            chain: self.clone(),
            proxy_address,
        })
    }
}

/// A mocked factory handle
pub struct MockFactory {
    /// The chain the factory lives on
    chain: MockChain,
    /// The factory address
    address: Address,
}

impl TransactionWatcher for MockFactory {
    async fn confirm(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, ScriptError> {
        Ok(self.chain.confirm_tx(tx_hash))
    }
}

impl ModuleFactory for MockFactory {
    fn address(&self) -> Address {
        self.address
    }

    async fn has_code(&self) -> Result<bool, ScriptError> {
        Ok(self.chain.state().code.contains_key(&self.address))
    }

    async fn predict_module(&self, call: &ModuleCall) -> Result<Address, ScriptError> {
        self.chain.state().simulated_calls.push(call.clone());
        Ok(MOCK_MODULE_ADDRESS)
    }

    async fn submit(&self, call: &ModuleCall) -> Result<TxHash, ScriptError> {
        let tx_hash = self.chain.submit_tx(&call.calldata())?;
        self.chain.state().module_calls.push(call.clone());
        Ok(tx_hash)
    }
}

/// A mocked create2 deployment proxy handle
pub struct MockDeployer {
    /// The chain the proxy lives on
    chain: MockChain,
    /// The proxy address
    proxy_address: Address,
}

impl TransactionWatcher for MockDeployer {
    async fn confirm(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, ScriptError> {
        Ok(self.chain.confirm_tx(tx_hash))
    }
}

impl DeterministicDeployer for MockDeployer {
    fn proxy_address(&self) -> Address {
        self.proxy_address
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        Ok(self.chain.state().code.get(&address).cloned().unwrap_or_default())
    }

    async fn submit(&self, salt: B256, init_code: Bytes) -> Result<TxHash, ScriptError> {
        let calldata = [salt.as_slice(), init_code.as_ref()].concat();
        let tx_hash = self.chain.submit_tx(&calldata)?;

        let mut state = self.chain.state();
        state.create2_deployments.push((salt, init_code.clone()));
        if !state.revert_on_inclusion {
            let address = self.proxy_address.create2_from_code(salt, &init_code);
            state.code.insert(address, init_code);
        }
        Ok(tx_hash)
    }
}

/// A factory artifact exposing both the legacy and the renamed method
pub fn factory_artifact() -> ContractArtifact {
    ContractArtifact::from_json(
        r#"{
            "contractName": "MultiClaimsHatterFactory",
            "abi": [
                {
                    "type": "function",
                    "name": "deployMultiClaimsHatter",
                    "stateMutability": "nonpayable",
                    "inputs": [
                        { "name": "_hatId", "type": "uint256" },
                        { "name": "_hat", "type": "address" },
                        { "name": "_initData", "type": "bytes" },
                        { "name": "_saltNonce", "type": "uint256" }
                    ],
                    "outputs": [{ "name": "", "type": "address" }]
                },
                {
                    "type": "function",
                    "name": "deployModule",
                    "stateMutability": "nonpayable",
                    "inputs": [
                        { "name": "_hatId", "type": "uint256" },
                        { "name": "_hat", "type": "address" },
                        { "name": "_initData", "type": "bytes" },
                        { "name": "_saltNonce", "type": "uint256" }
                    ],
                    "outputs": [{ "name": "", "type": "address" }]
                }
            ],
            "bytecode": "0x608060405234801561001057600080fd5b50"
        }"#,
    )
    .unwrap()
}

/// A factory artifact exposing no methods
pub fn empty_artifact() -> ContractArtifact {
    ContractArtifact::from_json(
        r#"{ "contractName": "MultiClaimsHatterFactory", "abi": [], "bytecode": "0x6080" }"#,
    )
    .unwrap()
}
