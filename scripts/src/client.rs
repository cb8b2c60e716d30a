//! Chain clients used by the deploy scripts.
//!
//! The scripts talk to the network through the traits below so that the
//! deployment flow can run against mocked collaborators in tests.

use std::future::Future;

use alloy::{
    network::{Ethereum, TransactionBuilder},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, Bytes, TxHash, B256};
use tracing::debug;

use crate::{
    errors::ScriptError,
    solidity::IMultiClaimsHatterFactoryInstance,
    types::{DeploymentReceipt, FactoryMethod, ModuleCall},
};

/// The provider type used by the scripts
pub type Wallet = DynProvider<Ethereum>;
/// A factory instance using the default generics
pub type FactoryContract = IMultiClaimsHatterFactoryInstance<Wallet, Ethereum>;

/// Builds signer-bound handles to on-chain contracts
pub trait ChainConnector {
    /// The module factory handle type
    type Factory: ModuleFactory;
    /// The deterministic deployer handle type
    type Deployer: DeterministicDeployer;

    /// Resolve a handle to the factory deployed at the given address
    fn module_factory(
        &self,
        signer: PrivateKeySigner,
        factory_address: Address,
    ) -> impl Future<Output = Result<Self::Factory, ScriptError>>;

    /// Resolve a handle to the deterministic deployment proxy
    fn deterministic_deployer(
        &self,
        signer: PrivateKeySigner,
        proxy_address: Address,
    ) -> impl Future<Output = Result<Self::Deployer, ScriptError>>;
}

/// Waits on submitted transactions
pub trait TransactionWatcher {
    /// Block until the transaction is included, returning its receipt.
    ///
    /// No timeout is applied.
    fn confirm(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<DeploymentReceipt, ScriptError>>;
}

/// A handle to a deployed `MultiClaimsHatterFactory`
pub trait ModuleFactory: TransactionWatcher {
    /// The address of the factory
    fn address(&self) -> Address;

    /// Whether contract code exists at the factory address
    fn has_code(&self) -> impl Future<Output = Result<bool, ScriptError>>;

    /// Simulate the call, returning the address of the module it would deploy
    fn predict_module(
        &self,
        call: &ModuleCall,
    ) -> impl Future<Output = Result<Address, ScriptError>>;

    /// Submit the call, returning the transaction hash
    fn submit(&self, call: &ModuleCall) -> impl Future<Output = Result<TxHash, ScriptError>>;
}

/// A handle to a create2 deployment proxy
pub trait DeterministicDeployer: TransactionWatcher {
    /// The address of the proxy; deployed contracts derive their address from it
    fn proxy_address(&self) -> Address;

    /// The code deployed at an address, empty if none
    fn code_at(&self, address: Address) -> impl Future<Output = Result<Bytes, ScriptError>>;

    /// Submit a create2 deployment of `init_code` with `salt`, returning the
    /// transaction hash
    fn submit(
        &self,
        salt: B256,
        init_code: Bytes,
    ) -> impl Future<Output = Result<TxHash, ScriptError>>;
}

// ----------------
// | RPC Clients |
// ----------------

/// Connects to a JSON-RPC node over HTTP
#[derive(Clone, Debug)]
pub struct RpcConnector {
    /// The node's RPC URL
    rpc_url: Url,
}

impl RpcConnector {
    /// Create a connector for the given RPC URL
    pub fn new(rpc_url: &str) -> Result<Self, ScriptError> {
        let rpc_url = Url::parse(rpc_url)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        Ok(Self { rpc_url })
    }

    /// Sets up a provider which signs transactions with the given signer
    fn setup_client(&self, signer: PrivateKeySigner) -> Wallet {
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .with_simple_nonce_management()
            .connect_http(self.rpc_url.clone());
        DynProvider::new(provider)
    }
}

impl ChainConnector for RpcConnector {
    type Factory = RpcModuleFactory;
    type Deployer = RpcDeterministicDeployer;

    async fn module_factory(
        &self,
        signer: PrivateKeySigner,
        factory_address: Address,
    ) -> Result<RpcModuleFactory, ScriptError> {
        let sender = signer.address();
        let provider = self.setup_client(signer);
        let contract = IMultiClaimsHatterFactoryInstance::new(factory_address, provider.clone());

        Ok(RpcModuleFactory {
            provider,
            contract,
            sender,
        })
    }

    async fn deterministic_deployer(
        &self,
        signer: PrivateKeySigner,
        proxy_address: Address,
    ) -> Result<RpcDeterministicDeployer, ScriptError> {
        let sender = signer.address();
        let provider = self.setup_client(signer);

        Ok(RpcDeterministicDeployer {
            provider,
            proxy_address,
            sender,
        })
    }
}

/// Wait for a transaction's receipt on the given provider
async fn wait_for_receipt(
    provider: &Wallet,
    tx_hash: TxHash,
) -> Result<DeploymentReceipt, ScriptError> {
    let receipt = PendingTransactionBuilder::new(provider.root().clone(), tx_hash)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    debug!(receipt = ?receipt, "received transaction receipt");
    Ok(DeploymentReceipt::from(&receipt))
}

/// A factory handle backed by an RPC provider
#[derive(Clone)]
pub struct RpcModuleFactory {
    /// The signing provider
    provider: Wallet,
    /// The factory contract bindings
    contract: FactoryContract,
    /// The address of the deployer
    sender: Address,
}

impl TransactionWatcher for RpcModuleFactory {
    async fn confirm(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, ScriptError> {
        wait_for_receipt(&self.provider, tx_hash).await
    }
}

impl ModuleFactory for RpcModuleFactory {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn has_code(&self) -> Result<bool, ScriptError> {
        let code = self
            .provider
            .get_code_at(self.address())
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(!code.is_empty())
    }

    async fn predict_module(&self, call: &ModuleCall) -> Result<Address, ScriptError> {
        let ModuleCall {
            method,
            hat_id,
            hats,
            init_data,
            salt_nonce,
        } = call.clone();
        let res = match method {
            FactoryMethod::DeployMultiClaimsHatter => {
                self.contract
                    .deployMultiClaimsHatter(hat_id, hats, init_data, salt_nonce)
                    .from(self.sender)
                    .call()
                    .await
            }
            FactoryMethod::DeployModule => {
                self.contract
                    .deployModule(hat_id, hats, init_data, salt_nonce)
                    .from(self.sender)
                    .call()
                    .await
            }
        };

        res.map_err(|e| {
            ScriptError::ContractInteraction(format!("simulating {method}: {e}"))
        })
    }

    async fn submit(&self, call: &ModuleCall) -> Result<TxHash, ScriptError> {
        let ModuleCall {
            method,
            hat_id,
            hats,
            init_data,
            salt_nonce,
        } = call.clone();
        let pending_tx = match method {
            FactoryMethod::DeployMultiClaimsHatter => {
                self.contract
                    .deployMultiClaimsHatter(hat_id, hats, init_data, salt_nonce)
                    .send()
                    .await
            }
            FactoryMethod::DeployModule => {
                self.contract
                    .deployModule(hat_id, hats, init_data, salt_nonce)
                    .send()
                    .await
            }
        }
        .map_err(|e| ScriptError::ContractInteraction(format!("sending {method}: {e}")))?;

        Ok(*pending_tx.tx_hash())
    }
}

/// A create2 deployment proxy handle backed by an RPC provider
#[derive(Clone)]
pub struct RpcDeterministicDeployer {
    /// The signing provider
    provider: Wallet,
    /// The address of the deployment proxy
    proxy_address: Address,
    /// The address of the deployer
    sender: Address,
}

impl TransactionWatcher for RpcDeterministicDeployer {
    async fn confirm(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, ScriptError> {
        wait_for_receipt(&self.provider, tx_hash).await
    }
}

impl DeterministicDeployer for RpcDeterministicDeployer {
    fn proxy_address(&self) -> Address {
        self.proxy_address
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn submit(&self, salt: B256, init_code: Bytes) -> Result<TxHash, ScriptError> {
        // The proxy expects the raw salt followed by the init code, no selector
        let calldata: Bytes = [salt.as_slice(), init_code.as_ref()].concat().into();
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_to(self.proxy_address)
            .with_input(calldata);

        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(*pending_tx.tx_hash())
    }
}
