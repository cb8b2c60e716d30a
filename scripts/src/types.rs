//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::rpc::types::TransactionReceipt;
use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use alloy_sol_types::SolCall;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{DeploymentFailure, ScriptError},
    solidity::{deployModuleCall, deployMultiClaimsHatterCall},
};

/// The factory method used to deploy a module instance
#[derive(ValueEnum, Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FactoryMethod {
    /// The legacy `deployMultiClaimsHatter` method
    #[default]
    DeployMultiClaimsHatter,
    /// The renamed `deployModule` method
    DeployModule,
}

impl FactoryMethod {
    /// The Solidity name of the method
    pub fn name(&self) -> &'static str {
        match self {
            FactoryMethod::DeployMultiClaimsHatter => "deployMultiClaimsHatter",
            FactoryMethod::DeployModule => "deployModule",
        }
    }

    /// The canonical Solidity signature of the method
    pub fn signature(&self) -> &'static str {
        match self {
            FactoryMethod::DeployMultiClaimsHatter => deployMultiClaimsHatterCall::SIGNATURE,
            FactoryMethod::DeployModule => deployModuleCall::SIGNATURE,
        }
    }
}

impl Display for FactoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The arguments of a single module deployment call on the factory
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleCall {
    /// The factory method to invoke
    pub method: FactoryMethod,
    /// The hat the module is attached to
    pub hat_id: U256,
    /// The address of the Hats protocol contract
    pub hats: Address,
    /// The module's initialization data
    pub init_data: Bytes,
    /// The salt nonce used to derive the module address
    pub salt_nonce: U256,
}

impl ModuleCall {
    /// ABI-encode the call, selector included
    pub fn calldata(&self) -> Bytes {
        let init_data = self.init_data.clone();
        match self.method {
            FactoryMethod::DeployMultiClaimsHatter => deployMultiClaimsHatterCall::new((
                self.hat_id,
                self.hats,
                init_data,
                self.salt_nonce,
            ))
            .abi_encode()
            .into(),
            FactoryMethod::DeployModule => {
                deployModuleCall::new((self.hat_id, self.hats, init_data, self.salt_nonce))
                    .abi_encode()
                    .into()
            }
        }
    }
}

/// The stages a deployment passes through.
///
/// A failure at any stage is terminal and is reported as a
/// [`DeploymentFailure`] carrying the last stage reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeployStage {
    /// Nothing has happened yet
    Unstarted,
    /// The signer has been constructed from the private key
    SignerReady,
    /// The target contract has been resolved on-chain
    ContractResolved,
    /// The transaction has been submitted to the network
    TxSubmitted,
    /// The transaction has been confirmed
    TxConfirmed,
}

impl Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStage::Unstarted => write!(f, "unstarted"),
            DeployStage::SignerReady => write!(f, "signer-ready"),
            DeployStage::ContractResolved => write!(f, "contract-resolved"),
            DeployStage::TxSubmitted => write!(f, "tx-submitted"),
            DeployStage::TxConfirmed => write!(f, "tx-confirmed"),
        }
    }
}

/// Tracks the stage a deployment has reached
#[derive(Debug)]
pub struct StageTracker {
    /// The name of the contract being deployed, used in logs
    contract: &'static str,
    /// The current stage
    stage: DeployStage,
}

impl StageTracker {
    /// Start tracking a deployment of the given contract
    pub fn new(contract: &'static str) -> Self {
        Self {
            contract,
            stage: DeployStage::Unstarted,
        }
    }

    /// Move to the next stage. Stages only move forward.
    pub fn advance(&mut self, next: DeployStage) {
        debug_assert!(
            next > self.stage,
            "stage {next} does not follow {}",
            self.stage
        );
        info!(contract = self.contract, stage = %next, "deployment advanced");
        self.stage = next;
    }

    /// Fail the deployment at the current stage
    pub fn fail(&self, error: ScriptError) -> DeploymentFailure {
        DeploymentFailure::new(self.stage, error)
    }
}

/// The confirmed receipt of a deployment transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeploymentReceipt {
    /// The hash of the transaction
    pub transaction_hash: TxHash,
    /// The block the transaction was included in
    pub block_number: Option<u64>,
    /// The gas used by the transaction
    pub gas_used: u64,
    /// Whether the transaction executed successfully
    pub success: bool,
}

impl From<&TransactionReceipt> for DeploymentReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        }
    }
}

/// The result of a module deployment
#[derive(Clone, Debug, Serialize)]
pub struct ModuleDeploymentReport {
    /// The factory the module was deployed through
    pub factory: Address,
    /// The call made on the factory
    pub call: ModuleCall,
    /// The address of the deployed module, as returned by the factory
    pub module_address: Address,
    /// The confirmed transaction receipt
    pub receipt: DeploymentReceipt,
}

/// The result of a factory deployment
#[derive(Clone, Debug, Serialize)]
pub struct FactoryDeploymentReport {
    /// The address the factory was deployed to
    pub address: Address,
    /// The create2 salt
    pub salt: B256,
    /// The ABI-encoded constructor arguments
    pub constructor_args: Bytes,
    /// The confirmed transaction receipt
    pub receipt: DeploymentReceipt,
}
