//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::{Address, TxHash};

use crate::types::DeployStage;

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// The `PRIVATE_KEY` environment variable is not set
    MissingPrivateKey,
    /// The private key could not be parsed into a signer
    InvalidPrivateKey(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading a file from disk
    ReadFile(String),
    /// Error writing a file to disk
    WriteFile(String),
    /// Error parsing a deployment config record
    ConfigParsing(String),
    /// Error parsing a contract build artifact
    ArtifactParsing(String),
    /// Error serializing JSON output
    Serialization(String),
    /// No contract code exists at the given address
    ContractNotDeployed(Address),
    /// The contract ABI does not expose the expected method
    MissingMethod(String),
    /// Error calling a contract method or watching its transaction
    ContractInteraction(String),
    /// The transaction was mined but reverted
    TransactionReverted(TxHash),
    /// Error deploying a contract
    ContractDeployment(String),
    /// A contract already exists at the deterministic deployment address
    AddressCollision(Address),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingPrivateKey => {
                write!(f, "please set PRIVATE_KEY in your environment or .env file")
            }
            ScriptError::InvalidPrivateKey(s) => write!(f, "invalid private key: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::ConfigParsing(s) => write!(f, "error parsing config: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::Serialization(s) => write!(f, "error serializing JSON: {}", s),
            ScriptError::ContractNotDeployed(addr) => {
                write!(f, "no contract deployed at {:#x}", addr)
            }
            ScriptError::MissingMethod(s) => write!(f, "contract does not expose method: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(hash) => {
                write!(f, "transaction {:#x} reverted", hash)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::AddressCollision(addr) => {
                write!(f, "a contract is already deployed at {:#x}", addr)
            }
        }
    }
}

impl Error for ScriptError {}

/// A script error annotated with the stage of the deployment at which it occurred
#[derive(Debug)]
pub struct DeploymentFailure {
    /// The last stage the deployment reached before failing
    pub stage: DeployStage,
    /// The underlying error
    pub error: ScriptError,
}

impl DeploymentFailure {
    /// Annotate an error with the stage it occurred at
    pub fn new(stage: DeployStage, error: ScriptError) -> Self {
        Self { stage, error }
    }
}

impl Display for DeploymentFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "deployment failed after stage `{}`: {}", self.stage, self.error)
    }
}

impl Error for DeploymentFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
