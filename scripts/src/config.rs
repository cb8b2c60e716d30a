//! Deployment configuration records.
//!
//! Values resolve in order of precedence: CLI flags, then a JSON config
//! record, then the built-in defaults in [`crate::constants`].

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy_primitives::{hex::FromHex, Address, Bytes, B256, U256};
use clap::Args;
use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_FACTORY_ADDRESS, DEFAULT_FACTORY_ARTIFACT_PATH, DEFAULT_FACTORY_SALT,
        DEFAULT_HATS_ADDRESS, DEFAULT_HATS_ID, DEFAULT_INIT_DATA, DEFAULT_SALT_NONCE,
    },
    errors::ScriptError,
    types::{FactoryMethod, ModuleCall},
};

/// The fully-resolved configuration of a module deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDeploymentConfig {
    /// The address of the deployed factory
    pub factory_address: Address,
    /// The factory method to invoke
    pub method: FactoryMethod,
    /// The hat the module is attached to
    pub hat_id: U256,
    /// The address of the Hats protocol contract
    pub hats: Address,
    /// The module's initialization data
    pub init_data: Bytes,
    /// The salt nonce passed to the factory
    pub salt_nonce: U256,
}

impl Default for ModuleDeploymentConfig {
    fn default() -> Self {
        Self {
            factory_address: DEFAULT_FACTORY_ADDRESS,
            method: FactoryMethod::default(),
            hat_id: U256::from(DEFAULT_HATS_ID),
            hats: DEFAULT_HATS_ADDRESS,
            init_data: DEFAULT_INIT_DATA,
            salt_nonce: U256::from(DEFAULT_SALT_NONCE),
        }
    }
}

impl ModuleDeploymentConfig {
    /// Apply a set of overrides on top of this config
    pub fn apply(mut self, overrides: &ModuleOverrides) -> Result<Self, ScriptError> {
        if let Some(factory) = &overrides.factory {
            self.factory_address = parse_address(factory)?;
        }
        if let Some(method) = overrides.method {
            self.method = method;
        }
        if let Some(hat_id) = &overrides.hat_id {
            self.hat_id = parse_u256(hat_id)?;
        }
        if let Some(hats) = &overrides.hats {
            self.hats = parse_address(hats)?;
        }
        if let Some(init_data) = &overrides.init_data {
            self.init_data = parse_bytes(init_data)?;
        }
        if let Some(salt_nonce) = &overrides.salt_nonce {
            self.salt_nonce = parse_u256(salt_nonce)?;
        }

        Ok(self)
    }

    /// The factory call described by this config
    pub fn call(&self) -> ModuleCall {
        ModuleCall {
            method: self.method,
            hat_id: self.hat_id,
            hats: self.hats,
            init_data: self.init_data.clone(),
            salt_nonce: self.salt_nonce,
        }
    }
}

/// Optional overrides of a module deployment's values, set from the CLI
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleOverrides {
    /// Address of the deployed factory contract
    #[arg(long)]
    pub factory: Option<String>,

    /// The factory method to invoke
    #[arg(short, long, value_enum)]
    pub method: Option<FactoryMethod>,

    /// The hat ID the module is attached to, decimal or 0x-prefixed hex
    #[arg(long)]
    pub hat_id: Option<String>,

    /// Address of the Hats protocol contract
    #[arg(long)]
    pub hats: Option<String>,

    /// Initialization data for the module, in hex form
    #[arg(long)]
    pub init_data: Option<String>,

    /// Salt nonce passed to the factory, decimal or 0x-prefixed hex
    #[arg(long)]
    pub salt_nonce: Option<String>,
}

/// A JSON config record describing a module deployment
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DeploymentRecord {
    /// The network RPC URL to deploy to
    pub rpc_url: Option<String>,
    /// Address of the deployed factory contract
    pub factory: Option<String>,
    /// The factory method to invoke
    pub method: Option<FactoryMethod>,
    /// The hat ID the module is attached to
    pub hat_id: Option<String>,
    /// Address of the Hats protocol contract
    pub hats: Option<String>,
    /// Initialization data for the module
    pub init_data: Option<String>,
    /// Salt nonce passed to the factory
    pub salt_nonce: Option<String>,
}

impl DeploymentRecord {
    /// Read a config record from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Parse a config record from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json)
            .map_err(|e| ScriptError::ConfigParsing(e.to_string()))
    }

    /// The deployment values of the record, as overrides
    pub fn overrides(&self) -> ModuleOverrides {
        ModuleOverrides {
            factory: self.factory.clone(),
            method: self.method,
            hat_id: self.hat_id.clone(),
            hats: self.hats.clone(),
            init_data: self.init_data.clone(),
            salt_nonce: self.salt_nonce.clone(),
        }
    }
}

/// The configuration of a factory deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryDeploymentConfig {
    /// The path of the factory build artifact
    pub artifact_path: PathBuf,
    /// The create2 salt
    pub salt: B256,
    /// The ABI-encoded constructor arguments
    pub constructor_args: Bytes,
}

impl Default for FactoryDeploymentConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_FACTORY_ARTIFACT_PATH),
            salt: DEFAULT_FACTORY_SALT,
            constructor_args: Bytes::new(),
        }
    }
}

/// Parse an address from a hex string
pub fn parse_address(s: &str) -> Result<Address, ScriptError> {
    Address::from_str(s.trim())
        .map_err(|e| ScriptError::ConfigParsing(format!("invalid address `{s}`: {e}")))
}

/// Parse a uint256 from a decimal or 0x-prefixed hex string
pub fn parse_u256(s: &str) -> Result<U256, ScriptError> {
    U256::from_str(s.trim())
        .map_err(|e| ScriptError::ConfigParsing(format!("invalid uint256 `{s}`: {e}")))
}

/// Parse a byte string from hex, with or without a 0x prefix
pub fn parse_bytes(s: &str) -> Result<Bytes, ScriptError> {
    Bytes::from_hex(s.trim())
        .map_err(|e| ScriptError::ConfigParsing(format!("invalid hex bytes `{s}`: {e}")))
}

/// Parse a 32-byte salt from hex
pub fn parse_b256(s: &str) -> Result<B256, ScriptError> {
    B256::from_str(s.trim())
        .map_err(|e| ScriptError::ConfigParsing(format!("invalid bytes32 `{s}`: {e}")))
}
