//! Parsing of Hardhat-style contract build artifacts

use std::{fs, path::Path};

use alloy::json_abi::JsonAbi;
use alloy_primitives::Bytes;
use serde::Deserialize;

use crate::{constants::ZKSOLC_ARTIFACT_FORMAT, errors::ScriptError, types::FactoryMethod};

/// A compiled contract as emitted by the build toolchain
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The artifact format tag, e.g. `hh-sol-artifact-1`
    #[serde(rename = "_format", default)]
    pub format: Option<String>,
    /// The name of the contract
    pub contract_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    #[serde(default)]
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Read an artifact from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Parse an artifact from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }

    /// Check that the artifact's ABI exposes the given factory method with
    /// the expected signature
    pub fn ensure_method(&self, method: FactoryMethod) -> Result<(), ScriptError> {
        let exposed = self
            .abi
            .function(method.name())
            .is_some_and(|overloads| {
                overloads
                    .iter()
                    .any(|f| f.signature() == method.signature())
            });

        if exposed {
            Ok(())
        } else {
            Err(ScriptError::MissingMethod(format!(
                "{} does not expose {}",
                self.contract_name,
                method.signature()
            )))
        }
    }

    /// Whether the artifact was compiled with zksolc for zkSync's EraVM
    pub fn is_zksolc(&self) -> bool {
        self.format.as_deref() == Some(ZKSOLC_ARTIFACT_FORMAT)
    }

    /// The contract's EVM init code: its creation bytecode followed by the
    /// encoded constructor arguments
    pub fn init_code(&self, constructor_args: &[u8]) -> Result<Bytes, ScriptError> {
        if self.is_zksolc() {
            return Err(ScriptError::ArtifactParsing(format!(
                "artifact for {} holds zksolc bytecode, which cannot be deployed as EVM init \
                 code; compile for the EVM and use the `artifacts/` output",
                self.contract_name
            )));
        }
        if self.bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "artifact for {} has no bytecode",
                self.contract_name
            )));
        }

        Ok([self.bytecode.as_ref(), constructor_args].concat().into())
    }
}
