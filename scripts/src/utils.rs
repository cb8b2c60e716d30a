//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use serde_json::{json, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Check that a private key was provided, returning it trimmed.
///
/// An absent or empty key is a [`ScriptError::MissingPrivateKey`].
pub fn require_private_key(priv_key: Option<&str>) -> Result<&str, ScriptError> {
    priv_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(ScriptError::MissingPrivateKey)
}

/// Construct the deployer's signer from its private key
pub fn load_signer(priv_key: Option<&str>) -> Result<PrivateKeySigner, ScriptError> {
    let priv_key = require_private_key(priv_key)?;
    PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::InvalidPrivateKey(e.to_string()))
}

/// Read a JSON file, treating a missing file as an empty object
fn read_json_or_empty(file_path: &Path) -> Result<Value, ScriptError> {
    if !file_path.exists() {
        return Ok(json!({}));
    }

    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", file_path.display(), e)))?;
    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Look up a deployed contract's address in the deployments file, if recorded
pub fn find_deployed_address(
    file_path: &Path,
    contract_key: &str,
) -> Result<Option<Address>, ScriptError> {
    let parsed_json = read_json_or_empty(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .map(|addr_str| {
            Address::from_str(addr_str).map_err(|e| ScriptError::ReadFile(e.to_string()))
        })
        .transpose()
}

/// Record a deployed contract's address in the deployments file, creating the
/// file if it does not exist
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut parsed_json = read_json_or_empty(file_path)?;
    if !parsed_json.is_object() {
        return Err(ScriptError::WriteFile(format!(
            "{} does not contain a JSON object",
            file_path.display()
        )));
    }

    if !parsed_json[DEPLOYMENTS_KEY].is_object() {
        parsed_json[DEPLOYMENTS_KEY] = json!({});
    }
    parsed_json[DEPLOYMENTS_KEY][contract_key] = Value::String(format!("{address:#x}"));

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| ScriptError::Serialization(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;
    use crate::constants::{FACTORY_CONTRACT_KEY, MODULE_CONTRACT_KEY};

    /// The first default account of an Anvil node
    const TEST_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_load_signer() {
        let signer = load_signer(Some(TEST_PKEY)).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_missing_private_key() {
        assert!(matches!(
            load_signer(None),
            Err(ScriptError::MissingPrivateKey)
        ));
        assert!(matches!(
            load_signer(Some("  ")),
            Err(ScriptError::MissingPrivateKey)
        ));
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(matches!(
            load_signer(Some("0xnotakey")),
            Err(ScriptError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_deployments_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let factory = address!("1e8C2a171e5c5D92d15F5363fd136CAf3bBf86E2");
        let module = address!("00000000000000000000000000000000000000aa");

        write_deployed_address(&path, FACTORY_CONTRACT_KEY, factory).unwrap();
        write_deployed_address(&path, MODULE_CONTRACT_KEY, module).unwrap();

        let recorded_factory = find_deployed_address(&path, FACTORY_CONTRACT_KEY).unwrap();
        let recorded_module = find_deployed_address(&path, MODULE_CONTRACT_KEY).unwrap();
        assert_eq!(recorded_factory, Some(factory));
        assert_eq!(recorded_module, Some(module));
    }

    #[test]
    fn test_missing_deployment_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let recorded = find_deployed_address(&path, FACTORY_CONTRACT_KEY).unwrap();
        assert!(recorded.is_none());
    }

    #[test]
    fn test_malformed_deployed_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let contents = r#"{ "deployments": { "multi_claims_hatter_factory": "0x12" } }"#;
        fs::write(&path, contents).unwrap();

        assert!(matches!(
            find_deployed_address(&path, FACTORY_CONTRACT_KEY),
            Err(ScriptError::ReadFile(_))
        ));
    }
}
