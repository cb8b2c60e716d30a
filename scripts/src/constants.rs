//! Constants used in the deploy scripts
//!
//! Before executing a real deployment, be sure to set the deployment values as
//! appropriate for the target environment, either through a config record or
//! through the CLI flags. The defaults below are the values the scripts were
//! last run with.

use alloy_primitives::{address, b256, bytes, Address, Bytes, B256};

/// The name of the module contract deployed by the factory
pub const MODULE_CONTRACT_NAME: &str = "MultiClaimsHatter";

/// The name of the factory contract
pub const FACTORY_CONTRACT_NAME: &str = "MultiClaimsHatterFactory";

/// The default hat ID the deployed module is attached to
pub const DEFAULT_HATS_ID: u64 = 1;

/// The default address of the Hats protocol contract
pub const DEFAULT_HATS_ADDRESS: Address = address!("32Ccb7600c10B4F7e678C7cbde199d98453D0e7e");

/// The default salt nonce passed to the factory
pub const DEFAULT_SALT_NONCE: u64 = 1;

/// The default address of the deployed `MultiClaimsHatterFactory`
pub const DEFAULT_FACTORY_ADDRESS: Address = address!("1e8C2a171e5c5D92d15F5363fd136CAf3bBf86E2");

/// The default initialization data passed to the deployed module
pub const DEFAULT_INIT_DATA: Bytes = bytes!("0000000000000000000000000000");

/// The salt used for the deterministic deployment of the factory
pub const DEFAULT_FACTORY_SALT: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000004a75");

/// The default path of the factory build artifact, as emitted by Hardhat's EVM
/// compiler
pub const DEFAULT_FACTORY_ARTIFACT_PATH: &str =
    "artifacts/src/MultiClaimsHatterFactory.sol/MultiClaimsHatterFactory.json";

/// The `_format` tag of artifacts compiled with zksolc
pub const ZKSOLC_ARTIFACT_FORMAT: &str = "hh-zksolc-artifact-1";

/// The address of the deterministic deployment proxy used for create2 deployments.
///
/// The proxy takes `salt ++ init_code` as calldata and deploys with `CREATE2`:
/// https://github.com/Arachnid/deterministic-deployment-proxy
pub const CREATE2_PROXY_ADDRESS: Address = address!("4e59b44847b379578588920cA78FbF26c0B4956C");

/// The name of the environment variable holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The name of the environment variable holding the network RPC URL
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// The RPC URL used when none is configured
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The factory contract key in the `deployments.json` file
pub const FACTORY_CONTRACT_KEY: &str = "multi_claims_hatter_factory";

/// The module contract key in the `deployments.json` file
pub const MODULE_CONTRACT_KEY: &str = "multi_claims_hatter";

/// The default log filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";
