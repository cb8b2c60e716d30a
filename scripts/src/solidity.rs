//! Definitions of Solidity functions called during deployment

use alloy::sol;

sol! {
    /// The subset of the `MultiClaimsHatterFactory` interface used by the scripts.
    ///
    /// Older factory revisions expose `deployMultiClaimsHatter`, newer ones
    /// rename it to `deployModule`; both share the same arguments.
    #[sol(rpc)]
    interface IMultiClaimsHatterFactory {
        function deployMultiClaimsHatter(uint256 _hatId, address _hat, bytes calldata _initData, uint256 _saltNonce) external returns (address);
        function deployModule(uint256 _hatId, address _hat, bytes calldata _initData, uint256 _saltNonce) external returns (address);
    }
}

pub use IMultiClaimsHatterFactory::*;
