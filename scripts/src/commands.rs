//! Implementations of the deploy scripts

use tracing::{info, warn};

use crate::{
    artifacts::ContractArtifact,
    client::{ChainConnector, DeterministicDeployer, ModuleFactory, TransactionWatcher},
    config::{FactoryDeploymentConfig, ModuleDeploymentConfig},
    constants::{CREATE2_PROXY_ADDRESS, FACTORY_CONTRACT_NAME, MODULE_CONTRACT_NAME},
    errors::{DeploymentFailure, ScriptError},
    types::{DeployStage, FactoryDeploymentReport, ModuleDeploymentReport, StageTracker},
    utils::load_signer,
};

/// Deploy a `MultiClaimsHatter` instance through an already-deployed factory.
///
/// If a factory artifact is given, its ABI must expose the configured method.
pub async fn deploy_module<C: ChainConnector>(
    config: &ModuleDeploymentConfig,
    priv_key: Option<&str>,
    factory_artifact: Option<&ContractArtifact>,
    connector: &C,
) -> Result<ModuleDeploymentReport, DeploymentFailure> {
    let mut progress = StageTracker::new(MODULE_CONTRACT_NAME);
    info!("Deploying {}...", MODULE_CONTRACT_NAME);

    let signer = load_signer(priv_key).map_err(|e| progress.fail(e))?;
    progress.advance(DeployStage::SignerReady);

    if let Some(artifact) = factory_artifact {
        artifact
            .ensure_method(config.method)
            .map_err(|e| progress.fail(e))?;
    }

    let factory = connector
        .module_factory(signer, config.factory_address)
        .await
        .map_err(|e| progress.fail(e))?;
    if !factory.has_code().await.map_err(|e| progress.fail(e))? {
        let error = ScriptError::ContractNotDeployed(factory.address());
        return Err(progress.fail(error));
    }
    progress.advance(DeployStage::ContractResolved);

    let call = config.call();
    info!(
        factory = %factory.address(),
        method = %call.method,
        hat_id = %call.hat_id,
        hats = %call.hats,
        init_data = %call.init_data,
        salt_nonce = %call.salt_nonce,
        "calling factory"
    );

    let module_address = factory
        .predict_module(&call)
        .await
        .map_err(|e| progress.fail(e))?;
    let tx_hash = factory
        .submit(&call)
        .await
        .map_err(|e| progress.fail(e))?;
    progress.advance(DeployStage::TxSubmitted);
    info!(tx_hash = %tx_hash, "waiting for confirmation");

    let receipt = factory
        .confirm(tx_hash)
        .await
        .map_err(|e| progress.fail(e))?;
    if !receipt.success {
        return Err(progress.fail(ScriptError::TransactionReverted(tx_hash)));
    }
    progress.advance(DeployStage::TxConfirmed);
    info!(module = %module_address, "{} deployed", MODULE_CONTRACT_NAME);

    Ok(ModuleDeploymentReport {
        factory: factory.address(),
        call,
        module_address,
        receipt,
    })
}

/// Deploy the `MultiClaimsHatterFactory` at a deterministic address through the
/// create2 deployment proxy.
///
/// The artifact must hold EVM bytecode; zksolc output is rejected before any
/// network interaction.
pub async fn deploy_factory<C: ChainConnector>(
    config: &FactoryDeploymentConfig,
    artifact: &ContractArtifact,
    priv_key: Option<&str>,
    connector: &C,
) -> Result<FactoryDeploymentReport, DeploymentFailure> {
    let mut progress = StageTracker::new(FACTORY_CONTRACT_NAME);
    info!("Deploying {}...", FACTORY_CONTRACT_NAME);

    let signer = load_signer(priv_key).map_err(|e| progress.fail(e))?;
    progress.advance(DeployStage::SignerReady);

    if artifact.contract_name != FACTORY_CONTRACT_NAME {
        warn!(
            "artifact is for `{}`, expected `{}`",
            artifact.contract_name, FACTORY_CONTRACT_NAME
        );
    }
    let init_code = artifact
        .init_code(&config.constructor_args)
        .map_err(|e| progress.fail(e))?;

    let deployer = connector
        .deterministic_deployer(signer, CREATE2_PROXY_ADDRESS)
        .await
        .map_err(|e| progress.fail(e))?;
    let proxy_address = deployer.proxy_address();
    let proxy_code = deployer
        .code_at(proxy_address)
        .await
        .map_err(|e| progress.fail(e))?;
    if proxy_code.is_empty() {
        let error = ScriptError::ContractNotDeployed(proxy_address);
        return Err(progress.fail(error));
    }

    let address = proxy_address.create2_from_code(config.salt, &init_code);
    let existing_code = deployer
        .code_at(address)
        .await
        .map_err(|e| progress.fail(e))?;
    if !existing_code.is_empty() {
        return Err(progress.fail(ScriptError::AddressCollision(address)));
    }
    progress.advance(DeployStage::ContractResolved);
    info!(
        salt = %config.salt,
        expected_address = %address,
        "deploying through create2 proxy"
    );

    let tx_hash = deployer
        .submit(config.salt, init_code)
        .await
        .map_err(|e| progress.fail(e))?;
    progress.advance(DeployStage::TxSubmitted);
    info!(tx_hash = %tx_hash, "waiting for confirmation");

    let receipt = deployer
        .confirm(tx_hash)
        .await
        .map_err(|e| progress.fail(e))?;
    if !receipt.success {
        return Err(progress.fail(ScriptError::TransactionReverted(tx_hash)));
    }
    let deployed_code = deployer
        .code_at(address)
        .await
        .map_err(|e| progress.fail(e))?;
    if deployed_code.is_empty() {
        let error = ScriptError::ContractDeployment(format!(
            "no code at expected address {address:#x} after deployment"
        ));
        return Err(progress.fail(error));
    }
    progress.advance(DeployStage::TxConfirmed);

    Ok(FactoryDeploymentReport {
        address,
        salt: config.salt,
        constructor_args: config.constructor_args.clone(),
        receipt,
    })
}
