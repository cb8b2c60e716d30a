//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    artifacts::ContractArtifact,
    client::RpcConnector,
    commands::{deploy_factory, deploy_module},
    config::{
        parse_b256, parse_bytes, DeploymentRecord, FactoryDeploymentConfig,
        ModuleDeploymentConfig, ModuleOverrides,
    },
    constants::{
        DEFAULT_FACTORY_ARTIFACT_PATH, DEFAULT_RPC_URL, FACTORY_CONTRACT_KEY,
        FACTORY_CONTRACT_NAME, MODULE_CONTRACT_KEY, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR,
    },
    errors::{DeploymentFailure, ScriptError},
    types::{DeployStage, FactoryDeploymentReport, ModuleDeploymentReport},
    utils::{find_deployed_address, require_private_key, write_deployed_address},
};

/// Deploy the `MultiClaimsHatterFactory` and `MultiClaimsHatter` instances
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(
        short,
        long = "private-key",
        alias = "priv-key",
        env = PRIVATE_KEY_ENV_VAR,
        hide_env_values = true
    )]
    pub priv_key: Option<String>,

    /// Network RPC URL, defaults to a local node
    #[arg(short, long, env = RPC_URL_ENV_VAR)]
    pub rpc_url: Option<String>,

    /// Path to the file in which to record deployed addresses
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Run the selected command against the configured network
    pub async fn run(self) -> Result<(), DeploymentFailure> {
        let Cli {
            priv_key,
            rpc_url,
            deployments_path,
            command,
        } = self;
        command
            .run(priv_key.as_deref(), rpc_url, deployments_path.as_deref())
            .await
    }
}

/// The deploy scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a `MultiClaimsHatter` instance through the factory
    DeployModule(DeployModuleArgs),
    /// Deploy the `MultiClaimsHatterFactory` at a deterministic address
    DeployFactory(DeployFactoryArgs),
}

impl Command {
    /// Run the script, printing its result and recording the deployed address.
    ///
    /// The private key is checked before any file is read.
    pub async fn run(
        self,
        priv_key: Option<&str>,
        rpc_url: Option<String>,
        deployments_path: Option<&Path>,
    ) -> Result<(), DeploymentFailure> {
        let priv_key = require_private_key(priv_key).map_err(unstarted)?;

        match self {
            Command::DeployModule(args) => {
                let (config, record_rpc_url) = args.resolve(deployments_path).map_err(unstarted)?;
                let rpc_url = rpc_url
                    .or(record_rpc_url)
                    .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
                let connector = RpcConnector::new(&rpc_url).map_err(unstarted)?;
                let artifact = args
                    .artifact
                    .as_deref()
                    .map(ContractArtifact::from_file)
                    .transpose()
                    .map_err(unstarted)?;

                let report = deploy_module(
                    &config,
                    Some(priv_key),
                    artifact.as_ref(),
                    &connector,
                )
                .await?;
                print_module_report(&report).map_err(confirmed)?;

                if let Some(path) = deployments_path {
                    write_deployed_address(path, MODULE_CONTRACT_KEY, report.module_address)
                        .map_err(confirmed)?;
                }
            }
            Command::DeployFactory(args) => {
                let config = args.resolve().map_err(unstarted)?;
                let rpc_url = rpc_url.unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
                let connector = RpcConnector::new(&rpc_url).map_err(unstarted)?;
                let artifact = ContractArtifact::from_file(&config.artifact_path)
                    .map_err(unstarted)?;

                let report = deploy_factory(&config, &artifact, Some(priv_key), &connector)
                    .await?;
                print_factory_report(&report);

                if let Some(path) = deployments_path {
                    write_deployed_address(path, FACTORY_CONTRACT_KEY, report.address)
                        .map_err(confirmed)?;
                }
            }
        }

        if let Some(path) = deployments_path {
            info!("deployed address written to {}", path.display());
        }

        Ok(())
    }
}

/// Deploy a `MultiClaimsHatter` instance through the factory.
///
/// With no flags, the built-in deployment values are used.
#[derive(Args)]
pub struct DeployModuleArgs {
    /// Path to a JSON config record with the deployment values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the factory build artifact, used to check that the factory
    /// exposes the selected method
    #[arg(short, long)]
    pub artifact: Option<PathBuf>,

    /// Deployment values overriding the config record
    #[command(flatten)]
    pub overrides: ModuleOverrides,
}

impl DeployModuleArgs {
    /// Resolve the deployment config and the record's RPC URL, if any.
    ///
    /// A factory recorded in the deployments file takes the place of the
    /// built-in factory address.
    pub fn resolve(
        &self,
        deployments_path: Option<&Path>,
    ) -> Result<(ModuleDeploymentConfig, Option<String>), ScriptError> {
        let record = match &self.config {
            Some(path) => DeploymentRecord::from_file(path)?,
            None => DeploymentRecord::default(),
        };

        let mut config = ModuleDeploymentConfig::default();
        if let Some(path) = deployments_path {
            if let Some(factory) = find_deployed_address(path, FACTORY_CONTRACT_KEY)? {
                info!(factory = %factory, "using factory from deployments file");
                config.factory_address = factory;
            }
        }

        let config = config.apply(&record.overrides())?.apply(&self.overrides)?;
        Ok((config, record.rpc_url))
    }
}

/// Deploy the `MultiClaimsHatterFactory` at a deterministic address
#[derive(Args)]
pub struct DeployFactoryArgs {
    /// Path to the factory's EVM build artifact
    #[arg(short, long, default_value = DEFAULT_FACTORY_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    /// The create2 salt, as 32 bytes of hex; defaults to the fixed factory salt
    #[arg(short, long)]
    pub salt: Option<String>,

    /// ABI-encoded constructor arguments, in hex form
    #[arg(long)]
    pub constructor_args: Option<String>,
}

impl DeployFactoryArgs {
    /// Resolve the factory deployment config
    pub fn resolve(&self) -> Result<FactoryDeploymentConfig, ScriptError> {
        let mut config = FactoryDeploymentConfig {
            artifact_path: self.artifact.clone(),
            ..Default::default()
        };
        if let Some(salt) = &self.salt {
            config.salt = parse_b256(salt)?;
        }
        if let Some(args) = &self.constructor_args {
            config.constructor_args = parse_bytes(args)?;
        }

        Ok(config)
    }
}

/// Annotate an error raised before the deployment started
fn unstarted(error: ScriptError) -> DeploymentFailure {
    DeploymentFailure::new(DeployStage::Unstarted, error)
}

/// Annotate an error raised after the deployment was confirmed
fn confirmed(error: ScriptError) -> DeploymentFailure {
    DeploymentFailure::new(DeployStage::TxConfirmed, error)
}

/// Print the outcome of a module deployment to stdout
fn print_module_report(report: &ModuleDeploymentReport) -> Result<(), ScriptError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ScriptError::Serialization(e.to_string()))?;
    println!("{json}");
    Ok(())
}

/// Print the outcome of a factory deployment to stdout
fn print_factory_report(report: &FactoryDeploymentReport) {
    println!("constructor args:{}", report.constructor_args);
    println!("{} was deployed to {:#x}", FACTORY_CONTRACT_NAME, report.address);
}
