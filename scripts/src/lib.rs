//! Scripts for deploying the `MultiClaimsHatterFactory` and deploying
//! `MultiClaimsHatter` modules through it.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub mod solidity;
pub mod types;
pub mod utils;
