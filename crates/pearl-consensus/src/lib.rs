//! # pearl-consensus
//!
//! The network-parameter registry and deterministic genesis-block
//! construction for the pearl node.
//!
//! This crate is the single source of truth for which network the process is
//! operating on and what consensus rules apply. It provides:
//! - Deterministic construction of each network's genesis block, self-checked
//!   at construction time against hardcoded header hashes and merkle roots
//! - Three fixed parameter sets (main, test, regtest) bundling consensus
//!   rules, wire-magic bytes, address prefixes, seed data and checkpoints
//! - A process-wide, select-once view of the active network
//!
//! Every hash, threshold and bit assignment in the parameter tables is a
//! consensus constant and must match the deployed network exactly.

mod error;
pub mod genesis;
pub mod params;
pub mod registry;

pub use error::ParamsError;
pub use genesis::{build_genesis_block, pearl_genesis_block, GENESIS_COINBASE_MESSAGE};
pub use params::{
    AddressPrefixes, ChainParams, Checkpoints, ConsensusParams, Deployment, DeploymentWindow,
    DnsSeed, Network, DEPLOYMENT_COUNT, MAX_VERSION_BIT, NO_TIMEOUT,
};
