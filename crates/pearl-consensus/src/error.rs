//! Error types for chain-parameter lookup, selection and overrides.

use crate::params::Network;
use thiserror::Error;

/// Chain-parameter errors.
///
/// Genesis self-check failures and pre-selection reads are deliberately not
/// represented here: both are unrecoverable programming-error-class faults
/// and abort the process instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// The network name is not one of the canonical identifiers.
    #[error("Unknown network '{0}', expected one of: main, test, regtest")]
    UnknownNetwork(String),

    /// A network was already selected for this process.
    #[error("Network already selected: {0}")]
    AlreadySelected(Network),

    /// Deployment windows may only be moved on the regression network.
    #[error("Deployment window override is only available on regtest, not {0}")]
    DeploymentOverrideNotRegtest(Network),
}
