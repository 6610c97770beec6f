//! Process-wide parameter registry.
//!
//! The three parameter sets are built lazily, exactly once, and live for the
//! process lifetime. [`select`] binds the process to one network; the binding
//! is one-way and happens at most once. After selection, [`current`] is a
//! plain read of immutable data and is safe for any number of concurrent
//! readers (only the regtest deployment table sits behind a lock, for the
//! test-harness override).

use crate::error::ParamsError;
use crate::params::{ChainParams, Network};
use once_cell::sync::{Lazy, OnceCell};

static MAIN_PARAMS: Lazy<ChainParams> = Lazy::new(|| ChainParams::for_network(Network::Main));
static TEST_PARAMS: Lazy<ChainParams> = Lazy::new(|| ChainParams::for_network(Network::Test));
static REGTEST_PARAMS: Lazy<ChainParams> =
    Lazy::new(|| ChainParams::for_network(Network::Regtest));

/// The network this process is bound to. Written exactly once by [`select`].
static CURRENT: OnceCell<&'static ChainParams> = OnceCell::new();

/// The statically-held parameter set for a network.
pub fn params(network: Network) -> &'static ChainParams {
    match network {
        Network::Main => &MAIN_PARAMS,
        Network::Test => &TEST_PARAMS,
        Network::Regtest => &REGTEST_PARAMS,
    }
}

/// Resolve a canonical network name to its parameter set.
///
/// Fails closed: anything other than `"main"`, `"test"` or `"regtest"` is an
/// unknown network, and the embedding process must halt startup.
pub fn params_by_name(name: &str) -> Result<&'static ChainParams, ParamsError> {
    Ok(params(name.parse()?))
}

/// Bind the process to a network and return its parameter set.
///
/// Callable at most once: a node process is permanently bound to one network
/// for its lifetime, so a second call is a programming error and is reported
/// without rebinding.
pub fn select(network: Network) -> Result<&'static ChainParams, ParamsError> {
    let resolved = params(network);
    if CURRENT.set(resolved).is_err() {
        return Err(ParamsError::AlreadySelected(current().network));
    }
    Ok(resolved)
}

/// Bind by canonical name, the form startup configuration supplies.
pub fn select_by_name(name: &str) -> Result<&'static ChainParams, ParamsError> {
    select(name.parse()?)
}

/// The currently selected parameter set.
///
/// Panics if no network was selected yet: proceeding with an undefined
/// network is a precondition violation, and there is no hidden default.
pub fn current() -> &'static ChainParams {
    CURRENT
        .get()
        .copied()
        .expect("no network selected: call select() during startup before reading chain parameters")
}

/// Whether a network has been selected yet.
pub fn is_selected() -> bool {
    CURRENT.get().is_some()
}
