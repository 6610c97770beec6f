//! Selection binds the process to one network, exactly once.
//!
//! Single test function: the registry is process-global state, and this file
//! runs as its own process.

use pearl_consensus::{registry, Network, ParamsError};

#[test]
fn select_then_current_returns_the_same_instance() {
    assert!(!registry::is_selected());

    let selected = registry::select_by_name("main").unwrap();
    assert!(registry::is_selected());
    assert_eq!(selected.network, Network::Main);

    // current() and params() hand out the very same instance, not a copy.
    assert!(std::ptr::eq(selected, registry::current()));
    assert!(std::ptr::eq(registry::params(Network::Main), registry::current()));
    assert!(std::ptr::eq(registry::current(), registry::current()));

    // A second selection is a programming error, not a reconfiguration.
    assert_eq!(
        registry::select(Network::Test).unwrap_err(),
        ParamsError::AlreadySelected(Network::Main)
    );
    assert!(std::ptr::eq(registry::current(), selected));
}
