//! The deployment-window override is observable only on the regression
//! network's statically-held parameter set.

use pearl_consensus::{registry, Deployment, Network, ParamsError, NO_TIMEOUT};

#[test]
fn override_applies_to_static_regtest_params_only() {
    let regtest = registry::params(Network::Regtest);
    let before = regtest.deployment(Deployment::Csv);
    assert_eq!(before.start_time, 0);
    assert_eq!(before.timeout, NO_TIMEOUT);

    regtest
        .update_deployment_window(Deployment::Csv, 100, 200)
        .unwrap();
    let after = regtest.deployment(Deployment::Csv);
    assert_eq!(after.start_time, 100);
    assert_eq!(after.timeout, 200);
    assert_eq!(after.bit, before.bit);

    // A fresh read through the registry sees the same moved window.
    assert_eq!(
        registry::params(Network::Regtest).deployment(Deployment::Csv),
        after
    );

    // The production and public-test sets reject the override unchanged.
    for network in [Network::Main, Network::Test] {
        let params = registry::params(network);
        let untouched = params.deployment(Deployment::Csv);
        assert_eq!(
            params
                .update_deployment_window(Deployment::Csv, 1, 2)
                .unwrap_err(),
            ParamsError::DeploymentOverrideNotRegtest(network)
        );
        assert_eq!(params.deployment(Deployment::Csv), untouched);
        assert_eq!(untouched.start_time, 0);
        assert_eq!(untouched.timeout, NO_TIMEOUT);
    }
}
