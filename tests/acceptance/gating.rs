//! Version-gating suites.
//!
//! Exercises resolution and gate decisions the way a test-selection
//! framework consumes them: resolve once, compute `(active, reason)` pairs,
//! adapt them at the edge.

use auxgate::version::{
    resolve, resolve_from_env, GateDecision, PgVersion, VersionGate, DEFAULT_PG_VERSION_VAR,
};

#[test]
fn skip_decision_matrix_across_overrides() {
    for (raw, version) in [
        ("14", PgVersion::V14),
        ("15", PgVersion::V15),
        ("16", PgVersion::V16),
        ("17", PgVersion::V17),
    ] {
        let resolved = resolve(Some(raw)).expect("valid override");
        assert_eq!(resolved, version);

        let gate = VersionGate::new(resolved);
        assert_eq!(
            gate.skip_on(PgVersion::V16, "broken on 16").active,
            version == PgVersion::V16
        );
        assert_eq!(
            gate.xfail_on(PgVersion::V16, "broken on 16").active,
            version == PgVersion::V16
        );
        assert_eq!(
            gate.run_only_on_default("default only").active,
            version != PgVersion::DEFAULT
        );
    }
}

#[test]
fn environment_snapshot_resolution() {
    std::env::set_var(DEFAULT_PG_VERSION_VAR, "v15");
    assert_eq!(resolve_from_env().unwrap(), PgVersion::V15);

    // An explicit override that does not parse is fatal, never defaulted.
    std::env::set_var(DEFAULT_PG_VERSION_VAR, "not-a-version");
    let err = resolve_from_env().unwrap_err();
    assert_eq!(err.input, "not-a-version");

    std::env::remove_var(DEFAULT_PG_VERSION_VAR);
    assert_eq!(resolve_from_env().unwrap(), PgVersion::DEFAULT);
}

#[test]
fn decisions_adapt_to_a_skip_style_framework() {
    // Stand-in for a framework's skip mechanism: run unless the gate fires.
    fn would_run(decision: &GateDecision) -> Result<(), String> {
        if decision.active {
            Err(decision.reason.clone())
        } else {
            Ok(())
        }
    }

    let gate = VersionGate::new(PgVersion::V14);
    assert_eq!(
        would_run(&gate.skip_on(PgVersion::V14, "logical replication broken")),
        Err("logical replication broken".to_string())
    );
    assert!(would_run(&gate.skip_on(PgVersion::V16, "unrelated")).is_ok());
}
