use super::*;

#[test]
fn attach_params_defaults() {
    let params = AttachParams::default().check().unwrap();
    assert!(!params.check_structure());
    assert!(!params.verbose());
}

#[test]
fn attach_params_builder() {
    let params = AttachParams::new()
        .check_structure(true)
        .verbose(true)
        .check_unwrap();
    assert!(params.check_structure());
    assert!(params.verbose());
}

#[test]
fn crossprod_params_defaults() {
    let params = CrossprodParams::new();
    let checked = params.check_ref().unwrap();
    assert!(!checked.parallel());
    assert_eq!(checked.min_parallel_cols(), 64);
}

#[test]
fn crossprod_params_reject_zero_threshold() {
    let params = CrossprodParams::new().parallel(true).min_parallel_cols(0);
    match params.check() {
        Err(SparseError::InvalidParams(msg)) => assert!(msg.contains("min_parallel_cols")),
        other => panic!("expected InvalidParams, got {:?}", other),
    }
}
