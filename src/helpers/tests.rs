use super::test_helpers::*;

#[test]
fn random_csc_is_canonical() {
    for seed in 0..5 {
        let parts = generate_random_csc(20, 15, 0.3, seed);
        assert_eq!(parts.indptr.len(), 16);
        assert_eq!(parts.indptr[15] as usize, parts.data.len());
        parts.view().validate().unwrap();
    }
}

#[test]
fn random_csc_is_reproducible() {
    let a = generate_random_csc(10, 10, 0.5, 42);
    let b = generate_random_csc(10, 10, 0.5, 42);
    assert_eq!(a, b);
}

#[test]
fn fixtures_are_well_formed() {
    diagonal_like().view().validate().unwrap();
    overlapping().view().validate().unwrap();
}

#[test]
#[should_panic]
fn all_close_detects_mismatch() {
    let x = ndarray::array![1., 2., 3.];
    let y = ndarray::array![1., 2., 3.5];
    assert_array_all_close(x.view(), y.view(), 1e-9);
}
