extern crate cscview;

use cscview::{attach, attach_mut, AttachParams, DimNames, S4Object};

fn main() {
    // seven stored entries in an 8 x 10 matrix, four of its columns empty
    let obj = S4Object::dgcmatrix(
        vec![0, 7, 2, 3, 4, 5, 6],
        vec![0, 0, 1, 1, 1, 1, 2, 3, 4, 6, 7],
        vec![7., 42., 14., 21., 28., 35., 49.],
        (8, 10),
        Some(DimNames::new(None, None)),
    );
    let params = AttachParams::new().check_structure(true).verbose(true);

    let view = attach(&obj, &params).unwrap();
    for entry in view.iter() {
        println!("({}, {}) = {}", entry.row(), entry.col(), entry.value());
    }
    println!("column sums: {}", view.col_sums());

    // the wrapped copy shares its buffers with `obj`, doubling `obj` in place
    // leaves it untouched
    let original = view.detach();
    let mut doubled = obj.clone();
    attach_mut(&mut doubled, &params).unwrap().scale(2.);

    let before = attach(&original, &params).unwrap();
    let after = attach(&doubled, &params).unwrap();
    println!("sum before: {}, after: {}", before.sum(), after.sum());
    assert_eq!(after.sum(), 2. * before.sum());
}
