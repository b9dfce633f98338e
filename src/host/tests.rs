use ndarray::array;

use super::*;
use crate::helpers::test_helpers::*;

fn slot_ptr(obj: &S4Object, name: &str) -> *const u8 {
    match obj.slot(name) {
        Some(Slot::Integer(values)) => values.as_ptr() as *const u8,
        Some(Slot::Double(values)) => values.as_ptr() as *const u8,
        other => panic!("slot {} is not numeric: {:?}", name, other),
    }
}

#[test]
fn test_attach_reads_host_object() {
    let obj = diagonal_like().to_host();
    let X = attach(&obj, &AttachParams::default()).unwrap();
    assert_eq!(X.shape(), (3, 3));
    assert_eq!(X.at(2, 1).unwrap(), 7.);
    assert_eq!(X.col_sums(), array![5., 7., 9.]);
    assert_eq!(X.dimnames(), None);
}

#[test]
fn test_attach_borrows_host_buffers() {
    let obj = overlapping().to_host();
    let X = attach(&obj, &AttachParams::default()).unwrap();
    assert_eq!(X.nonzeros().as_ptr() as *const u8, slot_ptr(&obj, "x"));
    assert_eq!(X.indices().as_ptr() as *const u8, slot_ptr(&obj, "i"));
    assert_eq!(X.indptr().as_ptr() as *const u8, slot_ptr(&obj, "p"));
}

#[test]
fn test_attach_then_detach_round_trips() {
    for seed in 0..3 {
        let parts = generate_random_csc(10, 7, 0.3, seed);
        let obj = parts.to_host();
        let wrapped = attach(&obj, &AttachParams::new().check_structure(true))
            .unwrap()
            .detach();
        assert_eq!(wrapped, obj);
        for name in ["i", "p", "x"] {
            assert_eq!(slot_ptr(&wrapped, name), slot_ptr(&obj, name));
        }
    }
}

#[test]
fn test_dimnames_round_trip() {
    let parts = diagonal_like();
    let names = DimNames::new(None, Some(vec!["u".into(), "v".into(), "w".into()]));
    let obj = S4Object::dgcmatrix(
        parts.indices.to_vec(),
        parts.indptr.to_vec(),
        parts.data.to_vec(),
        (3, 3),
        Some(names.clone()),
    );
    let X = attach(&obj, &AttachParams::default()).unwrap();
    assert_eq!(X.dimnames(), Some(&names));
    assert_eq!(X.detach(), obj);
}

#[test]
fn test_attach_rejects_wrong_class() {
    let mut obj = diagonal_like().to_host();
    obj.class = "dgTMatrix".to_string();
    assert_eq!(
        attach(&obj, &AttachParams::default()).unwrap_err(),
        SparseError::UnsupportedClass("dgTMatrix".to_string())
    );
}

#[test]
fn test_attach_rejects_missing_and_mistyped_slots() {
    let mut obj = diagonal_like().to_host();
    obj.slots.remove("p");
    assert_eq!(
        attach(&obj, &AttachParams::default()).unwrap_err(),
        SparseError::MissingSlot("p")
    );

    let mut obj = diagonal_like().to_host();
    obj.set_slot("x", vec![5_i32, 7, 9]);
    assert_eq!(
        attach(&obj, &AttachParams::default()).unwrap_err(),
        SparseError::SlotType {
            slot: "x",
            expected: "double",
            found: "integer"
        }
    );

    let mut obj = diagonal_like().to_host();
    obj.set_slot("Dim", vec![3_i32]);
    assert!(matches!(
        attach(&obj, &AttachParams::default()),
        Err(SparseError::InvalidShape(_))
    ));
}

#[test]
fn test_attach_checks_shape() {
    let mut obj = diagonal_like().to_host();
    obj.set_slot("Dim", vec![3_i32, 4]);
    assert!(matches!(
        attach(&obj, &AttachParams::default()),
        Err(SparseError::InvalidShape(_))
    ));
}

#[test]
fn test_structure_check_is_opt_in() {
    // rows out of order within the first column
    let obj = S4Object::dgcmatrix(vec![1, 0], vec![0, 2], vec![1., 2.], (2, 1), None);
    assert!(attach(&obj, &AttachParams::default()).is_ok());
    assert!(matches!(
        attach(&obj, &AttachParams::new().check_structure(true)),
        Err(SparseError::InvalidShape(_))
    ));
}

#[test]
fn test_attach_mut_edits_host_values() {
    let mut obj = diagonal_like().to_host();
    {
        let mut X = attach_mut(&mut obj, &AttachParams::default()).unwrap();
        X.scale(2.);
    }
    let X = attach(&obj, &AttachParams::default()).unwrap();
    assert_eq!(X.nonzeros(), array![10., 14., 18.]);
}

#[test]
fn test_attach_mut_does_not_leak_into_shared_buffers() {
    let mut obj = overlapping().to_host();
    let wrapped = attach(&obj, &AttachParams::default()).unwrap().detach();
    {
        let mut X = attach_mut(&mut obj, &AttachParams::default()).unwrap();
        for mut entry in X.col_iter_mut(0).unwrap() {
            *entry.value_mut() = 0.;
        }
    }
    let edited = attach(&obj, &AttachParams::default()).unwrap();
    let untouched = attach(&wrapped, &AttachParams::default()).unwrap();
    assert_eq!(edited.col_sums(), array![0., 9., 0., 16.]);
    assert_eq!(untouched.col_sums(), array![3., 9., 0., 16.]);
    assert_eq!(slot_ptr(&obj, "i"), slot_ptr(&wrapped, "i"));
}

#[test]
fn test_slot_type_names() {
    assert_eq!(Slot::from(vec![1_i32]).type_name(), "integer");
    assert_eq!(Slot::from(vec![1.0]).type_name(), "double");
    assert_eq!(Slot::Character(vec![]).type_name(), "character");
    assert_eq!(Slot::List(vec![]).type_name(), "list");
    assert_eq!(Slot::Null.type_name(), "NULL");
    let obj = diagonal_like().to_host();
    let names: Vec<&str> = obj.slot_names().collect();
    assert_eq!(names, vec!["Dim", "Dimnames", "i", "p", "x"]);
}
