//! Integration tests for the enum registry.

use bindex_foundation::{DeclarationIdentity, ErrorKind, Type};
use bindex_model::NativeIndex;

#[test]
fn constants_accumulate_in_order() {
    // enum Color { RED, GREEN = 5, BLUE };
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@E@Color");
    let id = index.enums_mut().declare(&identity, "Color", Type::UInt32);

    index.enums_mut().record_constant(id, "RED", 0).unwrap();
    index.enums_mut().record_constant(id, "GREEN", 5).unwrap();
    index.enums_mut().record_constant(id, "BLUE", 6).unwrap();

    let def = index.enums().get(id).unwrap();
    assert_eq!(def.name(), "Color");
    assert_eq!(def.backing(), &Type::UInt32);
    let pairs: Vec<(&str, i64)> = def
        .values()
        .iter()
        .map(|v| (v.name.as_str(), v.value))
        .collect();
    assert_eq!(pairs, [("RED", 0), ("GREEN", 5), ("BLUE", 6)]);
}

#[test]
fn reindexing_a_constant_is_a_no_op() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@E@Color");
    let id = index.enums_mut().declare(&identity, "Color", Type::UInt32);

    index.enums_mut().record_constant(id, "RED", 0).unwrap();
    index.enums_mut().record_constant(id, "RED", 0).unwrap();

    assert_eq!(index.enums().get(id).unwrap().values().len(), 1);
}

#[test]
fn conflicting_constant_value_fails_fast() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@E@Color");
    let id = index.enums_mut().declare(&identity, "Color", Type::UInt32);

    index.enums_mut().record_constant(id, "RED", 0).unwrap();
    let err = index.enums_mut().record_constant(id, "RED", 1).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::ConstantConflict { .. }));
}

#[test]
fn redeclaring_an_enum_reuses_the_descriptor() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@E@Color");

    let first = index.enums_mut().declare(&identity, "Color", Type::UInt32);
    let second = index.enums_mut().declare(&identity, "Color", Type::UInt32);

    assert_eq!(first, second);
    assert_eq!(index.enums().len(), 1);
}
