//! An end-to-end walk over a small but representative header.

use std::path::Path;

use bindex_engine::{FakeEngine, TypeKind, index_header};
use bindex_foundation::Type;
use bindex_model::RecordKind;

/// The header under test:
///
/// ```c
/// struct S {
///     int32_t x;
///     struct S* next;
/// };
///
/// enum Color { RED, GREEN = 5, BLUE };
///
/// int32_t add(int32_t a, int32_t b);
/// ```
fn build() -> FakeEngine {
    let mut engine = FakeEngine::new();
    let int32 = engine.primitive(TypeKind::Int32);
    let uint32 = engine.primitive(TypeKind::UInt32);

    let s = engine.struct_def("S", "c:@S@S", 16, false);
    engine.field(s, "x", int32, 0);
    let s_ty = engine.record_type(s);
    let s_ptr = engine.pointer(s_ty);
    engine.field(s, "next", s_ptr, 8);

    let color = engine.enum_def("Color", "c:@E@Color", uint32);
    engine.constant(color, "RED", 0);
    engine.constant(color, "GREEN", 5);
    engine.constant(color, "BLUE", 6);

    engine.function("add", &[("a", int32), ("b", int32)], int32, false);
    engine
}

#[test]
fn struct_fields_carry_types_and_offsets() {
    let index = index_header(&build(), Path::new("demo.h"), &[]).unwrap();

    let (id, decl) = index.structs().iter().next().unwrap();
    assert_eq!(decl.name(), "S");
    assert_eq!(decl.kind(), RecordKind::Struct);

    let def = decl.definition().unwrap();
    assert_eq!(def.size(), 16);
    assert!(def.is_layout_natural());

    let fields = def.fields();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "x");
    assert_eq!(fields[0].ty, Type::Int32);
    assert_eq!(fields[0].offset, 0);
    assert_eq!(fields[1].name, "next");
    assert_eq!(fields[1].ty, Type::pointer_to(Type::Record(id)));
    assert_eq!(fields[1].offset, 8);
}

#[test]
fn enum_is_registered_with_backing_and_values() {
    let index = index_header(&build(), Path::new("demo.h"), &[]).unwrap();

    let (_, def) = index.enums().iter().next().unwrap();
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
fn function_signature_survives_the_walk() {
    let index = index_header(&build(), Path::new("demo.h"), &[]).unwrap();

    let decl = index.functions().get("add").unwrap();
    assert_eq!(decl.result, Type::Int32);
    assert!(!decl.variadic);

    let parameters: Vec<(&str, &Type)> = decl
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), &p.ty))
        .collect();
    assert_eq!(parameters, [("a", &Type::Int32), ("b", &Type::Int32)]);
}

#[test]
fn the_whole_header_lands_in_one_index() {
    let index = index_header(&build(), Path::new("demo.h"), &[]).unwrap();

    assert_eq!(index.structs().len(), 1);
    assert_eq!(index.enums().len(), 1);
    assert_eq!(index.functions().len(), 1);
    assert!(!index.is_empty());
}

#[test]
fn an_empty_unit_yields_an_empty_index() {
    let index = index_header(&FakeEngine::new(), Path::new("empty.h"), &[]).unwrap();
    assert!(index.is_empty());
}
