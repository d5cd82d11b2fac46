//! Graceful degradation: constructs outside the modelled surface become
//! `Type::Unsupported` and never poison their siblings, while genuinely
//! unresolvable inputs abort the walk with context.

use std::path::Path;

use bindex_engine::{FakeEngine, TypeKind, index_header};
use bindex_foundation::{ErrorCategory, ErrorKind, Type};

#[test]
fn unmodelled_field_type_degrades_to_unsupported() {
    let mut engine = FakeEngine::new();
    let int32 = engine.primitive(TypeKind::Int32);
    let exotic = engine.other_type("__int128");
    let def = engine.struct_def("S", "c:@S@S", 24, false);
    engine.field(def, "a", int32, 0);
    engine.field(def, "weird", exotic, 8);

    let index = index_header(&engine, Path::new("s.h"), &[]).unwrap();
    let (_, decl) = index.structs().iter().next().unwrap();
    let fields = decl.definition().unwrap().fields();
    assert_eq!(fields[0].ty, Type::Int32);
    assert!(fields[1].ty.is_unsupported());
}

#[test]
fn variadic_function_type_degrades_but_the_declaration_survives() {
    // A *pointer to* a variadic function is an unsupported pointee; a
    // variadic *declaration* is still recorded with its fixed parameters.
    let mut engine = FakeEngine::new();
    let int32 = engine.primitive(TypeKind::Int32);
    let variadic_ty = engine.function_type(&[int32], int32, true);
    let fn_ptr = engine.pointer(variadic_ty);
    let def = engine.struct_def("Ops", "c:@S@Ops", 8, false);
    engine.field(def, "callback", fn_ptr, 0);

    engine.function("printf", &[("format", int32)], int32, true);

    let index = index_header(&engine, Path::new("ops.h"), &[]).unwrap();
    let (_, decl) = index.structs().iter().next().unwrap();
    let fields = decl.definition().unwrap().fields();
    assert_eq!(fields[0].ty, Type::pointer_to(Type::Unsupported));

    let printf = index.functions().get("printf").unwrap();
    assert!(printf.variadic);
    assert_eq!(printf.parameters.len(), 1);
}

#[test]
fn degraded_declaration_does_not_poison_siblings() {
    let mut engine = FakeEngine::new();
    let int32 = engine.primitive(TypeKind::Int32);
    let exotic = engine.other_type("_Complex double");
    engine.function("mystery", &[("z", exotic)], exotic, false);
    engine.function("add", &[("a", int32), ("b", int32)], int32, false);

    let index = index_header(&engine, Path::new("mixed.h"), &[]).unwrap();
    assert_eq!(index.functions().len(), 2);
    assert!(index.functions().get("mystery").unwrap().result.is_unsupported());
    assert_eq!(index.functions().get("add").unwrap().result, Type::Int32);
}

#[test]
fn unexposed_type_resolves_through_its_canonical_form() {
    let mut engine = FakeEngine::new();
    let int32 = engine.primitive(TypeKind::Int32);
    let wrapped = engine.unexposed("elaborated", Some(int32));
    let def = engine.struct_def("S", "c:@S@S", 4, false);
    engine.field(def, "x", wrapped, 0);

    let index = index_header(&engine, Path::new("s.h"), &[]).unwrap();
    let (_, decl) = index.structs().iter().next().unwrap();
    assert_eq!(decl.definition().unwrap().fields()[0].ty, Type::Int32);
}

#[test]
fn unresolvable_type_aborts_with_context() {
    let mut engine = FakeEngine::new();
    let opaque = engine.unexposed("__opaque", None);
    let def = engine.struct_def("S", "c:@S@S", 4, false);
    engine.field(def, "x", opaque, 0);

    let err = index_header(&engine, Path::new("s.h"), &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedType { .. }));
    assert_eq!(err.kind.category(), ErrorCategory::UnsupportedConstruct);
    assert_eq!(err.context.unwrap().header.as_deref(), Some("s.h"));
}

#[test]
fn forward_declared_enum_is_unimplemented_not_a_crash() {
    let mut engine = FakeEngine::new();
    engine.enum_forward("State", "c:@E@State");

    let err = index_header(&engine, Path::new("state.h"), &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ForwardDeclaredEnum { .. }));
    assert_eq!(err.kind.category(), ErrorCategory::Unimplemented);
}

#[test]
fn typedef_chains_unwrap_to_the_underlying_type() {
    let mut engine = FakeEngine::new();
    let uint64 = engine.primitive(TypeKind::UInt64);
    let size_t = engine.typedef("size_t", uint64);
    let alias = engine.typedef("my_size", size_t);
    let def = engine.struct_def("S", "c:@S@S", 8, false);
    engine.field(def, "n", alias, 0);

    let index = index_header(&engine, Path::new("s.h"), &[]).unwrap();
    let (_, decl) = index.structs().iter().next().unwrap();
    assert_eq!(decl.definition().unwrap().fields()[0].ty, Type::UInt64);
}
