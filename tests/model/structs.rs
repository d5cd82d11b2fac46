//! Integration tests for the struct/union registry.

use bindex_foundation::{DeclarationIdentity, ErrorKind, Type};
use bindex_model::{Field, NativeIndex, RecordKind};

fn field(name: &str, ty: Type, offset: u64) -> Field {
    Field {
        name: name.to_string(),
        ty,
        offset,
    }
}

#[test]
fn self_referential_struct_stays_by_reference() {
    // struct S { int32_t x; struct S* next; };
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@S@S");

    let id = index
        .structs_mut()
        .declare_or_get(&identity, "S", RecordKind::Struct);
    index.structs_mut().attach_definition(id, 16, true).unwrap();
    index
        .structs_mut()
        .add_field(id, field("x", Type::Int32, 0))
        .unwrap();
    index
        .structs_mut()
        .add_field(id, field("next", Type::pointer_to(Type::Record(id)), 8))
        .unwrap();

    let def = index.structs().get(id).unwrap().definition().unwrap();
    assert_eq!(def.fields()[1].ty, Type::pointer_to(Type::Record(id)));
    assert_eq!(index.structs().len(), 1);
}

#[test]
fn definition_attaches_to_forward_declared_entry() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@S@Opaque");

    // First reference creates a definition-less entry.
    let first = index
        .structs_mut()
        .declare_or_get(&identity, "Opaque", RecordKind::Struct);
    assert!(!index.structs().get(first).unwrap().is_defined());

    // The later definition lands on the same descriptor.
    let second = index
        .structs_mut()
        .declare_or_get(&identity, "Opaque", RecordKind::Struct);
    assert_eq!(first, second);
    index
        .structs_mut()
        .attach_definition(second, 32, true)
        .unwrap();
    assert!(index.structs().get(first).unwrap().is_defined());
}

#[test]
fn field_list_grows_in_arrival_order_only() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@S@S");
    let id = index
        .structs_mut()
        .declare_or_get(&identity, "S", RecordKind::Struct);
    index.structs_mut().attach_definition(id, 12, true).unwrap();

    index
        .structs_mut()
        .add_field(id, field("a", Type::Int32, 0))
        .unwrap();
    index
        .structs_mut()
        .add_field(id, field("b", Type::Int32, 4))
        .unwrap();
    index
        .structs_mut()
        .add_field(id, field("c", Type::Int32, 8))
        .unwrap();

    let names: Vec<&str> = index
        .structs()
        .get(id)
        .unwrap()
        .definition()
        .unwrap()
        .fields()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn conflicting_redefinition_is_an_invariant_violation() {
    let mut index = NativeIndex::new();
    let identity = DeclarationIdentity::new("c:@S@S");
    let id = index
        .structs_mut()
        .declare_or_get(&identity, "S", RecordKind::Struct);

    index.structs_mut().attach_definition(id, 16, true).unwrap();
    let err = index
        .structs_mut()
        .attach_definition(id, 16, false)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DefinitionConflict { .. }));
}

#[test]
fn unions_live_in_the_same_registry() {
    let mut index = NativeIndex::new();

    index.structs_mut().declare_or_get(
        &DeclarationIdentity::new("c:@S@S"),
        "S",
        RecordKind::Struct,
    );
    index.structs_mut().declare_or_get(
        &DeclarationIdentity::new("c:@U@U"),
        "U",
        RecordKind::Union,
    );

    let kinds: Vec<RecordKind> = index.structs().iter().map(|(_, d)| d.kind()).collect();
    assert_eq!(kinds, [RecordKind::Struct, RecordKind::Union]);
}
