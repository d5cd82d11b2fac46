//! Integration tests for the function registry.

use bindex_foundation::Type;
use bindex_model::{FunctionDecl, NativeIndex, Parameter};

fn add_decl() -> FunctionDecl {
    FunctionDecl {
        name: "add".to_string(),
        parameters: vec![
            Parameter {
                name: "a".to_string(),
                ty: Type::Int32,
            },
            Parameter {
                name: "b".to_string(),
                ty: Type::Int32,
            },
        ],
        result: Type::Int32,
        variadic: false,
    }
}

#[test]
fn records_one_descriptor_per_name() {
    let mut index = NativeIndex::new();
    index.functions_mut().record(add_decl());
    index.functions_mut().record(add_decl());

    assert_eq!(index.functions().len(), 1);
    let stored = index.functions().get("add").unwrap();
    assert_eq!(stored.parameters.len(), 2);
    assert_eq!(stored.result, Type::Int32);
}

#[test]
fn last_write_wins_on_name_collision() {
    let mut index = NativeIndex::new();
    index.functions_mut().record(add_decl());

    let mut replacement = add_decl();
    replacement.result = Type::Int64;
    index.functions_mut().record(replacement);

    assert_eq!(index.functions().get("add").unwrap().result, Type::Int64);
}

#[test]
fn iteration_is_deterministic() {
    let mut index = NativeIndex::new();
    for name in ["open", "read", "close"] {
        index.functions_mut().record(FunctionDecl {
            name: name.to_string(),
            parameters: Vec::new(),
            result: Type::Void,
            variadic: false,
        });
    }

    let names: Vec<&str> = index.functions().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["open", "read", "close"]);
}
