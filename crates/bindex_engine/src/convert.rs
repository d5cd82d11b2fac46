//! Recursive lowering of engine-reported types into the closed algebra.
//!
//! One total function over supported inputs. Record and enum references
//! route through the index's registries, establishing the by-reference
//! linkage that keeps the model consistent when definitions arrive after
//! forward declarations. Only an unresolvable unexposed type is a hard
//! failure; every other unrecognized construct degrades to
//! [`Type::Unsupported`] so a single exotic declaration does not abort the
//! rest of the header.

use bindex_foundation::{Error, Result, Type};
use bindex_model::NativeIndex;

use crate::engine::{AstEngine, TypeKind, TypeRef};

/// Lowers an engine-reported type into the type algebra.
///
/// # Errors
///
/// Returns [`bindex_foundation::ErrorKind::UnresolvedType`] if an
/// unexposed type's canonical form is itself unexposed, and
/// [`bindex_foundation::ErrorKind::ForwardDeclaredEnum`] if an enum type
/// refers to a declaration without a visible definition.
pub fn convert_type<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    ty: TypeRef,
) -> Result<Type> {
    match engine.type_kind(ty) {
        TypeKind::Void => Ok(Type::Void),
        TypeKind::Int8 => Ok(Type::Int8),
        TypeKind::UInt8 => Ok(Type::UInt8),
        TypeKind::Int16 => Ok(Type::Int16),
        TypeKind::UInt16 => Ok(Type::UInt16),
        TypeKind::Int32 => Ok(Type::Int32),
        TypeKind::UInt32 => Ok(Type::UInt32),
        TypeKind::Int64 => Ok(Type::Int64),
        TypeKind::UInt64 => Ok(Type::UInt64),
        TypeKind::Long => Ok(Type::Long),
        TypeKind::ULong => Ok(Type::ULong),
        TypeKind::Float32 => Ok(Type::Float32),
        TypeKind::Float64 => Ok(Type::Float64),

        TypeKind::Unexposed => {
            let canonical = engine.canonical_type(ty);
            if engine.type_kind(canonical) == TypeKind::Unexposed {
                Err(Error::unresolved_type(engine.type_spelling(ty)))
            } else {
                convert_type(engine, index, canonical)
            }
        }

        // Typedefs unwrap transparently: the index never materializes
        // typedef names, trading source fidelity for a uniform algebra.
        TypeKind::Typedef => convert_type(engine, index, engine.typedef_underlying(ty)),

        TypeKind::Record => {
            let decl = engine.type_declaration(ty);
            let identity = engine.identity(decl);
            let name = engine.spelling(decl);
            let kind = engine.record_kind(decl);
            let id = index.structs_mut().declare_or_get(&identity, &name, kind);
            Ok(Type::Record(id))
        }

        TypeKind::Enum => {
            let decl = engine.type_declaration(ty);
            let identity = engine.identity(decl);
            if let Some(id) = index.enums().lookup(&identity) {
                return Ok(Type::Enum(id));
            }
            if !engine.is_definition(decl) {
                return Err(Error::forward_declared_enum(engine.spelling(decl)));
            }
            let backing = convert_type(engine, index, engine.enum_backing_type(decl))?;
            let name = engine.spelling(decl);
            let id = index.enums_mut().declare(&identity, &name, backing);
            Ok(Type::Enum(id))
        }

        TypeKind::Pointer => {
            let pointee = convert_type(engine, index, engine.pointee_type(ty))?;
            Ok(Type::pointer_to(pointee))
        }

        TypeKind::ConstantArray => {
            let element = convert_type(engine, index, engine.element_type(ty))?;
            Ok(Type::const_array(element, engine.array_length(ty)))
        }

        TypeKind::IncompleteArray => {
            let element = convert_type(engine, index, engine.element_type(ty))?;
            Ok(Type::incomplete_array(element))
        }

        TypeKind::FunctionProto => {
            // Variadic signatures are not modeled; degrading instead of
            // erroring keeps the surrounding declaration indexable.
            if engine.is_variadic(ty) {
                return Ok(Type::Unsupported);
            }
            let result = convert_type(engine, index, engine.result_type(ty))?;
            let mut parameters = Vec::new();
            for parameter in engine.parameter_types(ty) {
                parameters.push(convert_type(engine, index, parameter)?);
            }
            Ok(Type::function(parameters, result))
        }

        // Closed-world default: degrade, do not crash.
        TypeKind::Other => Ok(Type::Unsupported),
    }
}
