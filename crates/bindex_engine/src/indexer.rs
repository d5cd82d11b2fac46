//! The walk driver: turns the engine's callback stream into registry
//! updates.
//!
//! The driver supplies a header path and compiler-style arguments; the
//! indexer parses, opens a session, and lets the engine walk the
//! translation unit. Each callback updates exactly one registry through
//! the type converter. Errors carry the offending declaration and header
//! in their context.

use std::path::Path;

use bindex_foundation::{Error, ErrorContext, Result};
use bindex_model::{Field, FunctionDecl, NativeIndex, Parameter, RecordKind};

use crate::convert::convert_type;
use crate::engine::{AstEngine, DeclEvent, DeclKind};
use crate::session::Session;

/// Indexes one header: parse, walk, seal.
///
/// This is the entry point the invocation driver calls. The returned index
/// is complete; partial indexes are never handed out.
///
/// # Errors
///
/// Propagates parse failures and any indexing failure raised during the
/// walk, annotated with the header path.
pub fn index_header<E: AstEngine + ?Sized>(
    engine: &E,
    header: &Path,
    args: &[String],
) -> Result<NativeIndex> {
    let unit = engine.parse(header, args)?;
    Session::new(engine)
        .run(unit)
        .map_err(|error| annotate_header(error, header))
}

fn annotate_header(mut error: Error, header: &Path) -> Error {
    let context = error
        .context
        .take()
        .unwrap_or_default()
        .with_header(header.display().to_string());
    error.with_context(context)
}

/// Applies one declaration-visited event to the index under construction.
pub(crate) fn apply_event<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let outcome = match event.kind {
        DeclKind::Struct | DeclKind::Union => on_record(engine, index, event),
        DeclKind::Field => on_field(engine, index, event),
        DeclKind::Enum => on_enum(engine, index, event),
        DeclKind::EnumConstant => on_constant(engine, index, event),
        DeclKind::Function => on_function(engine, index, event),
        DeclKind::Other => Ok(()),
    };

    outcome.map_err(|mut error| {
        if error.context.is_none() {
            error = error.with_context(
                ErrorContext::new().with_declaration(engine.spelling(event.cursor)),
            );
        }
        error
    })
}

fn on_record<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let identity = engine.identity(event.cursor);
    let name = engine.spelling(event.cursor);
    let kind = if event.kind == DeclKind::Union {
        RecordKind::Union
    } else {
        RecordKind::Struct
    };
    let id = index.structs_mut().declare_or_get(&identity, &name, kind);

    if event.is_definition {
        let size = engine.record_size(event.cursor);
        // An attribute on the definition's own children (alignment
        // override, packing pragma) makes the field offsets untrustworthy
        // for memory-mapped interop; attributes elsewhere do not.
        let layout_natural = !engine.has_attribute_child(event.cursor);
        index.structs_mut().attach_definition(id, size, layout_natural)?;
    }
    Ok(())
}

fn on_field<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let container = event
        .container
        .ok_or_else(|| Error::internal("field event without a container cursor"))?;
    let name = engine.spelling(event.cursor);

    let container_identity = engine.identity(container);
    let Some(id) = index.structs().lookup(&container_identity) else {
        return Err(Error::field_before_definition(
            engine.spelling(container),
            name,
        ));
    };

    let ty = convert_type(engine, index, engine.cursor_type(event.cursor))?;
    index.structs_mut().add_field(
        id,
        Field {
            name,
            ty,
            offset: engine.field_offset(event.cursor),
        },
    )
}

fn on_enum<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let identity = engine.identity(event.cursor);
    if index.enums().lookup(&identity).is_some() {
        // Redundant visit of an already-registered definition.
        return Ok(());
    }
    if !event.is_definition {
        return Err(Error::forward_declared_enum(engine.spelling(event.cursor)));
    }

    let backing = convert_type(engine, index, engine.enum_backing_type(event.cursor))?;
    let name = engine.spelling(event.cursor);
    index.enums_mut().declare(&identity, &name, backing);
    Ok(())
}

fn on_constant<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let container = event
        .container
        .ok_or_else(|| Error::internal("enum constant without a container cursor"))?;

    let container_identity = engine.identity(container);
    let Some(id) = index.enums().lookup(&container_identity) else {
        return Err(Error::internal(format!(
            "constant `{}` reported before the definition of `{}`",
            engine.spelling(event.cursor),
            engine.spelling(container)
        )));
    };

    index.enums_mut().record_constant(
        id,
        &engine.spelling(event.cursor),
        engine.enum_constant_value(event.cursor),
    )
}

fn on_function<E: AstEngine + ?Sized>(
    engine: &E,
    index: &mut NativeIndex,
    event: &DeclEvent,
) -> Result<()> {
    let name = engine.spelling(event.cursor);
    let fn_ty = engine.cursor_type(event.cursor);
    let variadic = engine.is_variadic(fn_ty);

    let result = convert_type(engine, index, engine.result_type(fn_ty))?;
    let mut parameters = Vec::new();
    for parameter in engine.parameter_cursors(event.cursor) {
        parameters.push(Parameter {
            name: engine.spelling(parameter),
            ty: convert_type(engine, index, engine.cursor_type(parameter))?,
        });
    }

    index.functions_mut().record(FunctionDecl {
        name,
        parameters,
        result,
        variadic,
    });
    Ok(())
}
