//! The boundary to the external AST-indexing engine.
//!
//! The engine parses a header as the target compiler would and reports its
//! declarations through a callback stream plus on-demand queries against
//! opaque cursor and type handles. All queries are pure: they have no side
//! effects on the engine's internal state. Layout facts (sizes, offsets,
//! attribute presence) always come from the engine — they depend on
//! ABI-specific rules this crate must not re-derive.

use std::fmt;
use std::path::Path;

use bindex_foundation::{DeclarationIdentity, Result};
use bindex_model::RecordKind;

use crate::session::ClientHandle;

/// Opaque handle to a node in the parsed header's syntax tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Cursor(u32);

impl Cursor {
    /// Creates a cursor from a raw engine handle.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw engine handle.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.0)
    }
}

/// Opaque handle to an engine-reported type.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeRef(u32);

impl TypeRef {
    /// Creates a type handle from a raw engine handle.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw engine handle.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

/// Opaque handle to a parsed translation unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct UnitRef(u32);

impl UnitRef {
    /// Creates a unit handle from a raw engine handle.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw engine handle.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitRef({})", self.0)
    }
}

/// Entity kind of a visited declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A struct declaration or definition.
    Struct,
    /// A union declaration or definition.
    Union,
    /// An enum declaration or definition.
    Enum,
    /// A constant inside an enum definition.
    EnumConstant,
    /// A field inside a record definition.
    Field,
    /// A free function declaration.
    Function,
    /// Anything else the engine reports; ignored by the indexer.
    Other,
}

/// Engine-reported type kind tag.
///
/// Signedness and width of primitives come from this tag, never from
/// re-deriving them out of spelling strings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `void`.
    Void,
    /// 8-bit signed integer.
    Int8,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit signed integer.
    Int16,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit unsigned integer.
    UInt64,
    /// Platform-width signed integer (`long`).
    Long,
    /// Platform-width unsigned integer (`unsigned long`).
    ULong,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Pointer type; see [`AstEngine::pointee_type`].
    Pointer,
    /// Typedef; see [`AstEngine::typedef_underlying`].
    Typedef,
    /// Struct or union reference; see [`AstEngine::type_declaration`].
    Record,
    /// Enum reference; see [`AstEngine::type_declaration`].
    Enum,
    /// Array with a declared constant length.
    ConstantArray,
    /// Array without a declared length.
    IncompleteArray,
    /// Function prototype.
    FunctionProto,
    /// Too generic to classify; must be resolved via its canonical form.
    Unexposed,
    /// Any kind the indexer does not model.
    Other,
}

/// One declaration-visited callback payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeclEvent {
    /// Entity kind of the visited node.
    pub kind: DeclKind,
    /// The visited node.
    pub cursor: Cursor,
    /// The containing declaration, for fields and enum constants.
    pub container: Option<Cursor>,
    /// True if the cursor is a definition, not merely a forward
    /// declaration.
    pub is_definition: bool,
}

/// Receiver for the engine's declaration-visited callback stream.
///
/// The engine passes back the opaque client handle it was given when the
/// walk started; the receiver resolves it through its session table. An
/// `Err` return stops the walk and propagates.
pub trait DeclSink {
    /// Called once per relevant AST node, in engine traversal order.
    ///
    /// # Errors
    ///
    /// Propagates any indexing failure, aborting the walk.
    fn declaration(&mut self, handle: ClientHandle, event: &DeclEvent) -> Result<()>;
}

/// The external AST-indexing engine.
///
/// One implementation wraps the native parser in production; the test
/// suites script [`crate::fake::FakeEngine`] instead. Every query is a
/// pure lookup.
pub trait AstEngine {
    /// Parses a header with compiler-style arguments into a translation
    /// unit.
    ///
    /// # Errors
    ///
    /// Fails if the engine cannot produce an AST for the header at all;
    /// recoverable diagnostics are the engine's own business.
    fn parse(&self, header: &Path, args: &[String]) -> Result<UnitRef>;

    /// Walks the translation unit, invoking `sink` once per relevant
    /// declaration and threading `handle` through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `sink`.
    fn visit_declarations(
        &self,
        unit: UnitRef,
        handle: ClientHandle,
        sink: &mut dyn DeclSink,
    ) -> Result<()>;

    /// Returns the name of the declaration under the cursor.
    fn spelling(&self, cursor: Cursor) -> String;

    /// Returns the stable per-declaration identity token.
    fn identity(&self, cursor: Cursor) -> DeclarationIdentity;

    /// Returns true if the cursor is a definition.
    fn is_definition(&self, cursor: Cursor) -> bool;

    /// Returns the type of the declaration under the cursor.
    fn cursor_type(&self, cursor: Cursor) -> TypeRef;

    /// Returns whether a record cursor is a struct or a union.
    fn record_kind(&self, cursor: Cursor) -> RecordKind;

    /// Returns the size in bytes of a record definition.
    fn record_size(&self, cursor: Cursor) -> u64;

    /// Returns true if any immediate child of the cursor is a
    /// language/compiler attribute (alignment override, packing pragma).
    fn has_attribute_child(&self, cursor: Cursor) -> bool;

    /// Returns the byte offset of a field within its container.
    fn field_offset(&self, cursor: Cursor) -> u64;

    /// Returns the value of an enum constant cursor.
    fn enum_constant_value(&self, cursor: Cursor) -> i64;

    /// Returns the integer type backing an enum definition.
    fn enum_backing_type(&self, cursor: Cursor) -> TypeRef;

    /// Returns the parameter cursors of a function declaration, in order.
    fn parameter_cursors(&self, cursor: Cursor) -> Vec<Cursor>;

    /// Returns the kind tag of a type.
    fn type_kind(&self, ty: TypeRef) -> TypeKind;

    /// Returns the engine's spelling of a type, for diagnostics.
    fn type_spelling(&self, ty: TypeRef) -> String;

    /// Returns the canonical form of a type.
    fn canonical_type(&self, ty: TypeRef) -> TypeRef;

    /// Returns the underlying type of a typedef.
    fn typedef_underlying(&self, ty: TypeRef) -> TypeRef;

    /// Returns the pointee of a pointer type.
    fn pointee_type(&self, ty: TypeRef) -> TypeRef;

    /// Returns the element type of an array type.
    fn element_type(&self, ty: TypeRef) -> TypeRef;

    /// Returns the declared length of a constant-size array type.
    fn array_length(&self, ty: TypeRef) -> u64;

    /// Returns the result type of a function type.
    fn result_type(&self, ty: TypeRef) -> TypeRef;

    /// Returns the parameter types of a function type, in order.
    fn parameter_types(&self, ty: TypeRef) -> Vec<TypeRef>;

    /// Returns true if a function type accepts a variadic argument tail.
    fn is_variadic(&self, ty: TypeRef) -> bool;

    /// Returns the declaration cursor behind a record or enum type.
    fn type_declaration(&self, ty: TypeRef) -> Cursor;
}
