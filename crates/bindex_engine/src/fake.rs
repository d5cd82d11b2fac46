//! A scriptable in-memory engine for exercising the indexer without a
//! native parser.
//!
//! Tests build an AST programmatically — declarations are visited in
//! creation order, and [`FakeEngine::revisit`] appends deliberate
//! redundant visits to exercise idempotency. Queries panic on handles the
//! script never created; that is a bug in the test, not a runtime
//! condition.

use std::path::Path;

use bindex_foundation::{DeclarationIdentity, Result};
use bindex_model::RecordKind;

use crate::engine::{
    AstEngine, Cursor, DeclEvent, DeclKind, DeclSink, TypeKind, TypeRef, UnitRef,
};
use crate::session::ClientHandle;

#[derive(Debug)]
struct Node {
    kind: DeclKind,
    spelling: String,
    identity: String,
    is_definition: bool,
    container: Option<Cursor>,
    ty: Option<TypeRef>,
    record_kind: RecordKind,
    record_size: u64,
    has_attribute: bool,
    field_offset: u64,
    constant_value: i64,
    backing: Option<TypeRef>,
    parameters: Vec<Cursor>,
}

impl Node {
    fn new(kind: DeclKind, spelling: &str, identity: &str) -> Self {
        Self {
            kind,
            spelling: spelling.to_string(),
            identity: identity.to_string(),
            is_definition: false,
            container: None,
            ty: None,
            record_kind: RecordKind::Struct,
            record_size: 0,
            has_attribute: false,
            field_offset: 0,
            constant_value: 0,
            backing: None,
            parameters: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct TypeNode {
    kind: TypeKind,
    spelling: String,
    canonical: Option<TypeRef>,
    underlying: Option<TypeRef>,
    pointee: Option<TypeRef>,
    element: Option<TypeRef>,
    length: u64,
    result: Option<TypeRef>,
    parameters: Vec<TypeRef>,
    variadic: bool,
    declaration: Option<Cursor>,
}

impl TypeNode {
    fn new(kind: TypeKind, spelling: &str) -> Self {
        Self {
            kind,
            spelling: spelling.to_string(),
            canonical: None,
            underlying: None,
            pointee: None,
            element: None,
            length: 0,
            result: None,
            parameters: Vec::new(),
            variadic: false,
            declaration: None,
        }
    }
}

/// In-memory AST engine for tests.
#[derive(Debug, Default)]
pub struct FakeEngine {
    nodes: Vec<Node>,
    types: Vec<TypeNode>,
    events: Vec<Cursor>,
}

impl FakeEngine {
    /// Creates an empty engine with no declarations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, node: Node, visited: bool) -> Cursor {
        let cursor = Cursor::new(u32::try_from(self.nodes.len()).expect("too many nodes"));
        self.nodes.push(node);
        if visited {
            self.events.push(cursor);
        }
        cursor
    }

    fn push_type(&mut self, node: TypeNode) -> TypeRef {
        let ty = TypeRef::new(u32::try_from(self.types.len()).expect("too many types"));
        self.types.push(node);
        ty
    }

    fn node(&self, cursor: Cursor) -> &Node {
        &self.nodes[cursor.raw() as usize]
    }

    fn type_node(&self, ty: TypeRef) -> &TypeNode {
        &self.types[ty.raw() as usize]
    }

    // =========================================================================
    // Type builders
    // =========================================================================

    /// Adds a primitive type of the given kind.
    pub fn primitive(&mut self, kind: TypeKind) -> TypeRef {
        self.push_type(TypeNode::new(kind, "primitive"))
    }

    /// Adds a pointer to `pointee`.
    pub fn pointer(&mut self, pointee: TypeRef) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::Pointer, "pointer");
        node.pointee = Some(pointee);
        self.push_type(node)
    }

    /// Adds a constant-size array of `element`.
    pub fn const_array(&mut self, element: TypeRef, length: u64) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::ConstantArray, "array");
        node.element = Some(element);
        node.length = length;
        self.push_type(node)
    }

    /// Adds an incomplete array of `element`.
    pub fn incomplete_array(&mut self, element: TypeRef) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::IncompleteArray, "array");
        node.element = Some(element);
        self.push_type(node)
    }

    /// Adds a typedef aliasing `underlying`.
    pub fn typedef(&mut self, name: &str, underlying: TypeRef) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::Typedef, name);
        node.underlying = Some(underlying);
        self.push_type(node)
    }

    /// Adds an unexposed type. With `Some(canonical)` it resolves on
    /// retry; with `None` its canonical form is itself, i.e. unresolvable.
    pub fn unexposed(&mut self, spelling: &str, canonical: Option<TypeRef>) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::Unexposed, spelling);
        node.canonical = canonical;
        self.push_type(node)
    }

    /// Adds a function prototype type.
    pub fn function_type(
        &mut self,
        parameters: &[TypeRef],
        result: TypeRef,
        variadic: bool,
    ) -> TypeRef {
        let mut node = TypeNode::new(TypeKind::FunctionProto, "function");
        node.parameters = parameters.to_vec();
        node.result = Some(result);
        node.variadic = variadic;
        self.push_type(node)
    }

    /// Adds a type of a kind the indexer does not model.
    pub fn other_type(&mut self, spelling: &str) -> TypeRef {
        self.push_type(TypeNode::new(TypeKind::Other, spelling))
    }

    /// Adds the record type referring to a struct/union cursor.
    pub fn record_type(&mut self, declaration: Cursor) -> TypeRef {
        let spelling = self.node(declaration).spelling.clone();
        let mut node = TypeNode::new(TypeKind::Record, &spelling);
        node.declaration = Some(declaration);
        self.push_type(node)
    }

    /// Adds the enum type referring to an enum cursor.
    pub fn enum_type(&mut self, declaration: Cursor) -> TypeRef {
        let spelling = self.node(declaration).spelling.clone();
        let mut node = TypeNode::new(TypeKind::Enum, &spelling);
        node.declaration = Some(declaration);
        self.push_type(node)
    }

    // =========================================================================
    // Declaration builders (visited in creation order)
    // =========================================================================

    /// Adds a struct forward declaration.
    pub fn struct_decl(&mut self, name: &str, identity: &str) -> Cursor {
        self.push_node(Node::new(DeclKind::Struct, name, identity), true)
    }

    /// Adds a struct definition with the given size and attribute flag.
    pub fn struct_def(
        &mut self,
        name: &str,
        identity: &str,
        size: u64,
        has_attribute: bool,
    ) -> Cursor {
        let mut node = Node::new(DeclKind::Struct, name, identity);
        node.is_definition = true;
        node.record_size = size;
        node.has_attribute = has_attribute;
        self.push_node(node, true)
    }

    /// Adds a union definition with the given size and attribute flag.
    pub fn union_def(
        &mut self,
        name: &str,
        identity: &str,
        size: u64,
        has_attribute: bool,
    ) -> Cursor {
        let mut node = Node::new(DeclKind::Union, name, identity);
        node.is_definition = true;
        node.record_kind = RecordKind::Union;
        node.record_size = size;
        node.has_attribute = has_attribute;
        self.push_node(node, true)
    }

    /// Adds a field to a record definition.
    pub fn field(&mut self, container: Cursor, name: &str, ty: TypeRef, offset: u64) -> Cursor {
        let identity = format!("{}::{name}", self.node(container).identity);
        let mut node = Node::new(DeclKind::Field, name, &identity);
        node.container = Some(container);
        node.ty = Some(ty);
        node.field_offset = offset;
        self.push_node(node, true)
    }

    /// Adds an enum definition with the given backing integer type.
    pub fn enum_def(&mut self, name: &str, identity: &str, backing: TypeRef) -> Cursor {
        let mut node = Node::new(DeclKind::Enum, name, identity);
        node.is_definition = true;
        node.backing = Some(backing);
        self.push_node(node, true)
    }

    /// Adds an enum forward declaration (no definition).
    pub fn enum_forward(&mut self, name: &str, identity: &str) -> Cursor {
        self.push_node(Node::new(DeclKind::Enum, name, identity), true)
    }

    /// Adds a constant to an enum definition.
    pub fn constant(&mut self, container: Cursor, name: &str, value: i64) -> Cursor {
        let identity = format!("{}::{name}", self.node(container).identity);
        let mut node = Node::new(DeclKind::EnumConstant, name, &identity);
        node.container = Some(container);
        node.constant_value = value;
        self.push_node(node, true)
    }

    /// Adds a function declaration with named parameters.
    pub fn function(
        &mut self,
        name: &str,
        parameters: &[(&str, TypeRef)],
        result: TypeRef,
        variadic: bool,
    ) -> Cursor {
        let mut cursors = Vec::new();
        for (parameter_name, ty) in parameters {
            let identity = format!("c:@F@{name}#{parameter_name}");
            let mut node = Node::new(DeclKind::Other, parameter_name, &identity);
            node.ty = Some(*ty);
            cursors.push(self.push_node(node, false));
        }

        let types: Vec<TypeRef> = parameters.iter().map(|(_, ty)| *ty).collect();
        let fn_ty = self.function_type(&types, result, variadic);

        let identity = format!("c:@F@{name}");
        let mut node = Node::new(DeclKind::Function, name, &identity);
        node.ty = Some(fn_ty);
        node.parameters = cursors;
        self.push_node(node, true)
    }

    /// Appends a redundant visit of an already-created declaration.
    pub fn revisit(&mut self, cursor: Cursor) {
        self.events.push(cursor);
    }
}

impl AstEngine for FakeEngine {
    fn parse(&self, _header: &Path, _args: &[String]) -> Result<UnitRef> {
        Ok(UnitRef::new(0))
    }

    fn visit_declarations(
        &self,
        _unit: UnitRef,
        handle: ClientHandle,
        sink: &mut dyn DeclSink,
    ) -> Result<()> {
        for &cursor in &self.events {
            let node = self.node(cursor);
            let event = DeclEvent {
                kind: node.kind,
                cursor,
                container: node.container,
                is_definition: node.is_definition,
            };
            sink.declaration(handle, &event)?;
        }
        Ok(())
    }

    fn spelling(&self, cursor: Cursor) -> String {
        self.node(cursor).spelling.clone()
    }

    fn identity(&self, cursor: Cursor) -> DeclarationIdentity {
        DeclarationIdentity::new(self.node(cursor).identity.clone())
    }

    fn is_definition(&self, cursor: Cursor) -> bool {
        self.node(cursor).is_definition
    }

    fn cursor_type(&self, cursor: Cursor) -> TypeRef {
        self.node(cursor).ty.expect("cursor has no scripted type")
    }

    fn record_kind(&self, cursor: Cursor) -> RecordKind {
        self.node(cursor).record_kind
    }

    fn record_size(&self, cursor: Cursor) -> u64 {
        self.node(cursor).record_size
    }

    fn has_attribute_child(&self, cursor: Cursor) -> bool {
        self.node(cursor).has_attribute
    }

    fn field_offset(&self, cursor: Cursor) -> u64 {
        self.node(cursor).field_offset
    }

    fn enum_constant_value(&self, cursor: Cursor) -> i64 {
        self.node(cursor).constant_value
    }

    fn enum_backing_type(&self, cursor: Cursor) -> TypeRef {
        self.node(cursor)
            .backing
            .expect("enum has no scripted backing type")
    }

    fn parameter_cursors(&self, cursor: Cursor) -> Vec<Cursor> {
        self.node(cursor).parameters.clone()
    }

    fn type_kind(&self, ty: TypeRef) -> TypeKind {
        self.type_node(ty).kind
    }

    fn type_spelling(&self, ty: TypeRef) -> String {
        self.type_node(ty).spelling.clone()
    }

    fn canonical_type(&self, ty: TypeRef) -> TypeRef {
        self.type_node(ty).canonical.unwrap_or(ty)
    }

    fn typedef_underlying(&self, ty: TypeRef) -> TypeRef {
        self.type_node(ty)
            .underlying
            .expect("typedef has no scripted underlying type")
    }

    fn pointee_type(&self, ty: TypeRef) -> TypeRef {
        self.type_node(ty).pointee.expect("not a pointer type")
    }

    fn element_type(&self, ty: TypeRef) -> TypeRef {
        self.type_node(ty).element.expect("not an array type")
    }

    fn array_length(&self, ty: TypeRef) -> u64 {
        self.type_node(ty).length
    }

    fn result_type(&self, ty: TypeRef) -> TypeRef {
        self.type_node(ty).result.expect("not a function type")
    }

    fn parameter_types(&self, ty: TypeRef) -> Vec<TypeRef> {
        self.type_node(ty).parameters.clone()
    }

    fn is_variadic(&self, ty: TypeRef) -> bool {
        self.type_node(ty).variadic
    }

    fn type_declaration(&self, ty: TypeRef) -> Cursor {
        self.type_node(ty)
            .declaration
            .expect("type has no declaration cursor")
    }
}
