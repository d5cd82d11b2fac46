//! Struct/union descriptors and their registry.
//!
//! The registry is the single source of truth for identity-based
//! deduplication: every cursor visit routes through [`StructRegistry::declare_or_get`],
//! so repeated visits of the same declaration collapse to one entry.
//! Definitions and fields are attached incrementally as the engine reports
//! them; a field list only ever grows, in callback-arrival order.

use std::collections::HashMap;

use bindex_foundation::{DeclarationIdentity, Error, Result, StructId, Type};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Descriptors
// =============================================================================

/// Whether a record declaration is a struct or a union.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordKind {
    /// A `struct` declaration.
    Struct,
    /// A `union` declaration.
    Union,
}

/// One field of a record definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Resolved field type.
    pub ty: Type,
    /// Byte offset within the owning record, as computed by the engine.
    pub offset: u64,
}

/// The definition of a record: layout facts plus the ordered field list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructDef {
    /// Total size in bytes, as computed by the engine.
    size: u64,
    /// True if no attribute on the definition's immediate children altered
    /// the record's physical layout.
    layout_natural: bool,
    /// Fields in callback-arrival order (= declaration order).
    fields: Vec<Field>,
}

impl StructDef {
    fn new(size: u64, layout_natural: bool) -> Self {
        Self {
            size,
            layout_natural,
            fields: Vec::new(),
        }
    }

    /// Returns the record's size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns true if the record is safe for direct memory-mapped interop.
    #[must_use]
    pub fn is_layout_natural(&self) -> bool {
        self.layout_natural
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the field with the given name, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A struct or union known to the index, by name.
///
/// Created on first reference (forward declaration) or first definition;
/// never deleted; mutated only to attach its definition and fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructDecl {
    /// Record name as spelled in the header.
    name: String,
    /// Struct or union.
    kind: RecordKind,
    /// The definition, once one has been observed.
    def: Option<StructDef>,
}

impl StructDecl {
    /// Returns the record name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is a struct or a union.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the definition, if one has been observed.
    #[must_use]
    pub fn definition(&self) -> Option<&StructDef> {
        self.def.as_ref()
    }

    /// Returns true if a definition has been attached.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.def.is_some()
    }
}

// =============================================================================
// StructRegistry
// =============================================================================

/// Registry of struct/union descriptors, keyed by declaration identity.
///
/// Descriptors live in an arena and are referred to by [`StructId`]; the
/// type algebra stores those ids rather than copies, which is what lets a
/// struct contain a pointer to itself without cyclic ownership.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructRegistry {
    /// Descriptor arena, in first-visit order.
    decls: Vec<StructDecl>,
    /// Map from declaration identity to arena index.
    by_identity: HashMap<DeclarationIdentity, StructId>,
}

impl StructRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing entry for the identity or creates a new,
    /// definition-less one. Never fails.
    pub fn declare_or_get(
        &mut self,
        identity: &DeclarationIdentity,
        name: &str,
        kind: RecordKind,
    ) -> StructId {
        if let Some(&id) = self.by_identity.get(identity) {
            return id;
        }

        let id = StructId::new(u32::try_from(self.decls.len()).expect("too many structs"));
        self.decls.push(StructDecl {
            name: name.to_string(),
            kind,
            def: None,
        });
        self.by_identity.insert(identity.clone(), id);
        id
    }

    /// Attaches a definition to a declared record.
    ///
    /// Re-attaching identical facts is a no-op, since the engine may
    /// legitimately re-report a definition across redundant visits.
    ///
    /// # Errors
    ///
    /// Returns [`bindex_foundation::ErrorKind::DefinitionConflict`] if a
    /// definition with different size or layout flag was already attached.
    pub fn attach_definition(
        &mut self,
        id: StructId,
        size: u64,
        layout_natural: bool,
    ) -> Result<()> {
        let decl = &mut self.decls[id.index() as usize];
        match &decl.def {
            None => {
                decl.def = Some(StructDef::new(size, layout_natural));
                Ok(())
            }
            Some(def) if def.size == size && def.layout_natural == layout_natural => Ok(()),
            Some(_) => Err(Error::definition_conflict(&decl.name)),
        }
    }

    /// Appends a field to the definition owned by `id`.
    ///
    /// An exact re-declaration (same name, type, and offset) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`bindex_foundation::ErrorKind::FieldBeforeDefinition`] if
    /// the record has no attached definition yet — the engine is
    /// contractually required to report a container's definition before its
    /// fields — and [`bindex_foundation::ErrorKind::FieldConflict`] if a
    /// field with the same name but different type or offset exists.
    pub fn add_field(&mut self, id: StructId, field: Field) -> Result<()> {
        let decl = &mut self.decls[id.index() as usize];
        let Some(def) = decl.def.as_mut() else {
            return Err(Error::field_before_definition(&decl.name, &field.name));
        };

        match def.fields.iter().find(|f| f.name == field.name) {
            None => {
                def.fields.push(field);
                Ok(())
            }
            Some(existing) if existing.ty == field.ty && existing.offset == field.offset => Ok(()),
            Some(_) => Err(Error::field_conflict(&decl.name, &field.name)),
        }
    }

    /// Looks up the id for a declaration identity.
    #[must_use]
    pub fn lookup(&self, identity: &DeclarationIdentity) -> Option<StructId> {
        self.by_identity.get(identity).copied()
    }

    /// Returns the descriptor for an id.
    #[must_use]
    pub fn get(&self, id: StructId) -> Option<&StructDecl> {
        self.decls.get(id.index() as usize)
    }

    /// Iterates descriptors in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = (StructId, &StructDecl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, decl)| (StructId::new(u32::try_from(i).expect("registry overflow")), decl))
    }

    /// Returns the number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if no records are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
