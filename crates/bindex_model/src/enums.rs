//! Enum descriptors and their registry.
//!
//! Enums are only registered from a visible definition: the backing
//! integer type is unknown until then, so forward-declared enums are
//! rejected upstream with a typed error rather than guessed at here.

use std::collections::HashMap;

use bindex_foundation::{DeclarationIdentity, EnumId, Error, Result, Type};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Descriptors
// =============================================================================

/// One named constant of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    /// Constant name.
    pub name: String,
    /// Constant value, sign-extended to 64 bits.
    pub value: i64,
}

/// An enum known to the index: backing integer type plus ordered constants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDef {
    /// Enum name as spelled in the header.
    name: String,
    /// The integer type the compiler chose to back this enum.
    backing: Type,
    /// Constants in callback-arrival order.
    values: Vec<EnumValue>,
}

impl EnumDef {
    /// Returns the enum name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backing integer type.
    #[must_use]
    pub fn backing(&self) -> &Type {
        &self.backing
    }

    /// Returns the constants in declaration order.
    #[must_use]
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Returns the constant with the given name, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

// =============================================================================
// EnumRegistry
// =============================================================================

/// Registry of enum descriptors, keyed by declaration identity.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumRegistry {
    /// Descriptor arena, in first-visit order.
    defs: Vec<EnumDef>,
    /// Map from declaration identity to arena index.
    by_identity: HashMap<DeclarationIdentity, EnumId>,
}

impl EnumRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing entry for the identity or creates one from the
    /// given definition facts. Idempotent across redundant visits.
    pub fn declare(&mut self, identity: &DeclarationIdentity, name: &str, backing: Type) -> EnumId {
        if let Some(&id) = self.by_identity.get(identity) {
            return id;
        }

        let id = EnumId::new(u32::try_from(self.defs.len()).expect("too many enums"));
        self.defs.push(EnumDef {
            name: name.to_string(),
            backing,
            values: Vec::new(),
        });
        self.by_identity.insert(identity.clone(), id);
        id
    }

    /// Records a constant on a registered enum.
    ///
    /// Re-declaring an existing constant with the same value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`bindex_foundation::ErrorKind::ConstantConflict`] if the
    /// name exists with a different value — a header the indexer cannot
    /// model correctly, so the run must fail fast.
    pub fn record_constant(&mut self, id: EnumId, name: &str, value: i64) -> Result<()> {
        let def = &mut self.defs[id.index() as usize];
        match def.values.iter().find(|v| v.name == name) {
            None => {
                def.values.push(EnumValue {
                    name: name.to_string(),
                    value,
                });
                Ok(())
            }
            Some(existing) if existing.value == value => Ok(()),
            Some(existing) => Err(Error::constant_conflict(
                &def.name,
                name,
                existing.value,
                value,
            )),
        }
    }

    /// Looks up the id for a declaration identity.
    #[must_use]
    pub fn lookup(&self, identity: &DeclarationIdentity) -> Option<EnumId> {
        self.by_identity.get(identity).copied()
    }

    /// Returns the descriptor for an id.
    #[must_use]
    pub fn get(&self, id: EnumId) -> Option<&EnumDef> {
        self.defs.get(id.index() as usize)
    }

    /// Iterates descriptors in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = (EnumId, &EnumDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (EnumId::new(u32::try_from(i).expect("registry overflow")), def))
    }

    /// Returns the number of registered enums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if no enums are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
