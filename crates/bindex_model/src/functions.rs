//! Function descriptors and their registry.
//!
//! Functions are keyed by name, not identity: the native linkage level has
//! no overloading, so two declarations sharing a name collapse to the last
//! one indexed. In a valid header the signatures are identical anyway,
//! which makes the upsert idempotent in practice.

use std::collections::HashMap;

use bindex_foundation::Type;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One named function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Parameter name (may be empty for unnamed parameters).
    pub name: String,
    /// Resolved parameter type.
    pub ty: Type,
}

/// A free function known to the index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Parameters in declaration order (fixed parameters only).
    pub parameters: Vec<Parameter>,
    /// Return type.
    pub result: Type,
    /// True if the function takes a variadic argument tail. Variadic
    /// signatures are not representable in the type algebra, but the
    /// declaration itself is still worth recording.
    pub variadic: bool,
}

/// Registry of function descriptors, keyed by name.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionRegistry {
    /// Descriptors in first-sighting order.
    decls: Vec<FunctionDecl>,
    /// Map from function name to position in `decls`.
    by_name: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a descriptor by name.
    ///
    /// A re-indexed name replaces the stored descriptor in place, keeping
    /// the position of the first sighting so generator output order stays
    /// stable across redundant declarations.
    pub fn record(&mut self, decl: FunctionDecl) {
        if let Some(&position) = self.by_name.get(&decl.name) {
            self.decls[position] = decl;
        } else {
            self.by_name.insert(decl.name.clone(), self.decls.len());
            self.decls.push(decl);
        }
    }

    /// Returns the descriptor for a function name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionDecl> {
        self.by_name.get(name).map(|&position| &self.decls[position])
    }

    /// Iterates descriptors in first-sighting order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.decls.iter()
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if no functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
