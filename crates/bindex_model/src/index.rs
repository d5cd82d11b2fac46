//! The finished index handed to the binding generator.

use crate::enums::EnumRegistry;
use crate::functions::FunctionRegistry;
use crate::structs::StructRegistry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The complete semantic model of one header's declarations.
///
/// Owned exclusively by one indexing session while a walk is in progress;
/// the generator only ever sees a completed index, never a partial one.
/// Scoping the registries here (instead of ambient globals) is what lets
/// independent runs coexist, e.g. in tests.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NativeIndex {
    structs: StructRegistry,
    enums: EnumRegistry,
    functions: FunctionRegistry,
}

impl NativeIndex {
    /// Creates a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the struct/union registry.
    #[must_use]
    pub fn structs(&self) -> &StructRegistry {
        &self.structs
    }

    /// Returns the struct/union registry for mutation during a walk.
    pub fn structs_mut(&mut self) -> &mut StructRegistry {
        &mut self.structs
    }

    /// Returns the enum registry.
    #[must_use]
    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Returns the enum registry for mutation during a walk.
    pub fn enums_mut(&mut self) -> &mut EnumRegistry {
        &mut self.enums
    }

    /// Returns the function registry.
    #[must_use]
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Returns the function registry for mutation during a walk.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Returns true if nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.enums.is_empty() && self.functions.is_empty()
    }
}
