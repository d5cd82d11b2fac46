//! Stable per-declaration identity keys.
//!
//! The AST-indexing engine is the only reliable arbiter of declaration
//! equivalence (across includes and implicit re-declarations), so identity
//! here is nothing more than a value wrapper around the engine's symbol
//! signature. Two cursors with equal identities denote the same logical
//! declaration.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of one logical declaration.
///
/// Used as the dictionary key for struct and enum deduplication. The
/// wrapped signature is shared, so cloning an identity is cheap.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationIdentity(Arc<str>);

impl DeclarationIdentity {
    /// Creates an identity from an engine-emitted symbol signature.
    #[must_use]
    pub fn new(signature: impl Into<Arc<str>>) -> Self {
        Self(signature.into())
    }

    /// Returns the underlying symbol signature.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeclarationIdentity {
    fn from(signature: &str) -> Self {
        Self::new(signature)
    }
}

impl From<String> for DeclarationIdentity {
    fn from(signature: String) -> Self {
        Self::new(signature)
    }
}

impl fmt::Debug for DeclarationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclarationIdentity({:?})", self.as_str())
    }
}

impl fmt::Display for DeclarationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
