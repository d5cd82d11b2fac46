//! Error types for the bindex system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for indexing operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Creates an unresolved-unexposed-type error.
    #[must_use]
    pub fn unresolved_type(spelling: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedType {
            spelling: spelling.into(),
        })
    }

    /// Creates an enum constant conflict error.
    #[must_use]
    pub fn constant_conflict(
        owner: impl Into<String>,
        name: impl Into<String>,
        existing: i64,
        conflicting: i64,
    ) -> Self {
        Self::new(ErrorKind::ConstantConflict {
            owner: owner.into(),
            name: name.into(),
            existing,
            conflicting,
        })
    }

    /// Creates a field-before-definition error.
    #[must_use]
    pub fn field_before_definition(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::FieldBeforeDefinition {
            record: record.into(),
            field: field.into(),
        })
    }

    /// Creates a conflicting-definition error.
    #[must_use]
    pub fn definition_conflict(record: impl Into<String>) -> Self {
        Self::new(ErrorKind::DefinitionConflict {
            record: record.into(),
        })
    }

    /// Creates a conflicting-field-redeclaration error.
    #[must_use]
    pub fn field_conflict(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::FieldConflict {
            record: record.into(),
            field: field.into(),
        })
    }

    /// Creates a forward-declared-enum error.
    #[must_use]
    pub fn forward_declared_enum(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ForwardDeclaredEnum { name: name.into() })
    }

    /// Creates a stale client handle error.
    #[must_use]
    pub fn stale_handle(raw: u32) -> Self {
        Self::new(ErrorKind::StaleHandle { raw })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An unexposed type whose canonical form is itself unexposed.
    #[error("cannot resolve unexposed type `{spelling}` to a canonical form")]
    UnresolvedType {
        /// The engine-reported spelling of the type.
        spelling: String,
    },

    /// An enum constant re-declared with a different value.
    #[error("enum `{owner}`: constant `{name}` was {existing}, redeclared as {conflicting}")]
    ConstantConflict {
        /// The enum owning the constant.
        owner: String,
        /// The constant name.
        name: String,
        /// The previously recorded value.
        existing: i64,
        /// The conflicting new value.
        conflicting: i64,
    },

    /// A field reported before its container's definition.
    #[error("field `{field}` reported before the definition of `{record}`")]
    FieldBeforeDefinition {
        /// The containing record.
        record: String,
        /// The offending field.
        field: String,
    },

    /// A record definition re-attached with different layout facts.
    #[error("conflicting definitions reported for record `{record}`")]
    DefinitionConflict {
        /// The record with conflicting definitions.
        record: String,
    },

    /// A field re-declared with a different type or offset.
    #[error("conflicting redeclaration of field `{field}` in record `{record}`")]
    FieldConflict {
        /// The containing record.
        record: String,
        /// The offending field.
        field: String,
    },

    /// A forward-declared enum without a visible definition.
    #[error("enum `{name}` is forward-declared without a definition; this is not supported")]
    ForwardDeclaredEnum {
        /// The enum name.
        name: String,
    },

    /// A callback arrived with a client handle not present in the session
    /// table.
    #[error("stale or unknown client handle: {raw}")]
    StaleHandle {
        /// The raw handle value.
        raw: u32,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Maps this kind onto the three-way error taxonomy.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedType { .. } => ErrorCategory::UnsupportedConstruct,
            Self::ConstantConflict { .. }
            | Self::FieldBeforeDefinition { .. }
            | Self::DefinitionConflict { .. }
            | Self::FieldConflict { .. }
            | Self::StaleHandle { .. }
            | Self::Internal(_) => ErrorCategory::InvariantViolation,
            Self::ForwardDeclaredEnum { .. } => ErrorCategory::Unimplemented,
        }
    }
}

/// Coarse error taxonomy: what a caller can do about the failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A native construct with no representable type.
    UnsupportedConstruct,
    /// A header-model mismatch; continuing would produce a wrong index.
    InvariantViolation,
    /// A construct deliberately not yet modeled.
    Unimplemented,
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Header file being indexed.
    pub header: Option<String>,
    /// Name of the declaration being processed.
    pub declaration: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header file.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the declaration name.
    #[must_use]
    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = Some(declaration.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(declaration) = &self.declaration {
            write!(f, "while indexing `{declaration}`")?;
            if self.header.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(header) = &self.header {
            write!(f, "in {header}")?;
        }
        Ok(())
    }
}
