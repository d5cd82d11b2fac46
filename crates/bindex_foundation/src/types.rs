//! The closed type algebra for native declarations.
//!
//! Every engine-reported type is lowered into exactly one [`Type`] value.
//! Struct and enum references are stored as registry indices rather than
//! inline copies, which keeps the representation acyclic even when the
//! underlying native types are mutually recursive.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a struct/union descriptor in the index's struct registry.
///
/// Ids are stable for the lifetime of one index: descriptors are never
/// removed, so an id handed out during the walk stays valid in the
/// finished index.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructId(u32);

impl StructId {
    /// Creates a struct id from a raw registry index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw registry index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StructId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructId({})", self.0)
    }
}

/// Index of an enum descriptor in the index's enum registry.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumId(u32);

impl EnumId {
    /// Creates an enum id from a raw registry index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw registry index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumId({})", self.0)
    }
}

/// A native type, canonicalized into the closed algebra the binding
/// generator understands.
///
/// Fixed-width integers come from the engine's kind tags, never from
/// re-deriving widths out of type spellings. `long` keeps its own
/// platform-width pair because its width differs across target ABIs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The `void` type.
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
    /// Pointer to another type.
    Pointer(Box<Type>),
    /// Array with a declared constant length.
    ConstArray(Box<Type>, u64),
    /// Array without a declared length (decays to pointer semantics).
    IncompleteArray(Box<Type>),
    /// Reference to a struct/union descriptor in the index.
    Record(StructId),
    /// Reference to an enum descriptor in the index.
    Enum(EnumId),
    /// Function signature (non-variadic only).
    Function(Box<FunctionType>),
    /// Sentinel for constructs the generator cannot map.
    Unsupported,
}

/// Parameter and result types of a function signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionType {
    /// Parameter types in declaration order.
    pub parameters: Vec<Type>,
    /// Result type.
    pub result: Type,
}

impl Type {
    /// Creates a pointer to the given pointee type.
    #[must_use]
    pub fn pointer_to(pointee: Type) -> Self {
        Self::Pointer(Box::new(pointee))
    }

    /// Creates a constant-size array of the given element type.
    #[must_use]
    pub fn const_array(element: Type, length: u64) -> Self {
        Self::ConstArray(Box::new(element), length)
    }

    /// Creates an incomplete array of the given element type.
    #[must_use]
    pub fn incomplete_array(element: Type) -> Self {
        Self::IncompleteArray(Box::new(element))
    }

    /// Creates a function type with the given parameters and result.
    #[must_use]
    pub fn function(parameters: Vec<Type>, result: Type) -> Self {
        Self::Function(Box::new(FunctionType { parameters, result }))
    }

    /// Returns true if this is the `Unsupported` sentinel.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }

    /// Returns true if this is an integer type (fixed or platform width).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Long
                | Self::ULong
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Int8 => write!(f, "int8_t"),
            Self::UInt8 => write!(f, "uint8_t"),
            Self::Int16 => write!(f, "int16_t"),
            Self::UInt16 => write!(f, "uint16_t"),
            Self::Int32 => write!(f, "int32_t"),
            Self::UInt32 => write!(f, "uint32_t"),
            Self::Int64 => write!(f, "int64_t"),
            Self::UInt64 => write!(f, "uint64_t"),
            Self::Long => write!(f, "long"),
            Self::ULong => write!(f, "unsigned long"),
            Self::Float32 => write!(f, "float"),
            Self::Float64 => write!(f, "double"),
            Self::Pointer(pointee) => write!(f, "{pointee}*"),
            Self::ConstArray(element, length) => write!(f, "{element}[{length}]"),
            Self::IncompleteArray(element) => write!(f, "{element}[]"),
            Self::Record(id) => write!(f, "record#{}", id.index()),
            Self::Enum(id) => write!(f, "enum#{}", id.index()),
            Self::Function(signature) => {
                write!(f, "{}(", signature.result)?;
                for (i, parameter) in signature.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ")")
            }
            Self::Unsupported => write!(f, "<unsupported>"),
        }
    }
}
