//! Declaration descriptors and registries for the bindex indexer.
//!
//! This crate provides:
//! - [`StructRegistry`] - Deduplicated struct/union descriptors with layout facts
//! - [`EnumRegistry`] - Enum descriptors with ordered constant lists
//! - [`FunctionRegistry`] - One descriptor per unique function name
//! - [`NativeIndex`] - The finished index handed to the binding generator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod enums;
pub mod functions;
pub mod index;
pub mod structs;

pub use enums::{EnumDef, EnumRegistry, EnumValue};
pub use functions::{FunctionDecl, FunctionRegistry, Parameter};
pub use index::NativeIndex;
pub use structs::{Field, RecordKind, StructDecl, StructDef, StructRegistry};
