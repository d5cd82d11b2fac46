//! Core types for the bindex native declaration indexer.
//!
//! This crate provides:
//! - [`Type`] - The closed type algebra for native declarations
//! - [`StructId`] / [`EnumId`] - Lightweight descriptor indices
//! - [`DeclarationIdentity`] - Stable per-declaration identity keys
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod identity;
pub mod types;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind, Result};
pub use identity::DeclarationIdentity;
pub use types::{EnumId, FunctionType, StructId, Type};
