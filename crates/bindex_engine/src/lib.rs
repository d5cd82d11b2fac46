//! AST-engine boundary, type converter, and walk driver for bindex.
//!
//! This crate provides:
//! - [`AstEngine`] - The interface the external AST-indexing engine fulfils
//! - [`convert_type`] - Recursive lowering into the closed type algebra
//! - [`Session`] / [`HandleTable`] - Scoped walk resources and the
//!   client-handle table that bridges engine callbacks back to the index
//! - [`index_header`] - The one-call entry point for the invocation driver
//! - [`FakeEngine`] - A scriptable in-memory engine for tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod engine;
pub mod fake;
pub mod indexer;
pub mod session;

pub use convert::convert_type;
pub use engine::{AstEngine, Cursor, DeclEvent, DeclKind, DeclSink, TypeKind, TypeRef, UnitRef};
pub use fake::FakeEngine;
pub use indexer::index_header;
pub use session::{ClientHandle, HandleTable, Session};
