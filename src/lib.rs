//! Bindex - Native header declaration indexer
//!
//! This crate re-exports all layers of the bindex system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: bindex_engine     — AST-engine boundary, type converter, walk driver
//! Layer 1: bindex_model      — Declaration descriptors, registries, NativeIndex
//! Layer 0: bindex_foundation — Core types (Type, DeclarationIdentity, Error)
//! ```

pub use bindex_engine as engine;
pub use bindex_foundation as foundation;
pub use bindex_model as model;
