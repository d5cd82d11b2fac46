//! Integration tests for Layer 2: Indexing
//!
//! Full walks through [`bindex_engine::index_header`] against a scripted
//! engine, checking the resulting index end to end.

mod degrade;
mod scenario;
