//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Type, DeclarationIdentity, and Error.

mod identities;
