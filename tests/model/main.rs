//! Integration tests for Layer 1: Model
//!
//! Tests for the struct/enum/function registries and the NativeIndex.

mod enums;
mod functions;
mod structs;
