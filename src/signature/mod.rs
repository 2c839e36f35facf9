//! Signature Layer: Compact Per-Method Argument Encoding
//!
//! Prinsip desain:
//! - Pure Lexical: Parser tidak pernah melihat type table
//! - Wire Order: Urutan ArgSpec = urutan scan, tidak pernah di-reorder
//! - Immutable: Signature dibangun sekali per method, aman dibaca concurrent

mod parser;

pub use parser::{ArgKind, ArgSpec, Signature};
