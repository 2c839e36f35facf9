//! Marshal Layer: Typed Values <-> Fixed-Layout Raw Arguments
//!
//! Prinsip desain:
//! - Total Match: Satu variant Value per ArgKind, tanpa koersi implisit
//!   (satu-satunya pengecualian: slot Fixed menerima Int atau Fixed)
//! - All-or-Nothing: Error di tengah tidak pernah mengekspos slot parsial
//! - Explicit Ownership: Allocation hasil encode dibundel di EncodedBuffer
//!   dan dilepas bersama-sama saat drop

mod decoder;
mod encoder;
mod raw;
mod value;

pub use decoder::decode_arguments;
pub use encoder::encode_arguments;
pub use raw::{EncodedBuffer, RawArgument, RawArray};
pub use value::{Value, ValueList};
