//! Kurir - Wire-Argument Marshaling Engine
//!
//! Arsitektur:
//! - Signature-Driven: Satu huruf per argumen, urutan scan = urutan wire
//! - Fixed Layout: Raw argument array dengan slot union berukuran tetap
//! - Explicit Ownership: Hasil encode dibundel dengan allocation-nya
//!
//! Kurir menerjemahkan argument list bertipe ke/dari raw argument array
//! yang dikonsumsi transport layer. Framing pesan di wire (length,
//! opcode header) dan lifecycle object bukan tanggung jawab crate ini.

pub mod error;
pub mod marshal;
pub mod message;
pub mod object;
pub mod signature;

pub use error::MarshalError;
pub use marshal::{
    decode_arguments, encode_arguments, EncodedBuffer, RawArgument, RawArray, Value, ValueList,
};
pub use message::MessageDescriptor;
pub use object::{InterfaceType, InterfaceTypeRef, ObjectRef, ObjectTable};
pub use signature::{ArgKind, ArgSpec, Signature};
