//! Object Layer: Interface Types dan Live-Object Table
//!
//! Prinsip desain:
//! - Static Metadata: InterfaceType berumur 'static, milik protocol definition
//! - Identity by Id: Object dikenali lewat protocol id u32, id 0 = null
//! - External Sync: Sinkronisasi table tanggung jawab connection pemiliknya

mod table;

pub use table::{InterfaceType, InterfaceTypeRef, ObjectRef, ObjectTable};
