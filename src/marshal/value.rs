//! Tagged Union untuk Argument Values
//!
//! Pengganti argumen dynamic di sisi call interface: satu variant per
//! jenis argumen wire, plus `Null` untuk slot nullable yang absent.

use std::os::unix::io::RawFd;

use smallvec::SmallVec;

use crate::object::ObjectRef;

/// Urutan value hasil decode, inline untuk signature pendek
pub type ValueList = SmallVec<[Value; 8]>;

/// Satu argument value bertipe
///
/// `Str` dan `Array` di-box supaya ukuran enum tetap kecil; kedua kind
/// itu jarang muncul di argument list sehingga cost box-nya negligible.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// i32
    Int(i32),
    /// u32
    Uint(u32),
    /// Fixed-point 24.8, sisi typed-nya f64
    Fixed(f64),
    /// File descriptor
    Fd(RawFd),
    /// String UTF-8
    Str(Box<String>),
    /// Referensi object hidup
    Object(ObjectRef),
    /// Object baru yang dibuat sebagai efek call
    NewId(ObjectRef),
    /// Buffer byte opaque
    Array(Box<Vec<u8>>),
    /// Absent, hanya legal untuk slot nullable
    Null,
}

impl Value {
    /// Nama variant untuk pesan error
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Uint(_) => "Uint",
            Self::Fixed(_) => "Fixed",
            Self::Fd(_) => "Fd",
            Self::Str(_) => "Str",
            Self::Object(_) => "Object",
            Self::NewId(_) => "NewId",
            Self::Array(_) => "Array",
            Self::Null => "Null",
        }
    }

    /// Helper untuk bikin Value::Str tanpa boilerplate box
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(Box::new(text.into()))
    }

    /// Helper untuk bikin Value::Array dari bytes
    pub fn array(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Array(Box::new(bytes.into()))
    }
}
