//! Error taxonomy untuk marshaling
//!
//! Setiap error terdeteksi dan dikembalikan di call site encode/decode
//! yang menyebabkannya. Tidak ada retry di layer ini: marshaling error
//! berarti bug di protocol definition atau pemakaian caller, bukan
//! kondisi transient. Keputusan fatal-atau-tidak ada di connection layer.

use thiserror::Error;

use crate::signature::ArgKind;

/// Error dari encode/decode argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// Jumlah raw slot tidak sesuai lebar signature (decode)
    #[error("raw argument count {actual} does not match signature width {expected}")]
    SignatureMismatch { expected: usize, actual: usize },

    /// Jumlah value dari caller tidak sesuai consumption count (encode)
    #[error("caller supplied {actual} values, message consumes {expected}")]
    ArgCountMismatch { expected: usize, actual: usize },

    /// Null untuk slot yang bukan nullable
    #[error("argument {index} ({kind:?}) is not nullable")]
    NullNotAllowed { index: usize, kind: ArgKind },

    /// Nilai di luar range 32-bit yang berlaku untuk slot-nya
    #[error("argument {index} is out of range for its wire type")]
    EncodingOverflow { index: usize },

    /// Jenis value atau interface object tidak sesuai ekspektasi slot
    #[error("argument {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Huruf signature tidak dikenal
    ///
    /// Defensive: unreachable untuk signature yang mengikuti grammar.
    #[error("unsupported signature letter {letter:?}")]
    UnsupportedKind { letter: char },

    /// Object id tidak ditemukan di live-object table (decode)
    #[error("object id {id} is not in the live-object table")]
    UnknownObject { id: u32 },

    /// String slot bukan UTF-8 valid (decode)
    #[error("argument {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },
}
