//! Argument Encoder
//!
//! Typed values -> raw argument array + ownership bundle. Slot dibangun
//! ke buffer lokal; kalau ada error di tengah, caller tidak pernah
//! melihat hasil parsial, hanya MarshalError.

use smallvec::SmallVec;

use super::raw::{EncodedBuffer, Keepalive, RawArgument, RawArray};
use super::value::Value;
use crate::error::MarshalError;
use crate::object::{InterfaceType, InterfaceTypeRef, ObjectRef};
use crate::signature::{ArgKind, Signature};

/// Batas nilai integer untuk slot fixed: harus muat setelah skala 256
const FIXED_INT_MIN: i32 = i32::MIN / 256;
const FIXED_INT_MAX: i32 = i32::MAX / 256;

/// Interface yang diharapkan untuk slot ke-idx, kalau dikenal
#[inline(always)]
pub(crate) fn expected_interface(
    types: &[InterfaceTypeRef],
    idx: usize,
) -> Option<&'static InterfaceType> {
    types.get(idx).copied().flatten()
}

/// Jumlah value yang dikonsumsi dari caller untuk satu signature
///
/// New-id dengan interface dikenal: 0 (id diisi runtime saat dispatch).
/// New-id generic: 3 (nama interface, versi, lalu object ref).
/// Kind lain: 1.
pub(crate) fn consumption_count(signature: &Signature, types: &[InterfaceTypeRef]) -> usize {
    signature
        .as_slice()
        .iter()
        .enumerate()
        .map(|(idx, spec)| match spec.kind {
            ArgKind::NewId => {
                if expected_interface(types, idx).is_some() {
                    0
                } else {
                    3
                }
            }
            _ => 1,
        })
        .sum()
}

/// Encode typed values jadi raw argument array
///
/// Jumlah value harus persis sama dengan consumption count signature;
/// mismatch ditolak sebelum slot pertama dibangun.
pub fn encode_arguments(
    signature: &Signature,
    types: &[InterfaceTypeRef],
    values: &[Value],
) -> Result<EncodedBuffer, MarshalError> {
    let expected = consumption_count(signature, types);
    if values.len() != expected {
        return Err(MarshalError::ArgCountMismatch {
            expected,
            actual: values.len(),
        });
    }

    let mut raw: SmallVec<[RawArgument; 8]> = SmallVec::with_capacity(signature.raw_len(types));
    let mut keepalive = Vec::new();
    let mut supplied = values.iter();

    for (idx, spec) in signature.as_slice().iter().enumerate() {
        // New-id dengan interface dikenal tidak mengkonsumsi value
        if spec.kind == ArgKind::NewId {
            if expected_interface(types, idx).is_some() {
                // Placeholder; id sebenarnya diisi runtime saat dispatch
                raw.push(RawArgument { n: 0 });
            } else {
                encode_untyped_new_id(idx, expected, values.len(), &mut supplied, &mut raw, &mut keepalive)?;
            }
            continue;
        }

        // Consumption count sudah divalidasi di atas
        let value = supplied
            .next()
            .ok_or(MarshalError::ArgCountMismatch {
                expected,
                actual: values.len(),
            })?;

        match spec.kind {
            ArgKind::Int32 => match value {
                Value::Int(v) => raw.push(RawArgument { i: *v }),
                other => return Err(type_mismatch(idx, "Int", other)),
            },
            ArgKind::Uint32 => match value {
                Value::Uint(v) => raw.push(RawArgument { u: *v }),
                other => return Err(type_mismatch(idx, "Uint", other)),
            },
            ArgKind::Fixed => raw.push(encode_fixed(idx, value)?),
            ArgKind::Fd => match value {
                Value::Fd(fd) => raw.push(RawArgument { h: *fd }),
                other => return Err(type_mismatch(idx, "Fd", other)),
            },
            ArgKind::Str => match value {
                Value::Str(text) => raw.push(push_string(text, &mut keepalive)),
                Value::Null if spec.nullable => raw.push(RawArgument::zeroed()),
                Value::Null => {
                    return Err(MarshalError::NullNotAllowed {
                        index: idx,
                        kind: spec.kind,
                    })
                }
                other => return Err(type_mismatch(idx, "Str", other)),
            },
            ArgKind::Object => match value {
                Value::Object(object) => {
                    check_interface(idx, types, object)?;
                    raw.push(RawArgument { o: object.id });
                }
                Value::Null if spec.nullable => raw.push(RawArgument { o: 0 }),
                Value::Null => {
                    return Err(MarshalError::NullNotAllowed {
                        index: idx,
                        kind: spec.kind,
                    })
                }
                other => return Err(type_mismatch(idx, "Object", other)),
            },
            ArgKind::Array => match value {
                Value::Array(bytes) => raw.push(push_array(bytes, &mut keepalive)),
                // Array tidak pernah nullable
                Value::Null => {
                    return Err(MarshalError::NullNotAllowed {
                        index: idx,
                        kind: spec.kind,
                    })
                }
                other => return Err(type_mismatch(idx, "Array", other)),
            },
            ArgKind::NewId => unreachable!("handled before value consumption"),
        }
    }

    Ok(EncodedBuffer::new(
        raw.into_vec().into_boxed_slice(),
        keepalive,
    ))
}

/// Encode slot fixed 24.8
///
/// Int: skala 256 tanpa rounding loss, overflow kalau |v| > 2^23.
/// Fixed: skala 256 lalu round ke integer terdekat (half away from
/// zero, konvensi f64::round), overflow kalau hasilnya keluar i32.
fn encode_fixed(idx: usize, value: &Value) -> Result<RawArgument, MarshalError> {
    match value {
        Value::Int(v) => {
            if *v < FIXED_INT_MIN || *v > FIXED_INT_MAX {
                return Err(MarshalError::EncodingOverflow { index: idx });
            }
            Ok(RawArgument { f: v * 256 })
        }
        Value::Fixed(v) => {
            let scaled = (v * 256.0).round();
            if !scaled.is_finite() || scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
                return Err(MarshalError::EncodingOverflow { index: idx });
            }
            Ok(RawArgument { f: scaled as i32 })
        }
        other => Err(type_mismatch(idx, "Int or Fixed", other)),
    }
}

/// New-id generic: konsumsi tiga value (nama, versi, object ref) dan
/// tulis ke tiga slot wire (s, u, n)
fn encode_untyped_new_id<'a>(
    idx: usize,
    expected: usize,
    actual: usize,
    supplied: &mut std::slice::Iter<'a, Value>,
    raw: &mut SmallVec<[RawArgument; 8]>,
    keepalive: &mut Vec<Keepalive>,
) -> Result<(), MarshalError> {
    // Consumption count divalidasi di entry; cabang None defensive
    let exhausted = MarshalError::ArgCountMismatch { expected, actual };

    let name = match supplied.next() {
        Some(Value::Str(name)) => name,
        Some(other) => return Err(type_mismatch(idx, "Str (interface name)", other)),
        None => return Err(exhausted),
    };
    let version = match supplied.next() {
        Some(Value::Uint(version)) => *version,
        Some(other) => return Err(type_mismatch(idx, "Uint (interface version)", other)),
        None => return Err(exhausted),
    };
    let object = match supplied.next() {
        Some(Value::NewId(object)) => object,
        Some(other) => return Err(type_mismatch(idx, "NewId (object ref)", other)),
        None => return Err(exhausted),
    };

    raw.push(push_string(name, keepalive));
    raw.push(RawArgument { u: version });
    raw.push(RawArgument { n: object.id });
    Ok(())
}

/// Tulis string UTF-8 + NUL ke allocation milik bundle
fn push_string(text: &str, keepalive: &mut Vec<Keepalive>) -> RawArgument {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(0);

    let bytes = bytes.into_boxed_slice();
    let ptr = bytes.as_ptr();
    keepalive.push(Keepalive::Str(bytes));

    RawArgument { s: ptr }
}

/// Copy bytes caller ke allocation milik bundle + descriptor-nya
fn push_array(data: &[u8], keepalive: &mut Vec<Keepalive>) -> RawArgument {
    let bytes: Box<[u8]> = data.into();
    let descriptor = Box::new(RawArray {
        size: bytes.len(),
        alloc: bytes.len(),
        data: bytes.as_ptr(),
    });

    let ptr: *const RawArray = &*descriptor;
    keepalive.push(Keepalive::Array(descriptor, bytes));

    RawArgument { a: ptr }
}

/// Cek interface object terhadap type table
fn check_interface(
    idx: usize,
    types: &[InterfaceTypeRef],
    object: &ObjectRef,
) -> Result<(), MarshalError> {
    if let Some(expected) = expected_interface(types, idx) {
        if object.interface != expected.name {
            return Err(MarshalError::TypeMismatch {
                index: idx,
                expected: expected.name.to_string(),
                actual: object.interface.clone(),
            });
        }
    }
    Ok(())
}

fn type_mismatch(idx: usize, expected: &str, got: &Value) -> MarshalError {
    MarshalError::TypeMismatch {
        index: idx,
        expected: expected.to_string(),
        actual: got.kind_name().to_string(),
    }
}
