//! Argument Decoder
//!
//! Raw argument array -> typed values. Lebar array divalidasi dulu,
//! baru konversi per slot; error apa pun membatalkan seluruh decode,
//! tidak pernah ada hasil terpotong atau terisi nol.
//!
//! Satu-satunya side effect: object baru dari slot new-id di-register
//! ke live-object table milik connection, dan itu pun hanya setelah
//! seluruh pesan lolos decode.

use std::ffi::CStr;
use std::os::raw::c_char;

use smallvec::SmallVec;

use super::raw::{RawArgument, RawArray};
use super::value::{Value, ValueList};
use crate::error::MarshalError;
use crate::marshal::encoder::expected_interface;
use crate::object::{InterfaceTypeRef, ObjectRef, ObjectTable};
use crate::signature::{ArgKind, Signature};

/// Decode raw argument array jadi typed values
///
/// `raw.len()` harus sama dengan lebar wire signature (new-id generic
/// memakai tiga slot); mismatch adalah `SignatureMismatch`.
///
/// # Safety contract
/// Pointer string/array di `raw` harus valid dan null-terminated
/// (string) sesuai jaminan transport yang menyerahkannya; itu bagian
/// dari kontrak dengan protocol runtime, bukan sesuatu yang bisa
/// divalidasi di sini.
pub fn decode_arguments(
    signature: &Signature,
    types: &[InterfaceTypeRef],
    raw: &[RawArgument],
    objects: &mut ObjectTable,
) -> Result<ValueList, MarshalError> {
    let expected = signature.raw_len(types);
    if raw.len() != expected {
        return Err(MarshalError::SignatureMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let mut values = ValueList::with_capacity(signature.len());
    // Registrasi new-id ditahan dulu; masuk table hanya kalau seluruh
    // decode sukses, supaya error tidak meninggalkan object phantom
    let mut pending: SmallVec<[ObjectRef; 2]> = SmallVec::new();
    // Index ke raw array; new-id generic maju tiga slot sekaligus
    let mut slot = 0usize;

    for (idx, spec) in signature.as_slice().iter().enumerate() {
        match spec.kind {
            ArgKind::Int32 => {
                values.push(Value::Int(unsafe { raw[slot].i }));
                slot += 1;
            }
            ArgKind::Uint32 => {
                values.push(Value::Uint(unsafe { raw[slot].u }));
                slot += 1;
            }
            ArgKind::Fixed => {
                values.push(Value::Fixed(unsafe { raw[slot].f } as f64 / 256.0));
                slot += 1;
            }
            ArgKind::Fd => {
                values.push(Value::Fd(unsafe { raw[slot].h }));
                slot += 1;
            }
            ArgKind::Str => {
                let ptr = unsafe { raw[slot].s };
                if ptr.is_null() {
                    if !spec.nullable {
                        return Err(MarshalError::NullNotAllowed {
                            index: idx,
                            kind: spec.kind,
                        });
                    }
                    values.push(Value::Null);
                } else {
                    values.push(Value::Str(Box::new(read_string(idx, ptr)?)));
                }
                slot += 1;
            }
            ArgKind::Object => {
                let id = unsafe { raw[slot].o };
                if id == 0 {
                    if !spec.nullable {
                        return Err(MarshalError::NullNotAllowed {
                            index: idx,
                            kind: spec.kind,
                        });
                    }
                    values.push(Value::Null);
                } else {
                    // New-id dari pesan yang sama juga boleh dirujuk
                    let object = objects
                        .resolve(id)
                        .or_else(|| pending.iter().find(|p| p.id == id))
                        .ok_or(MarshalError::UnknownObject { id })?;
                    if let Some(expected_ty) = expected_interface(types, idx) {
                        if object.interface != expected_ty.name {
                            return Err(MarshalError::TypeMismatch {
                                index: idx,
                                expected: expected_ty.name.to_string(),
                                actual: object.interface.clone(),
                            });
                        }
                    }
                    values.push(Value::Object(object.clone()));
                }
                slot += 1;
            }
            ArgKind::NewId => {
                if let Some(interface) = expected_interface(types, idx) {
                    let id = unsafe { raw[slot].n };
                    if id == 0 {
                        // New-id tidak pernah nullable
                        return Err(MarshalError::NullNotAllowed {
                            index: idx,
                            kind: spec.kind,
                        });
                    }
                    let object = ObjectRef::new(id, interface);
                    pending.push(object.clone());
                    values.push(Value::NewId(object));
                    slot += 1;
                } else {
                    // Generic: nama (s), versi (u), id (n)
                    let name_ptr = unsafe { raw[slot].s };
                    if name_ptr.is_null() {
                        return Err(MarshalError::NullNotAllowed {
                            index: idx,
                            kind: spec.kind,
                        });
                    }
                    let interface = read_string(idx, name_ptr)?;
                    let version = unsafe { raw[slot + 1].u };
                    let id = unsafe { raw[slot + 2].n };
                    if id == 0 {
                        return Err(MarshalError::NullNotAllowed {
                            index: idx,
                            kind: spec.kind,
                        });
                    }
                    let object = ObjectRef {
                        id,
                        interface,
                        version,
                    };
                    pending.push(object.clone());
                    values.push(Value::NewId(object));
                    slot += 3;
                }
            }
            ArgKind::Array => {
                let descriptor = unsafe { raw[slot].a };
                if descriptor.is_null() {
                    // Array tidak pernah nullable
                    return Err(MarshalError::NullNotAllowed {
                        index: idx,
                        kind: spec.kind,
                    });
                }
                values.push(Value::Array(Box::new(unsafe { copy_array(descriptor) })));
                slot += 1;
            }
        }
    }

    // Seluruh pesan valid; baru sekarang registrasi boleh terlihat
    for object in pending {
        objects.register(object);
    }

    Ok(values)
}

/// Baca string null-terminated lalu validasi UTF-8
fn read_string(idx: usize, ptr: *const u8) -> Result<String, MarshalError> {
    // SAFETY: kontrak transport, string valid dan null-terminated
    let bytes = unsafe { CStr::from_ptr(ptr as *const c_char) };
    bytes
        .to_str()
        .map(str::to_string)
        .map_err(|_| MarshalError::InvalidUtf8 { index: idx })
}

/// Copy isi descriptor array ke buffer milik caller
///
/// # Safety
/// Descriptor dan `size` bytes di belakang `data` harus valid.
unsafe fn copy_array(descriptor: *const RawArray) -> Vec<u8> {
    let descriptor = &*descriptor;
    if descriptor.size == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(descriptor.data, descriptor.size).to_vec()
}
