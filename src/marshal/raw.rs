//! Raw Argument Layout
//!
//! Layout slot ditentukan protocol runtime eksternal: raw argument
//! array adalah deretan union berukuran tetap, satu slot per posisi,
//! di-index sesuai urutan signature. Untuk crate ini array tersebut
//! read-only saat decode dan write-only saat encode.

use std::fmt;
use std::os::unix::io::RawFd;
use std::ptr;

/// Descriptor array di wire
///
/// Field order mengikuti layout runtime eksternal (size, alloc, data).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawArray {
    /// Panjang data dalam bytes
    pub size: usize,
    /// Kapasitas allocation di belakang `data`
    pub alloc: usize,
    /// Pointer ke byte pertama
    pub data: *const u8,
}

/// Satu slot raw argument (fixed-layout union)
///
/// Field mana yang valid ditentukan ArgKind pada posisi yang sama di
/// signature; membaca field lain adalah bug caller.
#[repr(C)]
#[derive(Clone, Copy)]
pub union RawArgument {
    /// Int32
    pub i: i32,
    /// Uint32
    pub u: u32,
    /// Fixed 24.8 (i32 skala 256)
    pub f: i32,
    /// File descriptor
    pub h: RawFd,
    /// String null-terminated; null pointer = absent
    pub s: *const u8,
    /// Object id; 0 = absent
    pub o: u32,
    /// Id object baru (new-id)
    pub n: u32,
    /// Pointer ke descriptor array
    pub a: *const RawArray,
}

impl RawArgument {
    /// Slot dengan semua bit nol (null pointer / id 0)
    #[inline(always)]
    pub fn zeroed() -> Self {
        RawArgument { s: ptr::null() }
    }
}

/// Allocation yang harus tetap hidup selama raw array dipakai
#[derive(Debug)]
pub(crate) enum Keepalive {
    /// Byte string + NUL terminator
    Str(Box<[u8]>),
    /// Descriptor array + data-nya
    Array(Box<RawArray>, Box<[u8]>),
}

/// Hasil encode: raw argument array plus allocation yang menyertainya
///
/// Pointer di dalam `raw` menunjuk ke allocation di bundle ini, jadi
/// slice-nya valid tepat selama EncodedBuffer hidup. Caller memegang
/// bundle sampai transport selesai mengkonsumsi raw array, lalu drop
/// melepas semua allocation sekaligus, termasuk pada path error.
pub struct EncodedBuffer {
    raw: Box<[RawArgument]>,
    keepalive: Vec<Keepalive>,
}

impl EncodedBuffer {
    pub(crate) fn new(raw: Box<[RawArgument]>, keepalive: Vec<Keepalive>) -> Self {
        Self { raw, keepalive }
    }

    /// Raw argument array untuk diserahkan ke transport
    #[inline(always)]
    pub fn raw(&self) -> &[RawArgument] {
        &self.raw
    }

    /// Jumlah slot di raw array
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Apakah raw array kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Jumlah allocation yang di-keep-alive (string dan array)
    pub fn allocation_count(&self) -> usize {
        self.keepalive.len()
    }
}

// Union di dalam slot tidak bisa derive Debug; laporkan bentuknya saja
impl fmt::Debug for EncodedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedBuffer")
            .field("slots", &self.raw.len())
            .field("allocations", &self.keepalive.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_slot_is_pointer_sized() {
        // Satu slot = satu word; integer menempati 4 byte pertama
        assert_eq!(mem::size_of::<RawArgument>(), mem::size_of::<usize>());
    }

    #[test]
    fn test_encoded_buffer_debug() {
        // Dipakai assertion test (unwrap_err butuh Debug)
        let buffer = EncodedBuffer::new(Box::new([RawArgument::zeroed()]), Vec::new());
        let rendered = format!("{:?}", buffer);
        assert!(rendered.contains("slots: 1"));
        assert!(rendered.contains("allocations: 0"));
    }

    #[test]
    fn test_zeroed_slot() {
        let slot = RawArgument::zeroed();
        // Semua interpretasi slot kosong harus nol/null
        unsafe {
            assert!(slot.s.is_null());
            assert_eq!(slot.o, 0);
            assert_eq!(slot.i, 0);
        }
    }
}
