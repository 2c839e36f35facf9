//! Live-Object Table
//!
//! Table dimiliki connection layer; decoder hanya memakai dua operasi:
//! resolve (lookup object lewat id) dan register (daftarkan object baru
//! hasil new-id). Akses concurrent harus diserialisasi oleh pemilik
//! table, bukan oleh crate ini.

use std::collections::HashMap;

/// Deskripsi statis sebuah protocol interface
///
/// Satu instance per interface, dimiliki protocol definition dan
/// berumur 'static. Dipakai type table untuk slot object/new-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: &'static str,
    pub version: u32,
}

/// Referensi interface untuk satu slot argumen
///
/// `None` berarti generic: interface tidak diketahui secara statis.
/// Entry untuk kind non-object diabaikan dan harus `None`.
pub type InterfaceTypeRef = Option<&'static InterfaceType>;

/// Object hidup di sisi connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Protocol id; 0 tidak pernah dipakai object hidup (0 = null di wire)
    pub id: u32,
    /// Nama interface object ini
    pub interface: String,
    /// Versi interface saat object dibuat
    pub version: u32,
}

impl ObjectRef {
    /// Buat ObjectRef dari interface yang dikenal
    pub fn new(id: u32, interface: &InterfaceType) -> Self {
        Self {
            id,
            interface: interface.name.to_string(),
            version: interface.version,
        }
    }
}

/// Live-object table milik connection
///
/// Decode me-resolve object id lewat table ini dan me-register object
/// baru dari slot new-id. Itu satu-satunya shared state yang disentuh
/// decode path.
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: HashMap<u32, ObjectRef>,
}

impl ObjectTable {
    /// Table kosong
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    /// Daftarkan object hidup; id harus bukan 0 (reserved untuk null)
    pub fn register(&mut self, object: ObjectRef) {
        debug_assert!(object.id != 0, "id 0 is reserved for null");
        self.objects.insert(object.id, object);
    }

    /// Resolve id ke object hidup
    #[inline(always)]
    pub fn resolve(&self, id: u32) -> Option<&ObjectRef> {
        self.objects.get(&id)
    }

    /// Cabut object dari table
    pub fn unregister(&mut self, id: u32) -> Option<ObjectRef> {
        self.objects.remove(&id)
    }

    /// Jumlah object hidup
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Apakah table kosong
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
