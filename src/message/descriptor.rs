//! Message Descriptor
//!
//! Record immutable yang mengikat nama method, signature, dan type
//! table-nya. Object/proxy layer memanggil encode/decode lewat sini;
//! accessor nama dan signature string dipakai layer registrasi untuk
//! mendaftarkan method ke protocol runtime.

use crate::error::MarshalError;
use crate::marshal::{
    decode_arguments, encode_arguments, EncodedBuffer, RawArgument, Value, ValueList,
};
use crate::object::{InterfaceTypeRef, ObjectTable};
use crate::signature::Signature;

/// Metadata satu protocol method plus kedua entry point codec
///
/// Immutable setelah konstruksi; aman dipakai banyak thread yang
/// encode/decode pesan berbeda secara paralel.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    name: &'static str,
    signature_str: &'static str,
    signature: Signature,
    types: &'static [InterfaceTypeRef],
}

impl MessageDescriptor {
    /// Bangun descriptor dari definisi method
    ///
    /// Signature di-parse sekali di sini; huruf di luar grammar
    /// menghasilkan `UnsupportedKind`.
    ///
    /// # Panics
    /// Panic kalau panjang type table != jumlah argumen signature.
    /// Itu invariant konstruksi yang hanya bisa dilanggar protocol
    /// definition yang malformed.
    pub fn new(
        name: &'static str,
        signature_str: &'static str,
        types: &'static [InterfaceTypeRef],
    ) -> Result<Self, MarshalError> {
        let signature = Signature::parse(signature_str)?;
        assert_eq!(
            types.len(),
            signature.len(),
            "type table length must match signature argument count"
        );

        Ok(Self {
            name,
            signature_str,
            signature,
            types,
        })
    }

    /// Encode argumen call keluar jadi raw array + ownership bundle
    pub fn encode(&self, values: &[Value]) -> Result<EncodedBuffer, MarshalError> {
        encode_arguments(&self.signature, self.types, values)
    }

    /// Decode raw array pesan masuk jadi typed values
    pub fn decode(
        &self,
        raw: &[RawArgument],
        objects: &mut ObjectTable,
    ) -> Result<ValueList, MarshalError> {
        decode_arguments(&self.signature, self.types, raw, objects)
    }

    /// Nama method, untuk registrasi ke protocol runtime
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signature string mentah seperti di protocol definition
    pub fn signature_str(&self) -> &'static str {
        self.signature_str
    }

    /// Signature hasil parse
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Type table, sejajar 1:1 dengan argumen signature
    pub fn types(&self) -> &'static [InterfaceTypeRef] {
        self.types
    }
}
