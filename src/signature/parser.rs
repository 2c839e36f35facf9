//! Signature Scanner
//!
//! Grammar:
//! `signature := version? token*`
//! `version   := digit+`
//! `token     := "?"? kind`
//! `kind      := i | u | f | s | o | n | a | h`
//!
//! Digit di awal adalah version marker pada event token, bukan argumen:
//! dikenali lalu di-skip, tidak pernah menghasilkan ArgSpec.

use smallvec::SmallVec;

use crate::error::MarshalError;
use crate::object::InterfaceTypeRef;

/// Jenis argumen dalam wire protocol
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Signed 32-bit integer (`i`)
    Int32 = 1,
    /// Unsigned 32-bit integer (`u`)
    Uint32 = 2,
    /// Signed 24.8 fixed-point, dikirim sebagai i32 skala 256 (`f`)
    Fixed = 3,
    /// File descriptor (`h`)
    Fd = 4,
    /// String UTF-8 null-terminated (`s`)
    Str = 5,
    /// Referensi object hidup (`o`)
    Object = 6,
    /// Object yang baru dibuat sebagai efek call (`n`)
    NewId = 7,
    /// Buffer byte opaque (`a`)
    Array = 8,
}

impl ArgKind {
    /// Lookup dari huruf signature
    #[inline(always)]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::Int32),
            'u' => Some(Self::Uint32),
            'f' => Some(Self::Fixed),
            'h' => Some(Self::Fd),
            's' => Some(Self::Str),
            'o' => Some(Self::Object),
            'n' => Some(Self::NewId),
            'a' => Some(Self::Array),
            _ => None,
        }
    }

    /// Huruf signature untuk kind ini
    #[inline(always)]
    pub fn to_char(self) -> char {
        match self {
            Self::Int32 => 'i',
            Self::Uint32 => 'u',
            Self::Fixed => 'f',
            Self::Fd => 'h',
            Self::Str => 's',
            Self::Object => 'o',
            Self::NewId => 'n',
            Self::Array => 'a',
        }
    }
}

/// Satu slot argumen: kind + nullable flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub kind: ArgKind,
    pub nullable: bool,
}

/// Urutan ArgSpec hasil scan signature string
///
/// Urutan elemen adalah urutan wire yang canonical. Immutable setelah
/// parse; signature protocol hampir selalu <= 8 argumen sehingga
/// storage-nya inline tanpa alokasi heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    specs: SmallVec<[ArgSpec; 8]>,
}

impl Signature {
    /// Scan signature string jadi daftar ArgSpec
    ///
    /// Total untuk input yang mengikuti grammar; `UnsupportedKind`
    /// hanya untuk huruf di luar grammar atau `?` yang menggantung.
    pub fn parse(signature: &str) -> Result<Self, MarshalError> {
        let mut chars = signature.chars().peekable();

        // Version marker: digit di awal bukan argumen
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                chars.next();
            } else {
                break;
            }
        }

        let mut specs = SmallVec::new();
        while let Some(c) = chars.next() {
            let (nullable, letter) = if c == '?' {
                match chars.next() {
                    Some(k) => (true, k),
                    None => return Err(MarshalError::UnsupportedKind { letter: '?' }),
                }
            } else {
                (false, c)
            };

            let kind =
                ArgKind::from_char(letter).ok_or(MarshalError::UnsupportedKind { letter })?;
            specs.push(ArgSpec { kind, nullable });
        }

        Ok(Self { specs })
    }

    /// Jumlah argumen (bukan lebar raw array, lihat `raw_len`)
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Apakah signature tanpa argumen
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// ArgSpec dalam urutan wire
    #[inline(always)]
    pub fn as_slice(&self) -> &[ArgSpec] {
        &self.specs
    }

    /// Lebar raw argument array untuk signature ini
    ///
    /// New-id generic (type table entry `None`) memakai tiga slot di
    /// wire: nama interface (`s`), versi (`u`), lalu id (`n`). Semua
    /// kombinasi lain memakai satu slot.
    pub fn raw_len(&self, types: &[InterfaceTypeRef]) -> usize {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                if spec.kind == ArgKind::NewId && types.get(i).copied().flatten().is_none() {
                    3
                } else {
                    1
                }
            })
            .sum()
    }
}
