//! Interned type identifier.

use std::fmt;

/// Handle into a `disjoin_types::Pool`.
///
/// Equality is identity of the interned entry: two `TypeId`s are equal iff
/// they name the same type.
///
/// # Pre-interned Types
/// Primitive types occupy fixed indices `0..FIRST_DYNAMIC`. Every pool
/// reserves these slots before interning anything else, so the constants
/// below are valid against any pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const I8: TypeId = TypeId(0);
    pub const I16: TypeId = TypeId(1);
    pub const I32: TypeId = TypeId(2);
    pub const I64: TypeId = TypeId(3);
    pub const F32: TypeId = TypeId(4);
    pub const F64: TypeId = TypeId(5);
    pub const BOOL: TypeId = TypeId(6);
    pub const CHAR: TypeId = TypeId(7);
    pub const STR: TypeId = TypeId(8);
    /// The zero-element tuple.
    pub const UNIT: TypeId = TypeId(9);
    /// Bottom type; a subtype of everything.
    pub const NEVER: TypeId = TypeId(10);

    /// First index handed out for declared and structural types.
    pub const FIRST_DYNAMIC: u32 = 11;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Name of a pre-interned type, if this is one.
    pub const fn primitive_name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "i8",
            1 => "i16",
            2 => "i32",
            3 => "i64",
            4 => "f32",
            5 => "f64",
            6 => "bool",
            7 => "char",
            8 => "str",
            9 => "()",
            10 => "never",
            _ => return None,
        })
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "TypeId({name})"),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}
