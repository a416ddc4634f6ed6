//! Internal type representation for the pool.

use disjoin_ir::{Name, TypeId};

/// Type representation stored in the pool.
///
/// Children are `TypeId`s, so equality of two interned structural types is
/// equality of their ids.
///
/// - Primitives are pre-interned with fixed `TypeId` values
/// - `Tuple` and `Record` are structural and deduplicated
/// - `Class` and `Enum` are nominal: every declaration is a fresh type
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    /// Signed integer of the given width.
    Int { bits: u8 },
    /// IEEE float of the given width.
    Float { bits: u8 },
    Bool,
    Char,
    Str,
    /// Bottom type.
    Never,
    /// Tuple; the empty tuple is `()`.
    Tuple(Box<[TypeId]>),
    /// Record with fields sorted by name, no duplicates.
    Record(Box<[(Name, TypeId)]>),
    /// Nominal type with no variants.
    Class { name: Name, parent: Option<TypeId> },
    /// Nominal sum type. Each variant has exactly one payload type; a tag
    /// without payload carries `()`.
    Enum {
        name: Name,
        parent: Option<TypeId>,
        variants: Box<[(Name, TypeId)]>,
    },
}

impl TypeData {
    /// Parent in the nominal hierarchy.
    pub fn parent(&self) -> Option<TypeId> {
        match self {
            TypeData::Class { parent, .. } | TypeData::Enum { parent, .. } => *parent,
            _ => None,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, TypeData::Class { .. } | TypeData::Enum { .. })
    }
}
