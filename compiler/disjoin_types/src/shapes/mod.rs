//! Structural queries the pattern compiler needs from a type.

use disjoin_ir::{Literal, Name, TypeId};

use crate::{Pool, TypeData};

/// What a type looks like to a pattern.
///
/// Every query answers `None`/`false` when the type does not have the asked
/// shape; the caller turns that into a scrutinee mismatch.
pub trait TypeShapes {
    /// Variants of a sum type in declaration order.
    fn variants(&self, ty: TypeId) -> Option<Vec<(Name, TypeId)>>;

    /// Payload type of `tag` in sum type `ty`.
    fn variant_payload(&self, ty: TypeId, tag: Name) -> Option<TypeId> {
        self.variants(ty)?
            .into_iter()
            .find_map(|(t, payload)| (t == tag).then_some(payload))
    }

    /// Element types of a tuple type. `()` has zero elements.
    fn tuple_elements(&self, ty: TypeId) -> Option<Vec<TypeId>>;

    /// All fields of a record type, sorted by name.
    fn record_fields(&self, ty: TypeId) -> Option<Vec<(Name, TypeId)>>;

    fn record_field(&self, ty: TypeId, field: Name) -> Option<TypeId> {
        self.record_fields(ty)?
            .into_iter()
            .find_map(|(f, field_ty)| (f == field).then_some(field_ty))
    }

    /// Whether `literal` is a value of `ty`.
    fn literal_fits(&self, ty: TypeId, literal: &Literal) -> bool;
}

impl TypeShapes for Pool {
    fn variants(&self, ty: TypeId) -> Option<Vec<(Name, TypeId)>> {
        match self.get(ty)? {
            TypeData::Enum { variants, .. } => Some(variants.into_vec()),
            _ => None,
        }
    }

    fn tuple_elements(&self, ty: TypeId) -> Option<Vec<TypeId>> {
        match self.get(ty)? {
            TypeData::Tuple(elems) => Some(elems.into_vec()),
            _ => None,
        }
    }

    fn record_fields(&self, ty: TypeId) -> Option<Vec<(Name, TypeId)>> {
        match self.get(ty)? {
            TypeData::Record(fields) => Some(fields.into_vec()),
            _ => None,
        }
    }

    fn literal_fits(&self, ty: TypeId, literal: &Literal) -> bool {
        match (self.get(ty), literal) {
            (Some(TypeData::Int { bits }), Literal::Int(value)) => int_fits(*value, bits),
            (Some(TypeData::Bool), Literal::Bool(_))
            | (Some(TypeData::Char), Literal::Char(_))
            | (Some(TypeData::Str), Literal::Str(_)) => true,
            _ => false,
        }
    }
}

fn int_fits(value: i64, bits: u8) -> bool {
    match bits {
        8 => i8::try_from(value).is_ok(),
        16 => i16::try_from(value).is_ok(),
        32 => i32::try_from(value).is_ok(),
        _ => true,
    }
}
