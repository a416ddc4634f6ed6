//! Subtype order and join.
//!
//! The order:
//! - reflexive, with `never` below everything
//! - `i8 <: i16 <: i32 <: i64` and `f32 <: f64`
//! - nominal types follow their declared parent chain
//! - tuples are covariant and need equal arity
//! - records use width and depth subtyping, except that the empty record
//!   `{}` is above no record but itself
//!
//! There is no top type, so `join` is partial.

use disjoin_ir::{Name, TypeId};
use rustc_hash::FxHashSet;

use crate::{Pool, TypeData, TypeFlags};

/// A partial order over types with a (partial) least upper bound.
///
/// Implementations must be readable concurrently: the pattern compiler may
/// query one lattice from several threads.
pub trait Lattice {
    /// `sub <: sup`.
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool;

    /// Least common supertype, if one exists.
    fn join(&self, a: TypeId, b: TypeId) -> Option<TypeId>;

    /// Join of a non-empty sequence; `None` for an empty one.
    fn join_all(&self, types: &[TypeId]) -> Option<TypeId> {
        let (&first, rest) = types.split_first()?;
        rest.iter()
            .try_fold(first, |acc, &ty| self.join(acc, ty))
    }
}

impl Lattice for Pool {
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup || sub == TypeId::NEVER {
            return true;
        }
        let sub_flags = self.flags(sub);
        if sub_flags.is_rigid() || self.flags(sup).is_rigid() {
            return false;
        }

        let (Some(sub_data), Some(sup_data)) = (self.get(sub), self.get(sup)) else {
            return false;
        };
        match (&sub_data, &sup_data) {
            (TypeData::Int { bits: a }, TypeData::Int { bits: b })
            | (TypeData::Float { bits: a }, TypeData::Float { bits: b }) => a <= b,
            (TypeData::Tuple(xs), TypeData::Tuple(ys)) => {
                xs.len() == ys.len()
                    && xs.iter().zip(ys.iter()).all(|(&x, &y)| self.is_subtype(x, y))
            }
            (TypeData::Record(xs), TypeData::Record(ys)) => {
                !ys.is_empty()
                    && ys.iter().all(|&(field, y)| {
                        field_type(xs, field).is_some_and(|x| self.is_subtype(x, y))
                    })
            }
            _ if sub_flags.contains(TypeFlags::IS_NOMINAL) => {
                self.ancestors(sub).any(|ancestor| ancestor == sup)
            }
            _ => false,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn join(&self, a: TypeId, b: TypeId) -> Option<TypeId> {
        if self.is_subtype(a, b) {
            return Some(b);
        }
        if self.is_subtype(b, a) {
            return Some(a);
        }

        let (a_data, b_data) = (self.get(a)?, self.get(b)?);
        match (&a_data, &b_data) {
            (TypeData::Tuple(xs), TypeData::Tuple(ys)) if xs.len() == ys.len() => {
                let joined = xs
                    .iter()
                    .zip(ys.iter())
                    .map(|(&x, &y)| self.join(x, y))
                    .collect::<Option<Vec<_>>>()?;
                Some(self.tuple(&joined))
            }
            (TypeData::Record(xs), TypeData::Record(ys)) => {
                let common: Vec<(Name, TypeId)> = xs
                    .iter()
                    .filter_map(|&(field, x)| {
                        let y = field_type(ys, field)?;
                        Some((field, self.join(x, y)?))
                    })
                    .collect();
                if common.is_empty() {
                    return None;
                }
                Some(self.record(&common))
            }
            _ if a_data.is_nominal() && b_data.is_nominal() => {
                let a_chain: FxHashSet<TypeId> = self.ancestors(a).collect();
                self.ancestors(b).find(|ancestor| a_chain.contains(ancestor))
            }
            _ => None,
        }
    }
}

impl Pool {
    /// `ty` followed by its parent chain.
    ///
    /// Parents are always declared before their children, so the chain is
    /// strictly decreasing in id and terminates.
    fn ancestors(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(ty), move |&current| {
            self.parent(current).filter(|p| p.raw() < current.raw())
        })
    }
}

fn field_type(fields: &[(Name, TypeId)], name: Name) -> Option<TypeId> {
    fields
        .binary_search_by_key(&name, |&(field, _)| field)
        .ok()
        .map(|i| fields[i].1)
}
