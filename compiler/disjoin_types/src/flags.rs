//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once at interning time and cached, so the lattice
//! can route a query without cloning `TypeData` out of the pool.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Category Flags ===

        /// Built-in primitive type (i32, bool, etc.).
        const IS_PRIMITIVE = 1 << 0;
        /// Integer or float.
        const IS_NUMERIC = 1 << 1;
        /// Declared class or enum.
        const IS_NOMINAL = 1 << 2;
        /// Tuple or record.
        const IS_STRUCTURAL = 1 << 3;
        /// Enum with variants a pattern can dispatch on.
        const IS_SUM = 1 << 4;
        /// The bottom type.
        const IS_NEVER = 1 << 5;

        // === Presence Flags ===

        /// Contains a nominal type somewhere inside.
        const HAS_NOMINAL = 1 << 8;
    }
}

impl TypeFlags {
    /// Flags inherited from children when building a compound type.
    pub const PROPAGATE_MASK: Self = Self::HAS_NOMINAL;

    /// Combine propagated flags from multiple children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        let mut result = Self::empty();
        for child in children {
            result = result.union(child.intersection(Self::PROPAGATE_MASK));
        }
        result
    }

    /// A primitive outside the numeric chains: its only proper subtype is
    /// `never` and it has no proper supertype.
    #[inline]
    pub const fn is_rigid(self) -> bool {
        self.contains(Self::IS_PRIMITIVE)
            && !self.intersects(Self::IS_NUMERIC.union(Self::IS_NEVER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagation_keeps_only_presence_flags() {
        let child = TypeFlags::IS_NOMINAL | TypeFlags::HAS_NOMINAL | TypeFlags::IS_SUM;
        let parent = TypeFlags::propagate_all([child, TypeFlags::IS_PRIMITIVE]);
        assert_eq!(parent, TypeFlags::HAS_NOMINAL);
    }

    #[test]
    fn rigidity() {
        assert!(TypeFlags::IS_PRIMITIVE.is_rigid());
        assert!(!(TypeFlags::IS_PRIMITIVE | TypeFlags::IS_NUMERIC).is_rigid());
        assert!(!(TypeFlags::IS_PRIMITIVE | TypeFlags::IS_NEVER).is_rigid());
        assert!(!TypeFlags::IS_NOMINAL.is_rigid());
    }
}
