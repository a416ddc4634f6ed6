//! Interned type store.
//!
//! Follows the interner layout used for strings: a single `RwLock` guarding a
//! `Vec` of entries plus a dedup map. Structural types (tuples, records) are
//! deduplicated; nominal declarations always allocate.
//!
//! # Thread Safety
//! Queries take `&self`. The lattice may intern new structural types while
//! computing a join, so the store sits behind a `parking_lot::RwLock` and
//! `&Pool` can be shared across the threads of a batch compilation.
//! Interning is idempotent, so concurrent joins never disagree.

mod format;

use disjoin_ir::{Name, TypeId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{TypeData, TypeFlags};

struct PoolInner {
    items: Vec<TypeData>,
    flags: Vec<TypeFlags>,
    /// Dedup map for structural types only.
    intern_map: FxHashMap<TypeData, TypeId>,
}

/// Interned type pool.
pub struct Pool {
    inner: RwLock<PoolInner>,
}

impl Pool {
    /// Create a new pool with pre-interned primitives.
    pub fn new() -> Self {
        // Order must match the `TypeId` constants.
        let primitives = [
            TypeData::Int { bits: 8 },   // I8
            TypeData::Int { bits: 16 },  // I16
            TypeData::Int { bits: 32 },  // I32
            TypeData::Int { bits: 64 },  // I64
            TypeData::Float { bits: 32 }, // F32
            TypeData::Float { bits: 64 }, // F64
            TypeData::Bool,
            TypeData::Char,
            TypeData::Str,
            TypeData::Tuple(Vec::new().into_boxed_slice()), // UNIT
            TypeData::Never,
        ];

        let mut inner = PoolInner {
            items: Vec::with_capacity(64),
            flags: Vec::with_capacity(64),
            intern_map: FxHashMap::default(),
        };
        for data in primitives {
            let flags = compute_flags(&inner.flags, &data);
            let id = TypeId::from_raw(len_u32(&inner.items));
            inner.intern_map.insert(data.clone(), id);
            inner.items.push(data);
            inner.flags.push(flags);
        }
        debug_assert_eq!(inner.items.len(), TypeId::FIRST_DYNAMIC as usize);

        Pool {
            inner: RwLock::new(inner),
        }
    }

    /// Number of types in the pool, primitives included.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `ty` was allocated by this pool.
    pub fn contains(&self, ty: TypeId) -> bool {
        ty.index() < self.len()
    }

    /// Clone out the data for a type. `None` for ids foreign to this pool.
    pub fn get(&self, ty: TypeId) -> Option<TypeData> {
        self.inner.read().items.get(ty.index()).cloned()
    }

    /// Cached flags; empty for foreign ids.
    pub fn flags(&self, ty: TypeId) -> TypeFlags {
        self.inner
            .read()
            .flags
            .get(ty.index())
            .copied()
            .unwrap_or(TypeFlags::empty())
    }

    /// Parent of a nominal type.
    pub fn parent(&self, ty: TypeId) -> Option<TypeId> {
        self.inner
            .read()
            .items
            .get(ty.index())
            .and_then(TypeData::parent)
    }

    // === Nominal Declarations ===

    /// Declare a class.
    ///
    /// `parent` must be a previously declared class or enum; any other
    /// parent is ignored.
    pub fn declare_class(&mut self, name: Name, parent: Option<TypeId>) -> TypeId {
        let parent = self.nominal_parent(parent);
        self.push(TypeData::Class { name, parent })
    }

    /// Declare an enum with its variants in declaration order.
    ///
    /// A variant without payload should use `TypeId::UNIT`.
    pub fn declare_enum(
        &mut self,
        name: Name,
        parent: Option<TypeId>,
        variants: &[(Name, TypeId)],
    ) -> TypeId {
        let parent = self.nominal_parent(parent);
        self.push(TypeData::Enum {
            name,
            parent,
            variants: variants.into(),
        })
    }

    fn nominal_parent(&mut self, parent: Option<TypeId>) -> Option<TypeId> {
        let inner = self.inner.get_mut();
        parent.filter(|p| inner.items.get(p.index()).is_some_and(TypeData::is_nominal))
    }

    fn push(&mut self, data: TypeData) -> TypeId {
        let inner = self.inner.get_mut();
        let flags = compute_flags(&inner.flags, &data);
        let id = TypeId::from_raw(len_u32(&inner.items));
        inner.items.push(data);
        inner.flags.push(flags);
        id
    }

    // === Structural Constructors ===

    /// Intern a tuple type. Empty tuples return `TypeId::UNIT`.
    pub fn tuple(&self, elems: &[TypeId]) -> TypeId {
        if elems.is_empty() {
            return TypeId::UNIT;
        }
        self.intern(TypeData::Tuple(elems.into()))
    }

    /// Intern a record type.
    ///
    /// Fields are sorted by name; when a name repeats, the first occurrence
    /// wins.
    pub fn record(&self, fields: &[(Name, TypeId)]) -> TypeId {
        let mut sorted = fields.to_vec();
        sorted.sort_by_key(|&(name, _)| name);
        sorted.dedup_by_key(|&mut (name, _)| name);
        self.intern(TypeData::Record(sorted.into_boxed_slice()))
    }

    fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.inner.read().intern_map.get(&data) {
            return id;
        }

        let mut guard = self.inner.write();
        if let Some(&id) = guard.intern_map.get(&data) {
            return id;
        }

        let flags = compute_flags(&guard.flags, &data);
        let id = TypeId::from_raw(len_u32(&guard.items));
        guard.intern_map.insert(data.clone(), id);
        guard.items.push(data);
        guard.flags.push(flags);
        tracing::trace!(?id, "interned structural type");
        id
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

fn len_u32(items: &[TypeData]) -> u32 {
    // Four billion types would exhaust memory long before this saturates.
    u32::try_from(items.len()).unwrap_or(u32::MAX)
}

fn compute_flags(existing: &[TypeFlags], data: &TypeData) -> TypeFlags {
    let child = |ty: &TypeId| existing.get(ty.index()).copied().unwrap_or(TypeFlags::empty());
    match data {
        TypeData::Int { .. } | TypeData::Float { .. } => {
            TypeFlags::IS_PRIMITIVE | TypeFlags::IS_NUMERIC
        }
        TypeData::Bool | TypeData::Char | TypeData::Str => TypeFlags::IS_PRIMITIVE,
        TypeData::Never => TypeFlags::IS_PRIMITIVE | TypeFlags::IS_NEVER,
        TypeData::Tuple(elems) if elems.is_empty() => TypeFlags::IS_PRIMITIVE,
        TypeData::Tuple(elems) => {
            TypeFlags::IS_STRUCTURAL | TypeFlags::propagate_all(elems.iter().map(child))
        }
        TypeData::Record(fields) => {
            TypeFlags::IS_STRUCTURAL
                | TypeFlags::propagate_all(fields.iter().map(|(_, ty)| child(ty)))
        }
        TypeData::Class { .. } => TypeFlags::IS_NOMINAL | TypeFlags::HAS_NOMINAL,
        TypeData::Enum { .. } => {
            TypeFlags::IS_NOMINAL | TypeFlags::HAS_NOMINAL | TypeFlags::IS_SUM
        }
    }
}
