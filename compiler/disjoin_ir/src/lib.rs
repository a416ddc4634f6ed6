//! Disjoin IR - the input side of the or-pattern compiler.
//!
//! This crate holds the data the matcher consumes from the surrounding
//! front end:
//! - Spans for source locations
//! - Names for interned identifiers (tags, fields, bound variables)
//! - `TypeId` handles into the type pool owned by `disjoin_types`
//! - Parsed pattern trees (`MatchPattern`)
//! - Scrutinee paths used to address sub-values of a matched value
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Own the tree**: each sub-pattern is owned by its parent, so a walk
//!   never needs an arena or shared mutable state
//! - Every type is `Clone + Eq + Hash + Debug` so compiled artifacts can be
//!   compared structurally in tests and cached by callers.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod literal;
mod name;
mod path;
pub mod pattern;
mod span;
mod type_id;

pub use interner::{InternError, StringInterner};
pub use literal::{Literal, LiteralKind};
pub use name::Name;
pub use path::{format_path, PathInstruction, ScrutineePath};
pub use pattern::{FieldPattern, MatchPattern, PatternKind};
pub use span::Span;
pub use type_id::TypeId;
