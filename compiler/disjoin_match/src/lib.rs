//! Or-pattern compiler.
//!
//! Compiles a pattern whose alternatives are joined by `|` into:
//! - a [`DecisionProcedure`] that picks the leftmost alternative accepting a
//!   runtime value, and
//! - a [`BindingEnvironment`] giving every bound name one type, valid no
//!   matter which alternative fired.
//!
//! # Pipeline
//!
//! Each or-pattern runs four phases in a fixed order; the first failure is
//! the only error reported.
//!
//! 1. [`shape`]: every alternative binds the same names at the same paths,
//!    and corresponding positions have compatible shapes.
//! 2. [`collect`]: lays each alternative over the scrutinee type and records
//!    one [`BindingSite`] per binding. Nested or-patterns are compiled here,
//!    innermost first.
//! 3. [`reconcile`]: joins each name's types in the type lattice.
//! 4. [`MatchCompiler`] emits the decision procedure.
//!
//! Types come from the caller through the `disjoin_types` [`Lattice`] and
//! [`TypeShapes`] capabilities; the compiler never writes to the order.
//!
//! [`Lattice`]: disjoin_types::Lattice
//! [`TypeShapes`]: disjoin_types::TypeShapes

mod batch;
pub mod collect;
mod compile;
mod error;
mod options;
mod procedure;
pub mod reconcile;
pub mod shape;
mod stack;
mod value;

#[cfg(test)]
mod test_helpers;

pub use collect::{BindingEvidence, BindingSite};
pub use compile::{CompiledPattern, MatchCompiler};
pub use error::{ImplicatedSite, MatchError, MatchErrorKind, ScrutineeProblem, ShapeProblem};
pub use options::CompileOptions;
pub use procedure::{
    Arm, BindingSlot, BoundValue, Check, Conversion, DecisionProcedure, Selection, TagDispatch,
};
pub use reconcile::{BindingEnvironment, EnvEntry, TypeOrigin};
pub use shape::{ShapeClass, ShapeSummary};
pub use value::Value;
