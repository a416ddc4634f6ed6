//! Scrutinee paths.
//!
//! A path addresses a sub-value of the matched value from the root. Paths are
//! the unit the shape check compares: two bindings correspond iff their paths
//! are equal.

use smallvec::SmallVec;

use crate::Name;

/// A single step from a value to one of its components.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathInstruction {
    /// Step into the payload of a tagged variant.
    ///
    /// The tag is not part of the step: `A(x) | B(x)` binds `x` at the
    /// same path.
    Payload,
    /// Step into tuple element `i`.
    TupleIndex(u32),
    /// Step into a named record field.
    Field(Name),
}

/// Sequence of steps from the root scrutinee. Empty means the root.
pub type ScrutineePath = SmallVec<[PathInstruction; 4]>;

/// Render a path as `$`, `$.payload.0.name` and so on.
pub fn format_path(path: &[PathInstruction], format_name: &dyn Fn(Name) -> String) -> String {
    let mut out = String::from("$");
    for step in path {
        out.push('.');
        match step {
            PathInstruction::Payload => out.push_str("payload"),
            PathInstruction::TupleIndex(i) => out.push_str(&i.to_string()),
            PathInstruction::Field(name) => out.push_str(&format_name(*name)),
        }
    }
    out
}
