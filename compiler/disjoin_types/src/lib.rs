//! Type universe for the pattern compiler.
//!
//! The matcher never builds types of its own; it asks two capabilities:
//! - [`Lattice`]: the subtype order and its join
//! - [`TypeShapes`]: what a type looks like structurally (variants, tuple
//!   elements, record fields, literal inhabitants)
//!
//! [`Pool`] implements both over an interned store of [`TypeData`]. Any other
//! checker that wants to drive the matcher only has to implement the two
//! traits.

mod data;
mod flags;
mod lattice;
mod pool;
mod shapes;

pub use data::TypeData;
pub use flags::TypeFlags;
pub use lattice::Lattice;
pub use pool::Pool;
pub use shapes::TypeShapes;
