//! Parallel compilation of independent patterns.

use disjoin_ir::{MatchPattern, TypeId};
use disjoin_types::{Lattice, TypeShapes};
use rayon::prelude::*;

use crate::{CompiledPattern, MatchCompiler, MatchError};

impl<T: Lattice + TypeShapes + Sync + ?Sized> MatchCompiler<'_, T> {
    /// Compile each `(pattern, scrutinee)` pair on the rayon pool.
    ///
    /// Results are in input order. Each pattern is compiled exactly as
    /// [`MatchCompiler::compile`] would; one failure does not affect the rest.
    pub fn compile_batch(
        &self,
        items: &[(MatchPattern, TypeId)],
    ) -> Vec<Result<CompiledPattern, MatchError>> {
        tracing::debug!(patterns = items.len(), "compiling batch");
        items
            .par_iter()
            .map(|(pattern, scrutinee)| self.compile(pattern, *scrutinee))
            .collect()
    }
}
