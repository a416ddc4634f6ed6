//! The match compiler driver.
//!
//! Runs shape validation, binding collection and type reconciliation over an
//! or-pattern, then emits a decision procedure for it.

mod emit;

use disjoin_ir::{MatchPattern, PatternKind, ScrutineePath, Span, TypeId};
use disjoin_types::{Lattice, TypeShapes};

use crate::error::{ImplicatedSite, MatchError, ShapeProblem};
use crate::{collect, reconcile, shape, BindingEnvironment, CompileOptions, DecisionProcedure};

/// A compiled (or-)pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledPattern {
    pub procedure: DecisionProcedure,
    pub environment: BindingEnvironment,
}

/// Compiles patterns against types supplied by the caller.
///
/// The compiler only reads from `types`; several compilers may share one
/// pool across threads.
pub struct MatchCompiler<'a, T: ?Sized> {
    types: &'a T,
    options: CompileOptions,
}

impl<'a, T: ?Sized> MatchCompiler<'a, T> {
    pub fn new(types: &'a T, options: CompileOptions) -> Self {
        MatchCompiler { types, options }
    }

    #[inline]
    pub fn types(&self) -> &'a T {
        self.types
    }

    #[inline]
    pub fn options(&self) -> CompileOptions {
        self.options
    }
}

impl<T: Lattice + TypeShapes + ?Sized> MatchCompiler<'_, T> {
    /// Compile `pattern` against a scrutinee of type `scrutinee`.
    ///
    /// A pattern that is not an or-pattern compiles as a single alternative.
    /// An or-pattern with fewer than two alternatives is rejected.
    #[tracing::instrument(level = "debug", skip_all, fields(scrutinee = ?scrutinee))]
    pub fn compile(
        &self,
        pattern: &MatchPattern,
        scrutinee: TypeId,
    ) -> Result<CompiledPattern, MatchError> {
        let root = ScrutineePath::new();
        let result = match &pattern.kind {
            PatternKind::Or(alternatives) => {
                self.compile_or(alternatives, scrutinee, &root, pattern.span)
            }
            _ => self.compile_alternatives(
                std::slice::from_ref(pattern),
                scrutinee,
                &root,
                pattern.span,
            ),
        };
        match &result {
            Ok(compiled) => tracing::debug!(
                arms = compiled.procedure.arms.len(),
                bindings = compiled.environment.len(),
                dispatch = compiled.procedure.dispatch.is_some(),
                "compiled"
            ),
            Err(err) => tracing::debug!(code = %err.code(), "rejected"),
        }
        result
    }

    /// Compile the alternatives of one or-pattern found at `base`.
    pub(crate) fn compile_or(
        &self,
        alternatives: &[MatchPattern],
        scrutinee: TypeId,
        base: &ScrutineePath,
        span: Span,
    ) -> Result<CompiledPattern, MatchError> {
        if alternatives.len() < 2 {
            let sites = alternatives
                .iter()
                .enumerate()
                .map(|(i, alt)| ImplicatedSite::new(i, alt.span))
                .collect();
            return Err(MatchError::shape(
                ShapeProblem::DegenerateOr {
                    count: alternatives.len(),
                },
                span,
                sites,
            ));
        }
        self.compile_alternatives(alternatives, scrutinee, base, span)
    }

    fn compile_alternatives(
        &self,
        alternatives: &[MatchPattern],
        scrutinee: TypeId,
        base: &ScrutineePath,
        span: Span,
    ) -> Result<CompiledPattern, MatchError> {
        let summary = shape::validate(alternatives, base, span)?;
        let evidence = collect::collect(self, alternatives, &summary, scrutinee, base)?;
        let environment = reconcile::reconcile(self.types, &evidence, span)?;
        let procedure = emit::emit(alternatives, &evidence, &environment, base, self.options)?;
        Ok(CompiledPattern {
            procedure,
            environment,
        })
    }
}
