//! Binding collection.
//!
//! Lays each alternative over the scrutinee type, propagating the expected
//! type inward (variant payload, tuple element, record field), and records a
//! [`BindingSite`] for every binding. No types are reconciled here.
//!
//! A nested or-pattern is compiled in full against the type expected at its
//! position. Each entry of its environment becomes one site, at the path the
//! nested procedure binds it.

use disjoin_ir::{
    Literal, MatchPattern, Name, PathInstruction, PatternKind, ScrutineePath, Span, TypeId,
};
use disjoin_types::{Lattice, TypeShapes};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::compile::{CompiledPattern, MatchCompiler};
use crate::error::{MatchError, ScrutineeProblem};
use crate::reconcile::TypeOrigin;
use crate::shape::{tuple_index, ShapeSummary};
use crate::stack::ensure_sufficient_stack;

/// One occurrence of a bound name in one alternative.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BindingSite {
    pub name: Name,
    pub alternative: usize,
    pub ascription: Option<TypeId>,
    /// Type the scrutinee gives this position.
    pub inferred: TypeId,
    pub path: ScrutineePath,
    pub span: Span,
    /// Stands for the reconciled binding of a nested or-pattern.
    pub nested: bool,
}

impl BindingSite {
    /// The ascription if present, else the positional type.
    #[inline]
    pub fn effective_type(&self) -> TypeId {
        self.ascription.unwrap_or(self.inferred)
    }
}

/// Everything the collector learned about one or-pattern.
#[derive(Clone, Debug)]
pub struct BindingEvidence {
    /// Canonical names from shape validation.
    pub names: Vec<Name>,
    pub alternatives: usize,
    sites: FxHashMap<Name, SmallVec<[BindingSite; 4]>>,
    nested: FxHashMap<(usize, ScrutineePath), CompiledPattern>,
}

impl BindingEvidence {
    /// Sites of `name` in alternative order.
    pub fn sites(&self, name: Name) -> &[BindingSite] {
        self.sites.get(&name).map_or(&[], |sites| sites.as_slice())
    }

    pub fn site(&self, name: Name, alternative: usize) -> Option<&BindingSite> {
        self.sites(name).iter().find(|s| s.alternative == alternative)
    }

    /// Compiled nested or-pattern at `path` inside `alternative`.
    pub fn nested(&self, alternative: usize, path: &ScrutineePath) -> Option<&CompiledPattern> {
        self.nested.get(&(alternative, path.clone()))
    }
}

struct Collector<'c, 'a, T: ?Sized> {
    compiler: &'c MatchCompiler<'a, T>,
    summary: &'c ShapeSummary,
    alternative: usize,
    sites: FxHashMap<Name, SmallVec<[BindingSite; 4]>>,
    nested: FxHashMap<(usize, ScrutineePath), CompiledPattern>,
}

/// Collect binding sites for the alternatives of one or-pattern.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(alternatives = alternatives.len(), scrutinee = ?scrutinee)
)]
pub fn collect<T: Lattice + TypeShapes + ?Sized>(
    compiler: &MatchCompiler<'_, T>,
    alternatives: &[MatchPattern],
    summary: &ShapeSummary,
    scrutinee: TypeId,
    base: &ScrutineePath,
) -> Result<BindingEvidence, MatchError> {
    let mut collector = Collector {
        compiler,
        summary,
        alternative: 0,
        sites: FxHashMap::default(),
        nested: FxHashMap::default(),
    };
    for (index, alternative) in alternatives.iter().enumerate() {
        collector.alternative = index;
        let mut path = base.clone();
        collector.walk(alternative, scrutinee, &mut path)?;
    }

    Ok(BindingEvidence {
        names: summary.names.clone(),
        alternatives: alternatives.len(),
        sites: collector.sites,
        nested: collector.nested,
    })
}

impl<T: Lattice + TypeShapes + ?Sized> Collector<'_, '_, T> {
    fn walk(
        &mut self,
        pattern: &MatchPattern,
        expected: TypeId,
        path: &mut ScrutineePath,
    ) -> Result<(), MatchError> {
        ensure_sufficient_stack(|| match &pattern.kind {
            PatternKind::Wildcard => Ok(()),
            PatternKind::Binding { name, ascription } => {
                self.record(*name, *ascription, expected, path, pattern.span, false)
            }
            PatternKind::Literal(literal) => {
                self.check_literal(literal, expected, path, pattern.span)
            }
            PatternKind::Variant { tag, inner } => {
                let types = self.compiler.types();
                let Some(variants) = types.variants(expected) else {
                    return Err(self.mismatch(
                        path,
                        expected,
                        ScrutineeProblem::NotASumType,
                        pattern.span,
                    ));
                };
                let Some(&(_, payload)) = variants.iter().find(|(t, _)| t == tag) else {
                    return Err(self.mismatch(
                        path,
                        expected,
                        ScrutineeProblem::UnknownTag { tag: *tag },
                        pattern.span,
                    ));
                };
                path.push(PathInstruction::Payload);
                let result = self.walk(inner, payload, path);
                path.pop();
                result
            }
            PatternKind::Tuple(elements) => {
                let Some(element_types) = self.compiler.types().tuple_elements(expected) else {
                    return Err(self.mismatch(
                        path,
                        expected,
                        ScrutineeProblem::NotATuple {
                            arity: elements.len(),
                        },
                        pattern.span,
                    ));
                };
                if element_types.len() != elements.len() {
                    return Err(self.mismatch(
                        path,
                        expected,
                        ScrutineeProblem::TupleArity {
                            expected: element_types.len(),
                            found: elements.len(),
                        },
                        pattern.span,
                    ));
                }
                for (i, (element, &ty)) in elements.iter().zip(&element_types).enumerate() {
                    path.push(PathInstruction::TupleIndex(tuple_index(i)));
                    let result = self.walk(element, ty, path);
                    path.pop();
                    result?;
                }
                Ok(())
            }
            PatternKind::Record { fields, rest } => {
                let Some(field_types) = self.compiler.types().record_fields(expected) else {
                    return Err(self.mismatch(
                        path,
                        expected,
                        ScrutineeProblem::NotARecord,
                        pattern.span,
                    ));
                };
                for field in fields {
                    let Some(&(_, ty)) = field_types.iter().find(|(f, _)| *f == field.name) else {
                        return Err(self.mismatch(
                            path,
                            expected,
                            ScrutineeProblem::UnknownField { field: field.name },
                            field.span,
                        ));
                    };
                    path.push(PathInstruction::Field(field.name));
                    let result = self.walk(&field.pattern, ty, path);
                    path.pop();
                    result?;
                }
                if !*rest {
                    let missing: Vec<Name> = field_types
                        .iter()
                        .map(|&(f, _)| f)
                        .filter(|f| !fields.iter().any(|field| field.name == *f))
                        .collect();
                    if !missing.is_empty() {
                        return Err(self.mismatch(
                            path,
                            expected,
                            ScrutineeProblem::MissingFields { fields: missing },
                            pattern.span,
                        ));
                    }
                }
                Ok(())
            }
            PatternKind::Or(alternatives) => {
                self.nested_or(alternatives, expected, path, pattern.span)
            }
        })
    }

    fn check_literal(
        &self,
        literal: &Literal,
        expected: TypeId,
        path: &ScrutineePath,
        span: Span,
    ) -> Result<(), MatchError> {
        if self.compiler.types().literal_fits(expected, literal) {
            Ok(())
        } else {
            Err(self.mismatch(
                path,
                expected,
                ScrutineeProblem::LiteralMismatch { literal: *literal },
                span,
            ))
        }
    }

    fn nested_or(
        &mut self,
        alternatives: &[MatchPattern],
        expected: TypeId,
        path: &ScrutineePath,
        span: Span,
    ) -> Result<(), MatchError> {
        tracing::debug!(alternative = self.alternative, ?path, "compiling nested or-pattern");
        let compiled = self.compiler.compile_or(alternatives, expected, path, span)?;
        for entry in compiled.environment.iter() {
            let ascription = (entry.origin == TypeOrigin::Ascribed).then_some(entry.ty);
            let Some(bound_at) = compiled.procedure.binding_path(entry.name) else {
                return Err(MatchError::internal(
                    format!("nested binding #{} has no slot", entry.name.raw()),
                    span,
                ));
            };
            self.record(entry.name, ascription, entry.ty, bound_at, span, true)?;
        }
        self.nested.insert((self.alternative, path.clone()), compiled);
        Ok(())
    }

    fn record(
        &mut self,
        name: Name,
        ascription: Option<TypeId>,
        inferred: TypeId,
        path: &ScrutineePath,
        span: Span,
        nested: bool,
    ) -> Result<(), MatchError> {
        match self.summary.path_of(name) {
            Some(certified) if certified == path => {}
            Some(certified) => {
                return Err(MatchError::internal(
                    format!(
                        "binding #{} collected at {path:?} but certified at {certified:?}",
                        name.raw()
                    ),
                    span,
                ));
            }
            None => {
                return Err(MatchError::internal(
                    format!("binding #{} was not certified by shape validation", name.raw()),
                    span,
                ));
            }
        }

        self.sites.entry(name).or_default().push(BindingSite {
            name,
            alternative: self.alternative,
            ascription,
            inferred,
            path: path.clone(),
            span,
            nested,
        });
        Ok(())
    }

    fn mismatch(
        &self,
        path: &ScrutineePath,
        expected: TypeId,
        problem: ScrutineeProblem,
        span: Span,
    ) -> MatchError {
        tracing::debug!(alternative = self.alternative, ?problem, "pattern does not fit scrutinee");
        MatchError::scrutinee(self.alternative, path.clone(), expected, problem, span)
    }
}
