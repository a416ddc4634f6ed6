//! Errors reported by or-pattern compilation.
//!
//! A `MatchError` is plain data: the kind of failure, the span of the pattern
//! being compiled, and every implicated alternative with its own span and (if
//! known) type. Rendering to text or to a `Diagnostic` takes closures for type
//! and name resolution so this crate never owns an interner.

use std::fmt;

use disjoin_diagnostic::{Diagnostic, ErrorCode, Suggestion};
use disjoin_ir::{format_path, Literal, Name, ScrutineePath, Span, StringInterner, TypeId};
use disjoin_types::Pool;

use crate::ShapeClass;

/// An error from compiling one pattern. No partial result accompanies it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MatchError {
    pub kind: MatchErrorKind,
    /// Span of the pattern (or nested or-pattern) being compiled.
    pub span: Span,
    /// Implicated alternatives in ascending alternative order.
    pub sites: Vec<ImplicatedSite>,
}

/// One alternative involved in an error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ImplicatedSite {
    /// Zero-based alternative index.
    pub alternative: usize,
    pub span: Span,
    /// Type the alternative contributed, when the error is about types.
    pub ty: Option<TypeId>,
}

impl ImplicatedSite {
    pub fn new(alternative: usize, span: Span) -> Self {
        ImplicatedSite {
            alternative,
            span,
            ty: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeId) -> Self {
        self.ty = Some(ty);
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MatchErrorKind {
    /// Alternatives disagree on bound names, binding paths, or shape.
    ShapeMismatch { problem: ShapeProblem },
    /// A name's types across alternatives have no common supertype.
    IncompatibleBindingTypes {
        name: Name,
        /// `(alternative, type)` for every alternative, in order.
        types: Vec<(usize, TypeId)>,
    },
    /// An ascription does not admit the type found in some alternative.
    AscriptionConflict {
        name: Name,
        /// The alternative whose type is not below `ascribed`.
        alternative: usize,
        ascribed: TypeId,
        found: TypeId,
    },
    /// An alternative cannot describe a value of the scrutinee type.
    ScrutineeMismatch {
        alternative: usize,
        path: ScrutineePath,
        expected: TypeId,
        problem: ScrutineeProblem,
    },
    /// Two phases disagree about data they should both have derived.
    InternalConsistencyFault { message: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeProblem {
    MissingBinding {
        name: Name,
        present_in: usize,
        absent_from: usize,
    },
    PathMismatch {
        name: Name,
        expected: ScrutineePath,
        found: ScrutineePath,
        alternative: usize,
    },
    IncompatibleShape {
        path: ScrutineePath,
        left: (usize, ShapeClass),
        right: (usize, ShapeClass),
    },
    DuplicateBinding { name: Name, alternative: usize },
    DegenerateOr { count: usize },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScrutineeProblem {
    NotASumType,
    UnknownTag { tag: Name },
    NotATuple { arity: usize },
    TupleArity { expected: usize, found: usize },
    NotARecord,
    UnknownField { field: Name },
    /// A closed record pattern omits these fields of the record type.
    MissingFields { fields: Vec<Name> },
    LiteralMismatch { literal: Literal },
}

impl MatchError {
    pub fn shape(problem: ShapeProblem, span: Span, sites: Vec<ImplicatedSite>) -> Self {
        Self::new(MatchErrorKind::ShapeMismatch { problem }, span, sites)
    }

    /// Incompatible types; `sites` must carry their types.
    pub fn incompatible_types(name: Name, span: Span, mut sites: Vec<ImplicatedSite>) -> Self {
        sites.sort_by_key(|site| site.alternative);
        let types = sites
            .iter()
            .filter_map(|site| Some((site.alternative, site.ty?)))
            .collect();
        Self::new(
            MatchErrorKind::IncompatibleBindingTypes { name, types },
            span,
            sites,
        )
    }

    pub fn ascription_conflict(
        name: Name,
        span: Span,
        bound: ImplicatedSite,
        conflicting: ImplicatedSite,
        ascribed: TypeId,
        found: TypeId,
    ) -> Self {
        let alternative = conflicting.alternative;
        // An ascription rejecting its own position implicates one site.
        let sites = if bound.alternative == alternative {
            vec![conflicting.with_type(found)]
        } else {
            vec![bound.with_type(ascribed), conflicting.with_type(found)]
        };
        Self::new(
            MatchErrorKind::AscriptionConflict {
                name,
                alternative,
                ascribed,
                found,
            },
            span,
            sites,
        )
    }

    pub fn scrutinee(
        alternative: usize,
        path: ScrutineePath,
        expected: TypeId,
        problem: ScrutineeProblem,
        span: Span,
    ) -> Self {
        Self::new(
            MatchErrorKind::ScrutineeMismatch {
                alternative,
                path,
                expected,
                problem,
            },
            span,
            vec![ImplicatedSite::new(alternative, span).with_type(expected)],
        )
    }

    #[cold]
    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        Self::new(
            MatchErrorKind::InternalConsistencyFault {
                message: message.into(),
            },
            span,
            Vec::new(),
        )
    }

    fn new(kind: MatchErrorKind, span: Span, mut sites: Vec<ImplicatedSite>) -> Self {
        sites.sort_by_key(|site| site.alternative);
        MatchError { kind, span, sites }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            MatchErrorKind::ShapeMismatch { .. } => ErrorCode::E3001,
            MatchErrorKind::IncompatibleBindingTypes { .. } => ErrorCode::E3002,
            MatchErrorKind::AscriptionConflict { .. } => ErrorCode::E3003,
            MatchErrorKind::ScrutineeMismatch { .. } => ErrorCode::E3004,
            MatchErrorKind::InternalConsistencyFault { .. } => ErrorCode::E9001,
        }
    }

    /// Binding names the error is about.
    pub fn binding_names(&self) -> Vec<Name> {
        match &self.kind {
            MatchErrorKind::ShapeMismatch { problem } => match problem {
                ShapeProblem::MissingBinding { name, .. }
                | ShapeProblem::PathMismatch { name, .. }
                | ShapeProblem::DuplicateBinding { name, .. } => vec![*name],
                ShapeProblem::IncompatibleShape { .. } | ShapeProblem::DegenerateOr { .. } => {
                    Vec::new()
                }
            },
            MatchErrorKind::IncompatibleBindingTypes { name, .. }
            | MatchErrorKind::AscriptionConflict { name, .. } => vec![*name],
            MatchErrorKind::ScrutineeMismatch { .. }
            | MatchErrorKind::InternalConsistencyFault { .. } => Vec::new(),
        }
    }

    /// Implicated alternative indices, ascending and deduplicated.
    pub fn alternatives(&self) -> Vec<usize> {
        let mut alts: Vec<usize> = self.sites.iter().map(|s| s.alternative).collect();
        alts.dedup();
        alts
    }

    /// Format the error message using closures for type and name resolution.
    pub fn message(
        &self,
        format_type: &dyn Fn(TypeId) -> String,
        format_name: &dyn Fn(Name) -> String,
    ) -> String {
        match &self.kind {
            MatchErrorKind::ShapeMismatch { problem } => shape_message(problem, format_name),
            MatchErrorKind::IncompatibleBindingTypes { name, types } => {
                let listed: Vec<String> = types
                    .iter()
                    .map(|(alt, ty)| format!("`{}` (alternative {})", format_type(*ty), alt + 1))
                    .collect();
                format!(
                    "variable `{}` has incompatible types across alternatives: {}",
                    format_name(*name),
                    listed.join(", ")
                )
            }
            MatchErrorKind::AscriptionConflict {
                name,
                alternative,
                ascribed,
                found,
            } => format!(
                "type ascription `{}` on `{}` does not admit `{}` in alternative {}",
                format_type(*ascribed),
                format_name(*name),
                format_type(*found),
                alternative + 1
            ),
            MatchErrorKind::ScrutineeMismatch {
                alternative,
                path,
                expected,
                problem,
            } => format!(
                "alternative {} does not fit type `{}` at `{}`: {}",
                alternative + 1,
                format_type(*expected),
                format_path(path, format_name),
                scrutinee_detail(problem, format_name)
            ),
            MatchErrorKind::InternalConsistencyFault { message } => {
                format!("internal error in pattern compilation: {message}")
            }
        }
    }

    /// Convenience wrapper for `message` using a `Pool` and `StringInterner`.
    pub fn format_with(&self, pool: &Pool, interner: &StringInterner) -> String {
        self.message(&|ty| pool.format_type(ty, interner), &|name| {
            interner.lookup(name).to_string()
        })
    }

    /// Render as a diagnostic: primary label on the first implicated
    /// alternative, secondary labels on the rest.
    pub fn to_diagnostic(
        &self,
        format_type: &dyn Fn(TypeId) -> String,
        format_name: &dyn Fn(Name) -> String,
    ) -> Diagnostic {
        let mut diag =
            Diagnostic::error(self.code()).with_message(self.message(format_type, format_name));

        let site_label = |site: &ImplicatedSite| match site.ty {
            Some(ty) => format!("alternative {}: `{}`", site.alternative + 1, format_type(ty)),
            None => format!("alternative {}", site.alternative + 1),
        };
        match self.sites.split_first() {
            Some((first, rest)) => {
                diag = diag.with_label(first.span, site_label(first));
                for site in rest {
                    diag = diag.with_secondary_label(site.span, site_label(site));
                }
            }
            None => diag = diag.with_label(self.span, "in this pattern"),
        }

        match &self.kind {
            MatchErrorKind::ShapeMismatch { .. } => diag.with_note(
                "every alternative of an or-pattern must bind the same variables at the same positions",
            ),
            MatchErrorKind::IncompatibleBindingTypes { name, .. } => diag
                .with_note("these types have no common supertype")
                .with_suggestion(Suggestion::text(
                    format!(
                        "make `{}` bind values of related types in every alternative",
                        format_name(*name)
                    ),
                    1,
                )),
            MatchErrorKind::AscriptionConflict { name, found, .. } => diag
                .with_note("an ascription is an upper bound for the variable in every alternative")
                .with_suggestion(Suggestion::text(
                    format!(
                        "widen the ascription on `{}` to a supertype of `{}`, or remove it",
                        format_name(*name),
                        format_type(*found)
                    ),
                    0,
                )),
            MatchErrorKind::ScrutineeMismatch { .. } => diag,
            MatchErrorKind::InternalConsistencyFault { .. } => {
                diag.with_note("this is a compiler bug; please report it")
            }
        }
    }
}

fn shape_message(problem: &ShapeProblem, format_name: &dyn Fn(Name) -> String) -> String {
    match problem {
        ShapeProblem::MissingBinding {
            name,
            present_in,
            absent_from,
        } => format!(
            "variable `{}` is bound in alternative {} but not in alternative {}",
            format_name(*name),
            present_in + 1,
            absent_from + 1
        ),
        ShapeProblem::PathMismatch {
            name,
            expected,
            found,
            alternative,
        } => format!(
            "variable `{}` is bound at `{}` in alternative {} but at `{}` elsewhere",
            format_name(*name),
            format_path(found, format_name),
            alternative + 1,
            format_path(expected, format_name)
        ),
        ShapeProblem::IncompatibleShape { path, left, right } => format!(
            "alternatives {} and {} have incompatible shapes at `{}`: {} vs {}",
            left.0 + 1,
            right.0 + 1,
            format_path(path, format_name),
            left.1.describe(format_name),
            right.1.describe(format_name)
        ),
        ShapeProblem::DuplicateBinding { name, alternative } => format!(
            "variable `{}` is bound more than once in alternative {}",
            format_name(*name),
            alternative + 1
        ),
        ShapeProblem::DegenerateOr { count } => {
            format!("or-pattern needs at least two alternatives, found {count}")
        }
    }
}

fn scrutinee_detail(problem: &ScrutineeProblem, format_name: &dyn Fn(Name) -> String) -> String {
    match problem {
        ScrutineeProblem::NotASumType => "a variant pattern needs a sum type".to_string(),
        ScrutineeProblem::UnknownTag { tag } => format!("no variant `{}`", format_name(*tag)),
        ScrutineeProblem::NotATuple { arity } => {
            format!("a tuple pattern of {arity} elements needs a tuple type")
        }
        ScrutineeProblem::TupleArity { expected, found } => {
            format!("expected {expected} elements, found {found}")
        }
        ScrutineeProblem::NotARecord => "a record pattern needs a record type".to_string(),
        ScrutineeProblem::UnknownField { field } => {
            format!("no field `{}`", format_name(*field))
        }
        ScrutineeProblem::MissingFields { fields } => {
            let listed: Vec<String> = fields
                .iter()
                .map(|f| format!("`{}`", format_name(*f)))
                .collect();
            format!("pattern does not mention {}; add them or `..`", listed.join(", "))
        }
        ScrutineeProblem::LiteralMismatch { literal } => {
            format!("{} literal is not a value of this type", literal.kind())
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message(&|ty| format!("{ty:?}"), &|name| format!("#{}", name.raw()));
        write!(f, "[{}] {}", self.code(), message)
    }
}

impl std::error::Error for MatchError {}

#[cfg(test)]
mod tests;
