//! Parsed pattern trees.
//!
//! `MatchPattern` is the matcher's input. The tree is immutable once built and
//! each node owns its children. Constructors here are what a parser (or a
//! test) uses to assemble patterns; they attach `Span::DUMMY` unless a span is
//! given with [`MatchPattern::at`].

use crate::{Literal, Name, Span, TypeId};

/// A pattern node with its source span.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MatchPattern {
    pub kind: PatternKind,
    pub span: Span,
}

/// Pattern node kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PatternKind {
    /// `_`
    Wildcard,
    /// `x` or `x: T`
    Binding {
        name: Name,
        ascription: Option<TypeId>,
    },
    /// `Tag(inner)`; a payload-less tag carries `()` as its inner pattern.
    Variant {
        tag: Name,
        inner: Box<MatchPattern>,
    },
    /// `(p0, p1, ...)`
    Tuple(Vec<MatchPattern>),
    /// `{ a: p, b, .. }`; `rest` is the `..` flag.
    Record { fields: Vec<FieldPattern>, rest: bool },
    Literal(Literal),
    /// `p0 | p1 | ...`
    Or(Vec<MatchPattern>),
}

/// One `name: pattern` entry in a record pattern.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldPattern {
    pub name: Name,
    pub pattern: MatchPattern,
    pub span: Span,
}

impl MatchPattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        MatchPattern { kind, span }
    }

    /// Attach a source span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn wildcard() -> Self {
        Self::new(PatternKind::Wildcard, Span::DUMMY)
    }

    pub fn bind(name: Name) -> Self {
        Self::new(
            PatternKind::Binding {
                name,
                ascription: None,
            },
            Span::DUMMY,
        )
    }

    pub fn bind_as(name: Name, ty: TypeId) -> Self {
        Self::new(
            PatternKind::Binding {
                name,
                ascription: Some(ty),
            },
            Span::DUMMY,
        )
    }

    pub fn variant(tag: Name, inner: MatchPattern) -> Self {
        Self::new(
            PatternKind::Variant {
                tag,
                inner: Box::new(inner),
            },
            Span::DUMMY,
        )
    }

    /// A tag with no payload, e.g. `None`.
    pub fn unit_variant(tag: Name) -> Self {
        Self::variant(tag, Self::unit())
    }

    pub fn tuple(elements: Vec<MatchPattern>) -> Self {
        Self::new(PatternKind::Tuple(elements), Span::DUMMY)
    }

    /// `()`, the empty tuple.
    pub fn unit() -> Self {
        Self::tuple(Vec::new())
    }

    pub fn record(fields: Vec<(Name, MatchPattern)>, rest: bool) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, pattern)| FieldPattern {
                span: pattern.span,
                name,
                pattern,
            })
            .collect();
        Self::new(PatternKind::Record { fields, rest }, Span::DUMMY)
    }

    pub fn literal(value: Literal) -> Self {
        Self::new(PatternKind::Literal(value), Span::DUMMY)
    }

    pub fn or(alternatives: Vec<MatchPattern>) -> Self {
        Self::new(PatternKind::Or(alternatives), Span::DUMMY)
    }

    pub fn is_or(&self) -> bool {
        matches!(self.kind, PatternKind::Or(_))
    }

    /// Number of nodes in the tree, this node included.
    pub fn node_count(&self) -> usize {
        1 + match &self.kind {
            PatternKind::Wildcard | PatternKind::Binding { .. } | PatternKind::Literal(_) => 0,
            PatternKind::Variant { inner, .. } => inner.node_count(),
            PatternKind::Tuple(items) | PatternKind::Or(items) => {
                items.iter().map(MatchPattern::node_count).sum()
            }
            PatternKind::Record { fields, .. } => {
                fields.iter().map(|f| f.pattern.node_count()).sum()
            }
        }
    }
}
