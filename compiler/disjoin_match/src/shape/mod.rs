//! Shape validation across the alternatives of an or-pattern.
//!
//! Checks, ignoring type ascriptions entirely:
//! - every alternative binds the same set of names,
//! - each name sits at the same scrutinee path in every alternative,
//! - positions occupied in two alternatives have compatible shapes.
//!
//! A nested or-pattern is validated first, innermost out. Its names are bound
//! at the paths its own alternatives certified, so `(A(x) | B(x)) | C(x)`
//! agrees with the flat `A(x) | B(x) | C(x)`. The nested node itself has no
//! shape class.
//!
//! Binding paths drop variant tags (`A(x) | B(x)` binds `x` at one path).
//! Shape classes are keyed by positions that keep the tags, because the
//! payloads of different variants are unrelated values.

use disjoin_ir::{
    LiteralKind, MatchPattern, Name, PathInstruction, PatternKind, ScrutineePath, Span,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{ImplicatedSite, MatchError, ShapeProblem};
use crate::stack::ensure_sufficient_stack;

/// Canonical binding set of an or-pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeSummary {
    /// Bound names in first-occurrence order of the leftmost alternative.
    pub names: Vec<Name>,
    paths: FxHashMap<Name, ScrutineePath>,
}

impl ShapeSummary {
    /// Certified path of `name`.
    pub fn path_of(&self, name: Name) -> Option<&ScrutineePath> {
        self.paths.get(&name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Shape of a pattern node that constrains the value at its path.
///
/// Wildcards, bindings and nested or-patterns accept anything and have no
/// class.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeClass {
    Literal(LiteralKind),
    Variant,
    Tuple(usize),
    /// Mentioned fields, sorted; `open` is the `..` flag.
    Record { fields: Vec<Name>, open: bool },
}

impl ShapeClass {
    /// Whether two alternatives may hold these shapes at the same path.
    pub fn compatible(&self, other: &ShapeClass) -> bool {
        match (self, other) {
            (ShapeClass::Literal(a), ShapeClass::Literal(b)) => a == b,
            (ShapeClass::Variant, ShapeClass::Variant) => true,
            (ShapeClass::Tuple(a), ShapeClass::Tuple(b)) => a == b,
            (
                ShapeClass::Record { fields: a, open: a_open },
                ShapeClass::Record { fields: b, open: b_open },
            ) => match (a_open, b_open) {
                (false, false) => a == b,
                (true, false) => is_subset(a, b),
                (false, true) => is_subset(b, a),
                (true, true) => true,
            },
            _ => false,
        }
    }

    pub fn describe(&self, format_name: &dyn Fn(Name) -> String) -> String {
        match self {
            ShapeClass::Literal(kind) => format!("{kind} literal"),
            ShapeClass::Variant => "variant".to_string(),
            ShapeClass::Tuple(1) => "tuple of 1 element".to_string(),
            ShapeClass::Tuple(n) => format!("tuple of {n} elements"),
            ShapeClass::Record { fields, open } => {
                let mut listed: Vec<String> = fields.iter().map(|f| format_name(*f)).collect();
                if *open {
                    listed.push("..".to_string());
                }
                format!("record {{ {} }}", listed.join(", "))
            }
        }
    }
}

fn is_subset(small: &[Name], large: &[Name]) -> bool {
    small.iter().all(|f| large.binary_search(f).is_ok())
}

/// One step of a shape position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum PositionStep {
    /// Into the payload of the variant with this tag.
    Payload(Name),
    Project(PathInstruction),
}

type Position = SmallVec<[PositionStep; 4]>;

/// A node's shape class, with where it sits.
struct ShapeSite {
    position: Position,
    path: ScrutineePath,
    class: ShapeClass,
    span: Span,
}

/// What one alternative binds and constrains.
#[derive(Default)]
struct AlternativeShape {
    bindings: Vec<(Name, ScrutineePath, Span)>,
    shapes: Vec<ShapeSite>,
}

/// Cursor of the walk: the binding path and the tag-keeping position.
struct Cursor {
    path: ScrutineePath,
    position: Position,
}

impl Cursor {
    fn push(&mut self, instruction: PathInstruction, step: PositionStep) {
        self.path.push(instruction);
        self.position.push(step);
    }

    fn pop(&mut self) {
        self.path.pop();
        self.position.pop();
    }
}

/// Validate the alternatives of an or-pattern rooted at `base`.
///
/// `span` is the or-pattern's span, used when an error has no more precise
/// location. A single alternative is accepted; the caller decides whether a
/// one-armed or-pattern is legal.
#[tracing::instrument(level = "debug", skip_all, fields(alternatives = alternatives.len()))]
pub fn validate(
    alternatives: &[MatchPattern],
    base: &ScrutineePath,
    span: Span,
) -> Result<ShapeSummary, MatchError> {
    let mut shapes = Vec::with_capacity(alternatives.len());
    for (index, alternative) in alternatives.iter().enumerate() {
        let mut shape = AlternativeShape::default();
        let mut cursor = Cursor {
            path: base.clone(),
            position: Position::new(),
        };
        walk(alternative, &mut cursor, &mut shape)?;
        check_duplicates(index, &shape, span)?;
        shapes.push(shape);
    }

    let Some(first) = shapes.first() else {
        return Ok(ShapeSummary {
            names: Vec::new(),
            paths: FxHashMap::default(),
        });
    };

    let binding_maps: Vec<FxHashMap<Name, (&ScrutineePath, Span)>> = shapes
        .iter()
        .map(|shape| {
            shape
                .bindings
                .iter()
                .map(|(name, path, span)| (*name, (path, *span)))
                .collect()
        })
        .collect();

    for (index, bindings) in binding_maps.iter().enumerate().skip(1) {
        check_names(alternatives, first, &binding_maps[0], index, &shapes[index], bindings, span)?;
    }
    check_positions(&shapes, span)?;

    let names: Vec<Name> = first.bindings.iter().map(|(name, _, _)| *name).collect();
    let paths = first
        .bindings
        .iter()
        .map(|(name, path, _)| (*name, path.clone()))
        .collect();
    tracing::trace!(names = names.len(), "shape validated");
    Ok(ShapeSummary { names, paths })
}

fn walk(
    pattern: &MatchPattern,
    at: &mut Cursor,
    out: &mut AlternativeShape,
) -> Result<(), MatchError> {
    ensure_sufficient_stack(|| {
        match &pattern.kind {
            PatternKind::Wildcard => {}
            PatternKind::Binding { name, .. } => {
                out.bindings.push((*name, at.path.clone(), pattern.span));
            }
            PatternKind::Literal(literal) => {
                out.push_class(at, ShapeClass::Literal(literal.kind()), pattern.span);
            }
            PatternKind::Variant { tag, inner } => {
                out.push_class(at, ShapeClass::Variant, pattern.span);
                at.push(PathInstruction::Payload, PositionStep::Payload(*tag));
                walk(inner, at, out)?;
                at.pop();
            }
            PatternKind::Tuple(elements) => {
                out.push_class(at, ShapeClass::Tuple(elements.len()), pattern.span);
                for (i, element) in elements.iter().enumerate() {
                    let step = PathInstruction::TupleIndex(tuple_index(i));
                    at.push(step, PositionStep::Project(step));
                    walk(element, at, out)?;
                    at.pop();
                }
            }
            PatternKind::Record { fields, rest } => {
                let mut names: Vec<Name> = fields.iter().map(|f| f.name).collect();
                names.sort_unstable();
                names.dedup();
                let class = ShapeClass::Record {
                    fields: names,
                    open: *rest,
                };
                out.push_class(at, class, pattern.span);
                for field in fields {
                    let step = PathInstruction::Field(field.name);
                    at.push(step, PositionStep::Project(step));
                    walk(&field.pattern, at, out)?;
                    at.pop();
                }
            }
            PatternKind::Or(alternatives) => {
                let nested = validate(alternatives, &at.path, pattern.span)?;
                for &name in &nested.names {
                    if let Some(path) = nested.path_of(name) {
                        out.bindings.push((name, path.clone(), pattern.span));
                    }
                }
            }
        }
        Ok(())
    })
}

impl AlternativeShape {
    fn push_class(&mut self, at: &Cursor, class: ShapeClass, span: Span) {
        self.shapes.push(ShapeSite {
            position: at.position.clone(),
            path: at.path.clone(),
            class,
            span,
        });
    }
}

pub(crate) fn tuple_index(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

fn check_duplicates(index: usize, shape: &AlternativeShape, span: Span) -> Result<(), MatchError> {
    let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
    for &(name, _, binding_span) in &shape.bindings {
        if let Some(&first_span) = seen.get(&name) {
            return Err(MatchError::shape(
                ShapeProblem::DuplicateBinding {
                    name,
                    alternative: index,
                },
                span,
                vec![
                    ImplicatedSite::new(index, first_span),
                    ImplicatedSite::new(index, binding_span),
                ],
            ));
        }
        seen.insert(name, binding_span);
    }
    Ok(())
}

/// Compare alternative `index` against the leftmost alternative.
fn check_names(
    alternatives: &[MatchPattern],
    first: &AlternativeShape,
    first_map: &FxHashMap<Name, (&ScrutineePath, Span)>,
    index: usize,
    shape: &AlternativeShape,
    map: &FxHashMap<Name, (&ScrutineePath, Span)>,
    span: Span,
) -> Result<(), MatchError> {
    for (name, expected, first_span) in &first.bindings {
        match map.get(name) {
            None => {
                return Err(MatchError::shape(
                    ShapeProblem::MissingBinding {
                        name: *name,
                        present_in: 0,
                        absent_from: index,
                    },
                    span,
                    vec![
                        ImplicatedSite::new(0, *first_span),
                        ImplicatedSite::new(index, alternatives[index].span),
                    ],
                ));
            }
            Some(&(found, found_span)) if found != expected => {
                return Err(MatchError::shape(
                    ShapeProblem::PathMismatch {
                        name: *name,
                        expected: expected.clone(),
                        found: found.clone(),
                        alternative: index,
                    },
                    span,
                    vec![
                        ImplicatedSite::new(0, *first_span),
                        ImplicatedSite::new(index, found_span),
                    ],
                ));
            }
            Some(_) => {}
        }
    }

    for (name, _, extra_span) in &shape.bindings {
        if !first_map.contains_key(name) {
            return Err(MatchError::shape(
                ShapeProblem::MissingBinding {
                    name: *name,
                    present_in: index,
                    absent_from: 0,
                },
                span,
                vec![
                    ImplicatedSite::new(0, alternatives[0].span),
                    ImplicatedSite::new(index, *extra_span),
                ],
            ));
        }
    }
    Ok(())
}

/// Compare shape classes of every pair of alternatives.
///
/// Compatibility is not transitive (`_` fits both `1` and `true`), so the
/// leftmost alternative is not enough of a reference here.
fn check_positions(shapes: &[AlternativeShape], span: Span) -> Result<(), MatchError> {
    let maps: Vec<FxHashMap<&Position, &ShapeSite>> = shapes
        .iter()
        .map(|shape| shape.shapes.iter().map(|site| (&site.position, site)).collect())
        .collect();

    for (i, left) in shapes.iter().enumerate() {
        for (j, right) in maps.iter().enumerate().skip(i + 1) {
            for site in &left.shapes {
                let Some(other) = right.get(&site.position) else {
                    continue;
                };
                if !site.class.compatible(&other.class) {
                    return Err(MatchError::shape(
                        ShapeProblem::IncompatibleShape {
                            path: site.path.clone(),
                            left: (i, site.class.clone()),
                            right: (j, other.class.clone()),
                        },
                        span,
                        vec![
                            ImplicatedSite::new(i, site.span),
                            ImplicatedSite::new(j, other.span),
                        ],
                    ));
                }
            }
        }
    }
    Ok(())
}
