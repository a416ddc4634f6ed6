use disjoin_diagnostic::Label;
use disjoin_ir::{LiteralKind, PathInstruction};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::test_helpers::Fixture;

fn site(alternative: usize, start: u32) -> ImplicatedSite {
    ImplicatedSite::new(alternative, Span::new(start, start + 1))
}

#[test]
fn codes_per_kind() {
    let f = Fixture::new();
    let x = f.n("x");
    let cases = [
        (
            MatchError::shape(ShapeProblem::DegenerateOr { count: 1 }, Span::DUMMY, vec![]),
            ErrorCode::E3001,
        ),
        (
            MatchError::incompatible_types(x, Span::DUMMY, vec![site(0, 0).with_type(f.dog)]),
            ErrorCode::E3002,
        ),
        (
            MatchError::ascription_conflict(x, Span::DUMMY, site(0, 0), site(1, 5), f.dog, f.cat),
            ErrorCode::E3003,
        ),
        (
            MatchError::scrutinee(
                0,
                ScrutineePath::new(),
                f.rock,
                ScrutineeProblem::NotASumType,
                Span::DUMMY,
            ),
            ErrorCode::E3004,
        ),
        (MatchError::internal("boom", Span::DUMMY), ErrorCode::E9001),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code);
    }
}

#[test]
fn sites_are_sorted_by_alternative() {
    let f = Fixture::new();
    let err = MatchError::incompatible_types(
        f.n("x"),
        Span::DUMMY,
        vec![
            site(2, 20).with_type(f.rock),
            site(0, 0).with_type(f.dog),
            site(1, 10).with_type(f.cat),
        ],
    );
    assert_eq!(err.alternatives(), vec![0, 1, 2]);
    let MatchErrorKind::IncompatibleBindingTypes { types, .. } = &err.kind else {
        panic!("wrong kind: {:?}", err.kind);
    };
    assert_eq!(types, &vec![(0, f.dog), (1, f.cat), (2, f.rock)]);
}

#[test]
fn incompatible_types_message() {
    let f = Fixture::new();
    let err = MatchError::incompatible_types(
        f.n("x"),
        Span::DUMMY,
        vec![site(0, 0).with_type(f.dog), site(1, 5).with_type(f.rock)],
    );
    assert_eq!(
        f.message(&err),
        "variable `x` has incompatible types across alternatives: \
         `Dog` (alternative 1), `Rock` (alternative 2)"
    );
    assert_eq!(err.binding_names(), vec![f.n("x")]);
}

#[test]
fn ascription_conflict_on_own_position_has_one_site() {
    let f = Fixture::new();
    let here = site(1, 10);
    let err = MatchError::ascription_conflict(
        f.n("x"),
        Span::DUMMY,
        here.clone(),
        here,
        f.dog,
        f.animal,
    );
    assert_eq!(err.sites.len(), 1);
    assert_eq!(err.sites[0].ty, Some(f.animal));
    assert_eq!(
        f.message(&err),
        "type ascription `Dog` on `x` does not admit `Animal` in alternative 2"
    );
}

#[test]
fn ascription_conflict_across_alternatives() {
    let f = Fixture::new();
    let err = MatchError::ascription_conflict(
        f.n("x"),
        Span::DUMMY,
        site(2, 20),
        site(0, 0),
        f.mammal,
        f.animal,
    );
    assert_eq!(err.alternatives(), vec![0, 2]);
    let MatchErrorKind::AscriptionConflict { alternative, .. } = err.kind else {
        panic!("wrong kind");
    };
    assert_eq!(alternative, 0);
}

#[test]
fn scrutinee_message_names_path() {
    let f = Fixture::new();
    let err = MatchError::scrutinee(
        1,
        smallvec![PathInstruction::Payload, PathInstruction::TupleIndex(0)],
        f.pet,
        ScrutineeProblem::UnknownTag { tag: f.n("Fish") },
        Span::DUMMY,
    );
    assert_eq!(
        f.message(&err),
        "alternative 2 does not fit type `Pet` at `$.payload.0`: no variant `Fish`"
    );
}

#[test]
fn shape_messages() {
    let f = Fixture::new();
    let name = |n: Name| f.names.lookup(n).to_string();
    let cases = [
        (
            ShapeProblem::MissingBinding {
                name: f.n("y"),
                present_in: 0,
                absent_from: 2,
            },
            "variable `y` is bound in alternative 1 but not in alternative 3",
        ),
        (
            ShapeProblem::DuplicateBinding {
                name: f.n("x"),
                alternative: 0,
            },
            "variable `x` is bound more than once in alternative 1",
        ),
        (
            ShapeProblem::IncompatibleShape {
                path: ScrutineePath::new(),
                left: (0, ShapeClass::Literal(LiteralKind::Int)),
                right: (1, ShapeClass::Tuple(2)),
            },
            "alternatives 1 and 2 have incompatible shapes at `$`: \
             integer literal vs tuple of 2 elements",
        ),
        (
            ShapeProblem::DegenerateOr { count: 0 },
            "or-pattern needs at least two alternatives, found 0",
        ),
    ];
    for (problem, expected) in cases {
        assert_eq!(shape_message(&problem, &name), expected);
    }
}

#[test]
fn display_without_interner() {
    let err = MatchError::internal("lost a site", Span::DUMMY);
    assert_eq!(
        err.to_string(),
        "[E9001] internal error in pattern compilation: lost a site"
    );
}

#[test]
fn diagnostic_labels_follow_sites() {
    let f = Fixture::new();
    let err = MatchError::incompatible_types(
        f.n("x"),
        Span::new(0, 40),
        vec![site(0, 3).with_type(f.dog), site(1, 13).with_type(f.rock)],
    );
    let diag = err.to_diagnostic(&|ty| f.pool.format_type(ty, &f.names), &|n| {
        f.names.lookup(n).to_string()
    });
    assert_eq!(diag.code, ErrorCode::E3002);
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.labels[0].span, Span::new(3, 4));
    assert_eq!(diag.labels[0].message, "alternative 1: `Dog`");
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.labels[1].message, "alternative 2: `Rock`");
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn diagnostic_without_sites_labels_pattern() {
    let err = MatchError::internal("lost a site", Span::new(5, 9));
    let diag = err.to_diagnostic(&|ty| format!("{ty:?}"), &|n| format!("{n:?}"));
    assert_eq!(
        diag.labels,
        vec![Label::primary(Span::new(5, 9), "in this pattern")]
    );
    assert_eq!(diag.notes, vec!["this is a compiler bug; please report it".to_string()]);
}
