use disjoin_ir::PathInstruction;
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::test_helpers::Fixture;
use crate::{CompileOptions, MatchCompiler};

fn dog(f: &Fixture) -> Value {
    Value::variant(f.n("Dog"), Value::Object(f.n("Dog")))
}

#[test]
fn leftmost_accepting_arm_wins() {
    let f = Fixture::new();
    let scrutinee = f.tuple_type(&[f.pet, TypeId::I32]);
    let p = f.or(vec![
        f.tuple(vec![f.variant("Dog", f.wild()), f.bind("n")]),
        f.tuple(vec![f.wild(), f.bind("n")]),
    ]);
    let procedure = f.compile(&p, scrutinee).unwrap().procedure;

    let value = Value::Tuple(vec![dog(&f), Value::Int(4)]);
    assert_eq!(procedure.select(&value).unwrap().alternative, 0);
    let value = Value::Tuple(vec![Value::unit_variant(f.n("Nothing")), Value::Int(4)]);
    let selection = procedure.select(&value).unwrap();
    assert_eq!(selection.alternative, 1);
    assert_eq!(selection.get(f.n("n")).unwrap().value, &Value::Int(4));
}

#[test]
fn no_arm_accepts() {
    let f = Fixture::new();
    let p = f.or(vec![f.int(1), f.int(2)]);
    let procedure = f.compile(&p, TypeId::I32).unwrap().procedure;
    assert_eq!(procedure.select(&Value::Int(2)).unwrap().alternative, 1);
    assert_eq!(procedure.select(&Value::Int(3)), None);
    assert_eq!(procedure.select(&Value::Bool(true)), None);
}

#[test]
fn bindings_follow_environment_order() {
    let f = Fixture::new();
    let scrutinee = f.record_type(&[("a", TypeId::I8), ("b", TypeId::BOOL)]);
    let p = f.or(vec![
        f.record(vec![("b", f.bind("b")), ("a", f.bind("a"))], false),
        f.record(vec![("a", f.bind("a")), ("b", f.bind("b"))], false),
    ]);
    let procedure = f.compile(&p, scrutinee).unwrap().procedure;
    let value = Value::Record(vec![(f.n("a"), Value::Int(1)), (f.n("b"), Value::Bool(false))]);
    let selection = procedure.select(&value).unwrap();
    let names: Vec<_> = selection.bindings.iter().map(|b| b.name).collect();
    assert_eq!(names, vec![f.n("b"), f.n("a")]);
}

#[test]
fn missing_component_rejects_arm() {
    let procedure = DecisionProcedure {
        arms: vec![Arm {
            alternative: 0,
            checks: Vec::new(),
            bindings: vec![BindingSlot {
                name: Name::from_raw(1),
                path: smallvec![PathInstruction::TupleIndex(3)],
                native: TypeId::I32,
                exposed: TypeId::I32,
                conversion: Conversion::Identity,
            }],
        }],
        dispatch: None,
        names: vec![Name::from_raw(1)],
    };
    assert_eq!(procedure.select(&Value::Tuple(vec![Value::Int(0)])), None);
}

#[test]
fn dispatch_agrees_with_linear_scan() {
    let f = Fixture::new();
    let compiler = MatchCompiler::new(&f.pool, CompileOptions::new().with_dispatch_threshold(2));
    let p = f.or(vec![
        f.variant("Cat", f.wild()),
        f.variant("Dog", f.wild()),
        f.wild(),
        f.variant("Cat", f.wild()),
        f.variant("Stone", f.wild()),
    ]);
    let procedure = compiler.compile(&p, f.pet).unwrap().procedure;
    assert!(procedure.dispatch.is_some());

    for tag in ["Dog", "Cat", "Wild", "Stone", "Nothing"] {
        let value = Value::unit_variant(f.n(tag));
        assert_eq!(procedure.select(&value), procedure.select_linear(&value), "tag {tag}");
    }
    assert_eq!(procedure.select(&Value::Int(0)), procedure.select_linear(&Value::Int(0)));
}

#[test]
fn conversion_between() {
    assert_eq!(Conversion::between(TypeId::I8, TypeId::I8), Conversion::Identity);
    assert_eq!(Conversion::between(TypeId::I8, TypeId::I16), Conversion::Upcast);
}

#[test]
fn merge_keeps_ascending_order() {
    assert_eq!(merge_sorted(&[0, 3, 7], &[1, 2, 9]), vec![0, 1, 2, 3, 7, 9]);
    assert_eq!(merge_sorted(&[], &[4]), vec![4]);
}
