use pretty_assertions::assert_eq;

use super::*;

#[test]
fn primitives() {
    let pool = Pool::new();
    let names = StringInterner::new();
    let cases = [
        (TypeId::I8, "i8"),
        (TypeId::I64, "i64"),
        (TypeId::F32, "f32"),
        (TypeId::BOOL, "bool"),
        (TypeId::CHAR, "char"),
        (TypeId::STR, "str"),
        (TypeId::UNIT, "()"),
        (TypeId::NEVER, "never"),
    ];
    for (ty, expected) in cases {
        assert_eq!(pool.format_type(ty, &names), expected);
    }
}

#[test]
fn compound_types() {
    let mut pool = Pool::new();
    let names = StringInterner::new();
    let animal = pool.declare_class(names.intern("Animal"), None);

    let single = pool.tuple(&[TypeId::I32]);
    assert_eq!(pool.format_type(single, &names), "(i32,)");

    let pair = pool.tuple(&[animal, TypeId::STR]);
    assert_eq!(pool.format_type(pair, &names), "(Animal, str)");

    let rec = pool.record(&[
        (names.intern("name"), TypeId::STR),
        (names.intern("age"), TypeId::I16),
    ]);
    // Fields print in interning order of their names.
    assert_eq!(pool.format_type(rec, &names), "{ name: str, age: i16 }");
}

#[test]
fn foreign_id() {
    let pool = Pool::new();
    let names = StringInterner::new();
    assert_eq!(pool.format_type(TypeId::from_raw(500), &names), "<unknown>");
}
