//! Fixtures for unit tests.
//!
//! `Fixture` owns a pool with a small class hierarchy and a sum type over it,
//! plus shorthands that build patterns from string names. Every pattern node
//! gets a fresh span so tests can tell error sites apart.

use std::cell::Cell;

use disjoin_ir::{Literal, MatchPattern, Name, Span, StringInterner, TypeId};
use disjoin_types::Pool;

use crate::{CompileOptions, CompiledPattern, MatchCompiler, MatchError};

/// Animal > Mammal > {Dog, Cat}; Rock stands alone.
///
/// `pet` is `Pet = Dog(Dog) | Cat(Cat) | Wild(Animal) | Stone(Rock) | Nothing`.
pub(crate) struct Fixture {
    pub pool: Pool,
    pub names: StringInterner,
    pub animal: TypeId,
    pub mammal: TypeId,
    pub dog: TypeId,
    pub cat: TypeId,
    pub rock: TypeId,
    pub pet: TypeId,
    next_span: Cell<u32>,
}

impl Fixture {
    pub fn new() -> Self {
        let names = StringInterner::new();
        let mut pool = Pool::new();
        let animal = pool.declare_class(names.intern("Animal"), None);
        let mammal = pool.declare_class(names.intern("Mammal"), Some(animal));
        let dog = pool.declare_class(names.intern("Dog"), Some(mammal));
        let cat = pool.declare_class(names.intern("Cat"), Some(mammal));
        let rock = pool.declare_class(names.intern("Rock"), None);
        let pet = pool.declare_enum(
            names.intern("Pet"),
            None,
            &[
                (names.intern("Dog"), dog),
                (names.intern("Cat"), cat),
                (names.intern("Wild"), animal),
                (names.intern("Stone"), rock),
                (names.intern("Nothing"), TypeId::UNIT),
            ],
        );
        Fixture {
            pool,
            names,
            animal,
            mammal,
            dog,
            cat,
            rock,
            pet,
            next_span: Cell::new(0),
        }
    }

    pub fn n(&self, s: &str) -> Name {
        self.names.intern(s)
    }

    fn span(&self) -> Span {
        let start = self.next_span.get();
        self.next_span.set(start + 10);
        Span::new(start, start + 5)
    }

    // === Patterns ===

    pub fn wild(&self) -> MatchPattern {
        MatchPattern::wildcard().at(self.span())
    }

    pub fn bind(&self, name: &str) -> MatchPattern {
        MatchPattern::bind(self.n(name)).at(self.span())
    }

    pub fn bind_as(&self, name: &str, ty: TypeId) -> MatchPattern {
        MatchPattern::bind_as(self.n(name), ty).at(self.span())
    }

    pub fn variant(&self, tag: &str, inner: MatchPattern) -> MatchPattern {
        MatchPattern::variant(self.n(tag), inner).at(self.span())
    }

    pub fn unit_variant(&self, tag: &str) -> MatchPattern {
        MatchPattern::unit_variant(self.n(tag)).at(self.span())
    }

    pub fn tuple(&self, elements: Vec<MatchPattern>) -> MatchPattern {
        MatchPattern::tuple(elements).at(self.span())
    }

    pub fn record(&self, fields: Vec<(&str, MatchPattern)>, rest: bool) -> MatchPattern {
        let fields = fields.into_iter().map(|(f, p)| (self.n(f), p)).collect();
        MatchPattern::record(fields, rest).at(self.span())
    }

    pub fn int(&self, value: i64) -> MatchPattern {
        MatchPattern::literal(Literal::Int(value)).at(self.span())
    }

    pub fn boolean(&self, value: bool) -> MatchPattern {
        MatchPattern::literal(Literal::Bool(value)).at(self.span())
    }

    pub fn or(&self, alternatives: Vec<MatchPattern>) -> MatchPattern {
        MatchPattern::or(alternatives).at(self.span())
    }

    // === Types ===

    pub fn tuple_type(&self, elems: &[TypeId]) -> TypeId {
        self.pool.tuple(elems)
    }

    pub fn record_type(&self, fields: &[(&str, TypeId)]) -> TypeId {
        let fields: Vec<(Name, TypeId)> = fields.iter().map(|&(f, ty)| (self.n(f), ty)).collect();
        self.pool.record(&fields)
    }

    // === Compilation ===

    pub fn compiler(&self) -> MatchCompiler<'_, Pool> {
        MatchCompiler::new(&self.pool, CompileOptions::default())
    }

    pub fn compile(
        &self,
        pattern: &MatchPattern,
        scrutinee: TypeId,
    ) -> Result<CompiledPattern, MatchError> {
        self.compiler().compile(pattern, scrutinee)
    }

    /// Compile and render the error message, panicking on success.
    pub fn compile_err(&self, pattern: &MatchPattern, scrutinee: TypeId) -> MatchError {
        match self.compile(pattern, scrutinee) {
            Ok(compiled) => panic!("expected an error, compiled to {compiled:?}"),
            Err(err) => err,
        }
    }

    pub fn message(&self, err: &MatchError) -> String {
        err.format_with(&self.pool, &self.names)
    }
}
