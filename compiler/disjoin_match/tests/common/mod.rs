//! Shared setup for integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::Cell;
use std::sync::Once;

use disjoin_ir::{Literal, MatchPattern, Name, Span, StringInterner, TypeId};
use disjoin_match::{CompileOptions, CompiledPattern, MatchCompiler, MatchError};
use disjoin_types::Pool;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=disjoin_match=trace cargo test -p disjoin_match`.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// A type universe for the scenarios:
///
/// - classes `Shape > Polygon > {Square, Triangle}`, and `Color`
/// - `Num = Small(i16) | Big(i64) | Flag(bool) | Empty`
/// - `Drawing = Sq(Square) | Tri(Triangle) | Poly(Polygon) | Paint(Color)`
pub struct World {
    pub pool: Pool,
    pub names: StringInterner,
    pub shape: TypeId,
    pub polygon: TypeId,
    pub square: TypeId,
    pub triangle: TypeId,
    pub color: TypeId,
    pub num: TypeId,
    pub drawing: TypeId,
    next_span: Cell<u32>,
}

impl World {
    pub fn new() -> Self {
        init_test_tracing();
        let names = StringInterner::new();
        let mut pool = Pool::new();
        let shape = pool.declare_class(names.intern("Shape"), None);
        let polygon = pool.declare_class(names.intern("Polygon"), Some(shape));
        let square = pool.declare_class(names.intern("Square"), Some(polygon));
        let triangle = pool.declare_class(names.intern("Triangle"), Some(polygon));
        let color = pool.declare_class(names.intern("Color"), None);
        let num = pool.declare_enum(
            names.intern("Num"),
            None,
            &[
                (names.intern("Small"), TypeId::I16),
                (names.intern("Big"), TypeId::I64),
                (names.intern("Flag"), TypeId::BOOL),
                (names.intern("Empty"), TypeId::UNIT),
            ],
        );
        let drawing = pool.declare_enum(
            names.intern("Drawing"),
            None,
            &[
                (names.intern("Sq"), square),
                (names.intern("Tri"), triangle),
                (names.intern("Poly"), polygon),
                (names.intern("Paint"), color),
            ],
        );
        World {
            pool,
            names,
            shape,
            polygon,
            square,
            triangle,
            color,
            num,
            drawing,
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

    pub fn tuple_type(&self, elems: &[TypeId]) -> TypeId {
        self.pool.tuple(elems)
    }

    pub fn record_type(&self, fields: &[(&str, TypeId)]) -> TypeId {
        let fields: Vec<(Name, TypeId)> = fields.iter().map(|&(f, ty)| (self.n(f), ty)).collect();
        self.pool.record(&fields)
    }

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

    pub fn message(&self, err: &MatchError) -> String {
        err.format_with(&self.pool, &self.names)
    }

    pub fn ty(&self, ty: TypeId) -> String {
        self.pool.format_type(ty, &self.names)
    }
}
