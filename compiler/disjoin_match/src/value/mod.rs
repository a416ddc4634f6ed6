//! Runtime values a decision procedure can be run against.
//!
//! This is the minimal value model the procedure needs: enough structure to
//! test tags and literals and to project sub-values along a path.

use disjoin_ir::{Literal, Name, PathInstruction};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Char(char),
    Str(Name),
    /// Instance of a class, known only by its class name.
    Object(Name),
    Variant { tag: Name, payload: Box<Value> },
    /// Tuple; the empty tuple is `()`.
    Tuple(Vec<Value>),
    Record(Vec<(Name, Value)>),
}

impl Value {
    pub fn unit() -> Self {
        Value::Tuple(Vec::new())
    }

    pub fn variant(tag: Name, payload: Value) -> Self {
        Value::Variant {
            tag,
            payload: Box::new(payload),
        }
    }

    pub fn unit_variant(tag: Name) -> Self {
        Self::variant(tag, Self::unit())
    }

    pub fn tag(&self) -> Option<Name> {
        match self {
            Value::Variant { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    /// One step into a component. `None` if the value has no such component.
    pub fn project(&self, step: PathInstruction) -> Option<&Value> {
        match (self, step) {
            (Value::Variant { payload, .. }, PathInstruction::Payload) => Some(payload),
            (Value::Tuple(items), PathInstruction::TupleIndex(i)) => items.get(i as usize),
            (Value::Record(fields), PathInstruction::Field(name)) => fields
                .iter()
                .find_map(|(field, value)| (*field == name).then_some(value)),
            _ => None,
        }
    }

    /// Follow `path` from this value.
    pub fn at_path(&self, path: &[PathInstruction]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |value, &step| value.project(step))
    }

    pub fn matches_literal(&self, literal: &Literal) -> bool {
        match (self, literal) {
            (Value::Int(a), Literal::Int(b)) => a == b,
            (Value::Bool(a), Literal::Bool(b)) => a == b,
            (Value::Char(a), Literal::Char(b)) => a == b,
            (Value::Str(a), Literal::Str(b)) => a == b,
            _ => false,
        }
    }
}
