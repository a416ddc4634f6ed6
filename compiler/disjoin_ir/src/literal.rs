//! Literal values that may appear in patterns.

use std::fmt;

use crate::Name;

/// A literal pattern value.
///
/// Float literals are deliberately absent: equality tests on floats are not
/// a sound basis for alternative selection.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Char(char),
    /// Interned string contents.
    Str(Name),
}

/// Shape class of a literal, used when comparing alternatives.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum LiteralKind {
    Int,
    Bool,
    Char,
    Str,
}

impl Literal {
    #[inline]
    pub fn kind(self) -> LiteralKind {
        match self {
            Literal::Int(_) => LiteralKind::Int,
            Literal::Bool(_) => LiteralKind::Bool,
            Literal::Char(_) => LiteralKind::Char,
            Literal::Str(_) => LiteralKind::Str,
        }
    }
}

impl LiteralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LiteralKind::Int => "integer",
            LiteralKind::Bool => "boolean",
            LiteralKind::Char => "character",
            LiteralKind::Str => "string",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
