//! Error codes for pattern compiler diagnostics.

use std::fmt;

/// Error codes for pattern compiler diagnostics.
///
/// Format: E#### where first digit indicates the category:
/// - E3xxx: Pattern errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Alternatives of an or-pattern bind different names or shapes
    E3001,
    /// A binding has types with no common supertype across alternatives
    E3002,
    /// A type ascription conflicts with another alternative or its position
    E3003,
    /// Pattern cannot describe a value of the scrutinee type
    E3004,
    /// Broken invariant between compiler phases
    E9001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary, suitable for `--explain` indexes.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "or-pattern alternatives differ in shape",
            ErrorCode::E3002 => "incompatible binding types across alternatives",
            ErrorCode::E3003 => "conflicting type ascription in or-pattern",
            ErrorCode::E3004 => "pattern does not fit the scrutinee type",
            ErrorCode::E9001 => "internal consistency fault in pattern compilation",
        }
    }

    /// Parse a code such as `"E3002"`.
    pub fn from_code_str(s: &str) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    pub fn is_pattern_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
