//! Diagnostic types for the pattern compiler.
//!
//! Every failure the matcher reports can be rendered as a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Secondary labels for the other implicated alternatives
//! - Suggestions (how to fix)

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Suggestion};
pub use error_code::ErrorCode;
