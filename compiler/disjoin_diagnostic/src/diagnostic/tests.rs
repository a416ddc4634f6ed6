use pretty_assertions::assert_eq;

use super::*;

#[test]
fn diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_message("alternatives bind different names")
        .with_label(Span::new(0, 5), "binds `x`")
        .with_secondary_label(Span::new(8, 12), "does not bind `x`")
        .with_note("every alternative must bind the same names")
        .with_suggestion(Suggestion::text("bind `x` in every alternative", 0));

    assert_eq!(diag.code, ErrorCode::E3001);
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.labels[0], Label::primary(Span::new(0, 5), "binds `x`"));
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn labels_keep_insertion_order() {
    let diag = Diagnostic::error(ErrorCode::E3003)
        .with_secondary_label(Span::new(1, 2), "context")
        .with_label(Span::new(3, 4), "here");
    assert_eq!(
        diag.labels,
        vec![
            Label::secondary(Span::new(1, 2), "context"),
            Label::primary(Span::new(3, 4), "here"),
        ]
    );
}

#[test]
fn diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E3002)
        .with_message("incompatible types for `x`")
        .with_label(Span::new(0, 5), "here")
        .with_note("no common supertype")
        .with_suggestion(Suggestion::text("add an ascription", 0));

    let expected = "error [E3002]: incompatible types for `x`\n  \
                    --> 0..5: here\n  \
                    = note: no common supertype\n  \
                    = help: add an ascription";
    assert_eq!(diag.to_string(), expected);
}
