use super::*;

#[test]
fn all_codes_round_trip_through_strings() {
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::from_code_str(code.as_str()), Some(*code));
        assert_eq!(code.to_string(), code.as_str());
        assert!(!code.description().is_empty());
    }
}

#[test]
fn unknown_code_string() {
    assert_eq!(ErrorCode::from_code_str("E0000"), None);
}

#[test]
fn categories() {
    assert!(ErrorCode::E3002.is_pattern_error());
    assert!(!ErrorCode::E3002.is_internal_error());
    assert!(ErrorCode::E9001.is_internal_error());
    assert!(!ErrorCode::E9001.is_pattern_error());
}
