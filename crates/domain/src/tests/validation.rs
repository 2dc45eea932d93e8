// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ConfigurationError, DepartmentCodeSet, FormatOutcome, Question, QuestionKind, RollNumber,
    RollNumberError, check_format, department_code, normalize, validate_format,
    validate_question_eligibility,
};

fn create_test_question(kind: QuestionKind, required: bool) -> Question {
    Question {
        question_id: 7,
        event_id: 1,
        identifier: String::from("roll_number"),
        kind,
        required,
        active: true,
    }
}

#[test]
fn test_validate_format_accepts_canonical_input() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: RollNumber = validate_format("CSE001", &departments).unwrap();
    assert_eq!(result.as_str(), "CSE001");
}

#[test]
fn test_validate_format_canonicalizes_lowercase_hyphenated_input() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: RollNumber = validate_format("cse-001", &departments).unwrap();
    assert_eq!(result.as_str(), "CSE-001");
}

#[test]
fn test_validate_format_accepts_valid_variants() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    for number in ["CSE001", "ECE002", "CSE-001", "ME001", "MECH101", "CS999999"] {
        let result: RollNumber = validate_format(number, &departments).unwrap();
        assert_eq!(result.as_str(), normalize(number));
    }
}

#[test]
fn test_validate_format_rejects_empty_input() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: Result<RollNumber, RollNumberError> = validate_format("", &departments);
    assert_eq!(result, Err(RollNumberError::EmptyInput));
}

#[test]
fn test_validate_format_rejects_input_that_cleans_to_nothing() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: Result<RollNumber, RollNumberError> = validate_format("@@@", &departments);
    assert_eq!(result, Err(RollNumberError::TooShort { min: 5 }));
}

#[test]
fn test_validate_format_rejects_too_short() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: Result<RollNumber, RollNumberError> = validate_format("CS", &departments);
    assert_eq!(result, Err(RollNumberError::TooShort { min: 5 }));
}

#[test]
fn test_validate_format_rejects_too_long() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: Result<RollNumber, RollNumberError> =
        validate_format(&"A".repeat(13), &departments);
    assert_eq!(result, Err(RollNumberError::TooLong { max: 12 }));
}

#[test]
fn test_validate_format_length_is_measured_after_normalization() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    // 15 raw characters, 6 after cleaning
    let result: RollNumber = validate_format(" C S E ! 0 0 1 ", &departments).unwrap();
    assert_eq!(result.as_str(), "CSE001");
}

#[test]
fn test_validate_format_rejects_bad_grammar() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    for number in ["123ABC", "CSENG001", "CSEXXX", "CS-01", "CSEABC", "invalid"] {
        let result: Result<RollNumber, RollNumberError> = validate_format(number, &departments);
        assert_eq!(
            result,
            Err(RollNumberError::InvalidFormat),
            "expected InvalidFormat for {number}"
        );
    }
}

#[test]
fn test_validate_format_rejects_unknown_department() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let result: Result<RollNumber, RollNumberError> = validate_format("XY001", &departments);
    match result {
        Err(RollNumberError::InvalidDepartment { accepted }) => {
            assert_eq!(accepted, departments.sorted());
            assert!(!accepted.contains(&String::from("XY")));
        }
        other => panic!("Expected InvalidDepartment, got: {other:?}"),
    }
}

#[test]
fn test_validate_format_uses_configured_departments() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::from_configured(["XY", "ZZ"]);

    assert_eq!(
        validate_format("xy-12345", &departments).unwrap().as_str(),
        "XY-12345"
    );
    assert!(matches!(
        validate_format("CSE001", &departments),
        Err(RollNumberError::InvalidDepartment { .. })
    ));
}

#[test]
fn test_invalid_department_message_lists_sorted_codes() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::from_configured(["ZZ", "AB", "MM"]);

    let err: RollNumberError = validate_format("XY001", &departments).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid department code. Valid codes are: AB, MM, ZZ"
    );
}

#[test]
fn test_check_format_reports_outcome_without_error() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    let outcome: FormatOutcome = check_format("cse001", &departments);
    assert!(outcome.ok);
    assert_eq!(outcome.value, "CSE001");

    let outcome: FormatOutcome = check_format("invalid", &departments);
    assert!(!outcome.ok);
    assert!(outcome.value.contains("followed by numbers"));
}

#[test]
fn test_department_code_extracts_leading_letters() {
    assert_eq!(department_code("MECH-123456"), Some("MECH"));
    assert_eq!(department_code("CS001"), Some("CS"));
    assert_eq!(department_code("123ABC"), None);
}

#[test]
fn test_question_eligibility_accepts_required_text_question() {
    let question: Question = create_test_question(QuestionKind::Text, true);
    assert!(validate_question_eligibility(&question, 1).is_ok());

    let question: Question = create_test_question(QuestionKind::Number, true);
    assert!(validate_question_eligibility(&question, 1).is_ok());
}

#[test]
fn test_question_eligibility_rejects_optional_question() {
    let question: Question = create_test_question(QuestionKind::Text, false);
    assert_eq!(
        validate_question_eligibility(&question, 1),
        Err(ConfigurationError::QuestionNotRequired)
    );
}

#[test]
fn test_question_eligibility_rejects_choice_question() {
    let question: Question = create_test_question(QuestionKind::Choice, true);
    assert!(matches!(
        validate_question_eligibility(&question, 1),
        Err(ConfigurationError::UnsupportedQuestionKind { .. })
    ));
}

#[test]
fn test_question_eligibility_rejects_foreign_event() {
    let question: Question = create_test_question(QuestionKind::Text, true);
    assert_eq!(
        validate_question_eligibility(&question, 2),
        Err(ConfigurationError::QuestionEventMismatch {
            question_id: 7,
            event_id: 2,
        })
    );
}
