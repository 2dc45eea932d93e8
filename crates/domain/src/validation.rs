// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::constants::{MAX_ROLL_NUMBER_LENGTH, MIN_ROLL_NUMBER_LENGTH};
use crate::error::{ConfigurationError, RollNumberError};
use crate::normalize::normalize;
use crate::types::{DepartmentCodeSet, Question, RollNumber};
use regex::Regex;
use std::sync::LazyLock;

/// Department code (2-4 letters), optional hyphen, then 3-6 digits.
///
/// The first capture group is the department code.
#[allow(clippy::expect_used)]
static ROLL_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,4})-?([0-9]{3,6})$").expect("roll number pattern is valid")
});

/// Result of a format check that does not propagate failure.
///
/// `value` is the canonical roll number when `ok`, otherwise the
/// human-readable rejection message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// Whether the input passed every check.
    pub ok: bool,
    /// Canonical value or rejection message.
    pub value: String,
}

impl From<Result<RollNumber, RollNumberError>> for FormatOutcome {
    fn from(result: Result<RollNumber, RollNumberError>) -> Self {
        match result {
            Ok(roll_number) => Self {
                ok: true,
                value: roll_number.into_inner(),
            },
            Err(err) => Self {
                ok: false,
                value: err.to_string(),
            },
        }
    }
}

/// Extracts the department code from a canonical roll number.
///
/// Returns `None` if the value does not match the roll number grammar.
#[must_use]
pub fn department_code(canonical: &str) -> Option<&str> {
    ROLL_NUMBER_PATTERN
        .captures(canonical)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str())
}

/// Validates the structure of a roll number and returns its canonical form.
///
/// Checks run in order and stop at the first failure: empty input, length
/// bounds, grammar, then department code membership.
///
/// # Arguments
///
/// * `raw` - The answer as entered
/// * `departments` - The department codes accepted for the event
///
/// # Errors
///
/// Returns an error if:
/// - The input is empty
/// - The canonical value is shorter than 5 or longer than 12 characters
/// - The canonical value does not match the grammar
/// - The department code is not accepted for the event
pub fn validate_format(
    raw: &str,
    departments: &DepartmentCodeSet,
) -> Result<RollNumber, RollNumberError> {
    if raw.is_empty() {
        return Err(RollNumberError::EmptyInput);
    }

    let canonical: String = normalize(raw);

    let length: usize = canonical.len();
    if length < MIN_ROLL_NUMBER_LENGTH {
        return Err(RollNumberError::TooShort {
            min: MIN_ROLL_NUMBER_LENGTH,
        });
    }
    if length > MAX_ROLL_NUMBER_LENGTH {
        return Err(RollNumberError::TooLong {
            max: MAX_ROLL_NUMBER_LENGTH,
        });
    }

    let Some(code) = department_code(&canonical) else {
        return Err(RollNumberError::InvalidFormat);
    };

    if !departments.contains(code) {
        return Err(RollNumberError::InvalidDepartment {
            accepted: departments.sorted(),
        });
    }

    Ok(RollNumber::from_canonical(canonical))
}

/// Same checks as [`validate_format`], reported as an outcome value.
#[must_use]
pub fn check_format(raw: &str, departments: &DepartmentCodeSet) -> FormatOutcome {
    validate_format(raw, departments).into()
}

/// Validates that a question may be selected as the roll number question.
///
/// # Arguments
///
/// * `question` - The candidate question
/// * `event_id` - The event being configured
///
/// # Errors
///
/// Returns an error if the question is not required, is not a text or
/// number question, or belongs to another event.
pub fn validate_question_eligibility(
    question: &Question,
    event_id: i64,
) -> Result<(), ConfigurationError> {
    if !question.required {
        return Err(ConfigurationError::QuestionNotRequired);
    }

    if !question.kind.accepts_roll_numbers() {
        return Err(ConfigurationError::UnsupportedQuestionKind {
            kind: question.kind.to_string(),
        });
    }

    if question.event_id != event_id {
        return Err(ConfigurationError::QuestionEventMismatch {
            question_id: question.question_id,
            event_id,
        });
    }

    Ok(())
}
