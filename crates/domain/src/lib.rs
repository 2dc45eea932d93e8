// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod constants;
mod error;
mod normalize;
mod roster;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use constants::{
    CACHE_KEY_PREFIX, CACHE_KIND_DEPARTMENT_CODES, CACHE_KIND_QUESTION_ID,
    CACHE_KIND_VALID_STUDENTS, CACHE_TTL, DEFAULT_DEPARTMENT_CODES, MAX_ROLL_NUMBER_LENGTH,
    MIN_ROLL_NUMBER_LENGTH, SETTINGS_KEY_DEPARTMENT_CODES, SETTINGS_KEY_QUESTION_ID,
    SETTINGS_KEY_VALID_STUDENTS, cache_key,
};
pub use error::{ConfigurationError, RollNumberError};
pub use normalize::{clean, identity_key, normalize, normalize_value};
pub use roster::{
    Student, StudentImportRow, StudentRecord, match_roster, project_roster, roster_listing,
};
pub use types::{DepartmentCodeSet, OrderStatus, Question, QuestionKind, RollNumber};
pub use validation::{
    FormatOutcome, check_format, department_code, validate_format, validate_question_eligibility,
};
