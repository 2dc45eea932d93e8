// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine-wide constants: length bounds, cache layout, and settings keys.

use std::time::Duration;

/// Minimum canonical roll number length (e.g., `CS001`).
pub const MIN_ROLL_NUMBER_LENGTH: usize = 5;

/// Maximum canonical roll number length (e.g., `MECH-123456`).
pub const MAX_ROLL_NUMBER_LENGTH: usize = 12;

/// Lifetime of every cached per-event setting.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Namespace prefix shared by all cache keys.
pub const CACHE_KEY_PREFIX: &str = "pretix_rollno_validator";

/// Settings key holding the id of the roll number question.
pub const SETTINGS_KEY_QUESTION_ID: &str = "rollno_question_id";

/// Settings key holding the materialized roster.
pub const SETTINGS_KEY_VALID_STUDENTS: &str = "valid_roll_numbers";

/// Settings key holding the configured department codes.
pub const SETTINGS_KEY_DEPARTMENT_CODES: &str = "valid_department_codes";

/// Cache key suffix for the resolved department codes.
pub const CACHE_KIND_DEPARTMENT_CODES: &str = "department_codes";

/// Cache key suffix for the roster.
pub const CACHE_KIND_VALID_STUDENTS: &str = "valid_students";

/// Cache key suffix for the configured question id.
pub const CACHE_KIND_QUESTION_ID: &str = "question_id";

/// Department codes accepted when an event configures none.
pub const DEFAULT_DEPARTMENT_CODES: [&str; 12] = [
    "CS", "CSE", // Computer Science
    "EC", "ECE", // Electronics
    "ME", "MECH", // Mechanical
    "EE", // Electrical
    "CE", "CIVIL", // Civil
    "IT", // Information Technology
    "BT", "BTECH", // Biotechnology
];

/// Builds the cache key for one kind of per-event data.
///
/// # Arguments
///
/// * `event_id` - The event the data belongs to
/// * `kind` - The kind of data (e.g., `department_codes`)
#[must_use]
pub fn cache_key(event_id: i64, kind: &str) -> String {
    format!("{CACHE_KEY_PREFIX}:{event_id}:{kind}")
}
