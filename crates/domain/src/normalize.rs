// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roll number normalization.
//!
//! Both functions are total and never fail. `normalize` is idempotent:
//! normalizing an already canonical value returns it unchanged.

use serde_json::Value;

/// Removes every character outside `[A-Za-z0-9-]`.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Produces the canonical form of a roll number.
///
/// The value is cleaned, trimmed, and upper-cased. Empty input yields an
/// empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Trimming is a no-op after cleaning, kept as its own step.
    clean(raw).trim().to_ascii_uppercase()
}

/// Normalizes an answer that may not be a string.
///
/// Host answers arrive as JSON values. Non-string values are stringified
/// before normalization; `null` yields an empty string.
#[must_use]
pub fn normalize_value(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => normalize(s),
        other => normalize(&other.to_string()),
    }
}

/// Reduces a roll number to the key used to decide whether two answers
/// name the same student.
///
/// The key is the canonical form without hyphens, so `CSE-001` and
/// `cse001` share the key `CSE001`.
#[must_use]
pub fn identity_key(raw: &str) -> String {
    normalize(raw).replace('-', "")
}
