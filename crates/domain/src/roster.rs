// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student roster: authoritative student rows, their projection into the
//! per-event roster, and roster membership checks.

use crate::error::RollNumberError;
use crate::normalize::identity_key;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of the materialized roster.
///
/// This is the shape stored under `valid_roll_numbers` in the event
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Roll number as stored.
    pub roll_number: String,
    /// Student name.
    pub name: String,
    /// Department or branch.
    #[serde(default)]
    pub department: String,
    /// Batch or year.
    #[serde(default)]
    pub batch: String,
}

/// The authoritative student row for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Roll number, unique within the event.
    pub roll_number: String,
    /// Student name.
    pub name: String,
    /// Department or branch.
    pub department: String,
    /// Contact address, possibly empty.
    pub email: String,
    /// Batch or year, possibly empty.
    pub batch: String,
    /// Whether the student may register.
    pub is_active: bool,
}

impl Student {
    /// Returns the roster entry for this student.
    #[must_use]
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            roll_number: self.roll_number.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
            batch: self.batch.clone(),
        }
    }
}

/// A student row as it appears in a bulk import file.
///
/// `roll_number`, `name`, and `department` are required columns; the rest
/// are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentImportRow {
    pub roll_number: String,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl StudentImportRow {
    /// Column names every import file must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 3] = ["roll_number", "name", "department"];

    /// Normalizes the row into a student.
    ///
    /// The roll number is trimmed and upper-cased, other fields are trimmed,
    /// and `is_active` is `true` unless the column says otherwise.
    #[must_use]
    pub fn into_student(self) -> Student {
        Student {
            roll_number: self.roll_number.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            department: self.department.trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_string(),
            batch: self.batch.unwrap_or_default().trim().to_string(),
            is_active: self
                .is_active
                .is_none_or(|flag| flag.trim().eq_ignore_ascii_case("true")),
        }
    }
}

/// Projects student rows into the roster stored in event configuration.
///
/// Only active students are included, ordered by roll number.
#[must_use]
pub fn project_roster(students: &[Student]) -> Vec<StudentRecord> {
    let mut active: Vec<&Student> = students.iter().filter(|s| s.is_active).collect();
    active.sort_by(|a, b| a.roll_number.cmp(&b.roll_number));
    active.into_iter().map(Student::to_record).collect()
}

/// Formats the roster for a rejection message, one entry per line, in
/// stored order.
#[must_use]
pub fn roster_listing(roster: &[StudentRecord]) -> String {
    roster
        .iter()
        .map(|s| format!("- {}: {} ({})", s.roll_number, s.name, s.department))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Checks a roll number against the roster.
///
/// An empty roster accepts everything. Both sides are reduced to their
/// identity key, so hyphenation and case do not matter.
///
/// # Errors
///
/// Returns `RollNumberError::NotInRoster` if the roster is non-empty and
/// does not contain the roll number.
pub fn match_roster(roll_number: &str, roster: &[StudentRecord]) -> Result<(), RollNumberError> {
    if roster.is_empty() {
        return Ok(());
    }

    let key: String = identity_key(roll_number);
    let known: HashSet<String> = roster.iter().map(|s| identity_key(&s.roll_number)).collect();

    if known.contains(&key) {
        return Ok(());
    }

    Err(RollNumberError::NotInRoster {
        listing: roster_listing(roster),
    })
}
