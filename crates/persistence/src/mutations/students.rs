// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student mutations.
//!
//! Every mutation rewrites the event's materialized roster in the same
//! transaction, so the roster setting always matches the student table.

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use rollno_domain::{
    SETTINGS_KEY_VALID_STUDENTS, Student, StudentImportRow, StudentRecord, project_roster,
};
use tracing::{info, warn};

use super::now_rfc3339;
use super::settings::write_setting;
use crate::data_models::{ImportReport, StudentData};
use crate::diesel_schema::students;
use crate::error::PersistenceError;
use crate::queries::students::{find_student, list_students};

/// Trims every field and canonicalizes the roll number.
fn tidy(student: &Student) -> Student {
    Student {
        roll_number: student.roll_number.trim().to_uppercase(),
        name: student.name.trim().to_string(),
        department: student.department.trim().to_string(),
        email: student.email.trim().to_string(),
        batch: student.batch.trim().to_string(),
        is_active: student.is_active,
    }
}

/// Names the first required field that is blank.
fn missing_field(student: &Student) -> Option<&'static str> {
    [
        ("roll_number", &student.roll_number),
        ("name", &student.name),
        ("department", &student.department),
    ]
    .into_iter()
    .find(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
}

/// Recomputes the roster of an event from its students and stores it.
///
/// Returns the number of roster entries.
///
/// # Errors
///
/// Returns an error if the students cannot be read or the roster cannot be
/// written.
pub fn refresh_roster(conn: &mut SqliteConnection, event_id: i64) -> Result<usize, PersistenceError> {
    let students: Vec<Student> = list_students(conn, event_id)?
        .into_iter()
        .map(|data| data.student)
        .collect();
    let roster: Vec<StudentRecord> = project_roster(&students);

    write_setting(conn, event_id, SETTINGS_KEY_VALID_STUDENTS, &roster)?;

    info!(event_id, entries = roster.len(), "Roster refreshed");
    Ok(roster.len())
}

fn insert_student(
    conn: &mut SqliteConnection,
    event_id: i64,
    student: &Student,
    timestamp: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(students::table)
        .values((
            students::event_id.eq(event_id),
            students::roll_number.eq(&student.roll_number),
            students::name.eq(&student.name),
            students::department.eq(&student.department),
            students::email.eq(&student.email),
            students::batch.eq(&student.batch),
            students::is_active.eq(i32::from(student.is_active)),
            students::created_at.eq(timestamp),
            students::updated_at.eq(timestamp),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_student: {e}")))?;
    Ok(())
}

fn update_student_row(
    conn: &mut SqliteConnection,
    event_id: i64,
    student: &Student,
    timestamp: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(
        students::table
            .filter(students::event_id.eq(event_id))
            .filter(students::roll_number.eq(&student.roll_number)),
    )
    .set((
        students::name.eq(&student.name),
        students::department.eq(&student.department),
        students::email.eq(&student.email),
        students::batch.eq(&student.batch),
        students::is_active.eq(i32::from(student.is_active)),
        students::updated_at.eq(timestamp),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_student: {e}")))
}

/// Adds a student to an event.
///
/// # Errors
///
/// Returns an error if a required field is blank, the roll number is
/// already registered for the event, or a write fails.
pub fn create_student(
    conn: &mut SqliteConnection,
    event_id: i64,
    student: &Student,
) -> Result<StudentData, PersistenceError> {
    let student: Student = tidy(student);
    if let Some(field) = missing_field(&student) {
        return Err(PersistenceError::InvalidData(format!("{field} is required")));
    }

    conn.transaction(|conn| {
        if find_student(conn, event_id, &student.roll_number)?.is_some() {
            return Err(PersistenceError::DuplicateStudent {
                event_id,
                roll_number: student.roll_number.clone(),
            });
        }

        let timestamp: String = now_rfc3339()?;
        insert_student(conn, event_id, &student, &timestamp)?;
        refresh_roster(conn, event_id)?;

        info!(event_id, roll_number = %student.roll_number, "Student created");
        find_student(conn, event_id, &student.roll_number)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("student {}", student.roll_number))
        })
    })
}

/// Replaces the details of an existing student, matched by roll number.
///
/// # Errors
///
/// Returns an error if the student does not exist or a write fails.
pub fn update_student(
    conn: &mut SqliteConnection,
    event_id: i64,
    student: &Student,
) -> Result<StudentData, PersistenceError> {
    let student: Student = tidy(student);

    conn.transaction(|conn| {
        let timestamp: String = now_rfc3339()?;
        if update_student_row(conn, event_id, &student, &timestamp)? == 0 {
            return Err(PersistenceError::StudentNotFound {
                event_id,
                roll_number: student.roll_number.clone(),
            });
        }
        refresh_roster(conn, event_id)?;

        info!(event_id, roll_number = %student.roll_number, "Student updated");
        find_student(conn, event_id, &student.roll_number)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("student {}", student.roll_number))
        })
    })
}

/// Removes a student from an event.
///
/// # Errors
///
/// Returns an error if the student does not exist or a write fails.
pub fn delete_student(
    conn: &mut SqliteConnection,
    event_id: i64,
    roll_number: &str,
) -> Result<(), PersistenceError> {
    let roll_number: String = roll_number.trim().to_uppercase();

    conn.transaction(|conn| {
        let deleted: usize = diesel::delete(
            students::table
                .filter(students::event_id.eq(event_id))
                .filter(students::roll_number.eq(&roll_number)),
        )
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_student: {e}")))?;

        if deleted == 0 {
            return Err(PersistenceError::StudentNotFound {
                event_id,
                roll_number: roll_number.clone(),
            });
        }
        refresh_roster(conn, event_id)?;

        info!(event_id, roll_number = %roll_number, "Student deleted");
        Ok(())
    })
}

/// Imports student rows into an event.
///
/// Rows are normalized first. A row whose roll number already exists is
/// updated when `update_existing` is set and reported as an error
/// otherwise. Invalid rows are reported and skipped; the rest are applied
/// and the roster is refreshed once.
///
/// # Errors
///
/// Returns an error only if the database fails. Row problems go into the
/// report.
pub fn import_students(
    conn: &mut SqliteConnection,
    event_id: i64,
    rows: Vec<StudentImportRow>,
    update_existing: bool,
) -> Result<ImportReport, PersistenceError> {
    conn.transaction(|conn| {
        let timestamp: String = now_rfc3339()?;
        let mut report: ImportReport = ImportReport::default();

        for (index, row) in rows.into_iter().enumerate() {
            let row_number: usize = index + 1;
            let student: Student = row.into_student();

            if let Some(field) = missing_field(&student) {
                report
                    .errors
                    .push(format!("Row {row_number}: {field} is required"));
                continue;
            }

            if find_student(conn, event_id, &student.roll_number)?.is_some() {
                if update_existing {
                    update_student_row(conn, event_id, &student, &timestamp)?;
                    report.updated += 1;
                } else {
                    report.errors.push(format!(
                        "Row {row_number}: Student with roll number {} already exists",
                        student.roll_number
                    ));
                }
                continue;
            }

            insert_student(conn, event_id, &student, &timestamp)?;
            report.created += 1;
        }

        refresh_roster(conn, event_id)?;

        if !report.errors.is_empty() {
            warn!(event_id, errors = report.errors.len(), "Import skipped rows");
        }
        info!(
            event_id,
            created = report.created,
            updated = report.updated,
            "Students imported"
        );
        Ok(report)
    })
}
