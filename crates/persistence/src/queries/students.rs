// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rollno_domain::Student;

use crate::data_models::StudentData;
use crate::diesel_schema::students;
use crate::error::PersistenceError;

/// Diesel Queryable struct for student rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
struct StudentRow {
    student_id: i64,
    event_id: i64,
    roll_number: String,
    name: String,
    department: String,
    email: String,
    batch: String,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

impl From<StudentRow> for StudentData {
    fn from(row: StudentRow) -> Self {
        Self {
            student_id: row.student_id,
            event_id: row.event_id,
            student: Student {
                roll_number: row.roll_number,
                name: row.name,
                department: row.department,
                email: row.email,
                batch: row.batch,
                is_active: row.is_active != 0,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Lists the students of an event ordered by roll number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_students(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<StudentData>, PersistenceError> {
    let rows: Vec<StudentRow> = students::table
        .filter(students::event_id.eq(event_id))
        .order(students::roll_number.asc())
        .select(StudentRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_students: {e}")))?;

    Ok(rows.into_iter().map(StudentData::from).collect())
}

/// Looks up a student of an event by roll number.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the student is not found.
pub fn find_student(
    conn: &mut SqliteConnection,
    event_id: i64,
    roll_number: &str,
) -> Result<Option<StudentData>, PersistenceError> {
    let row: Option<StudentRow> = students::table
        .filter(students::event_id.eq(event_id))
        .filter(students::roll_number.eq(roll_number))
        .select(StudentRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_student: {e}")))?;

    Ok(row.map(StudentData::from))
}
