// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and question queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rollno_domain::{Question, QuestionKind};

use crate::data_models::EventData;
use crate::diesel_schema::{events, questions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    slug: String,
    name: String,
}

impl From<EventRow> for EventData {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            slug: row.slug,
            name: row.name,
        }
    }
}

/// Diesel Queryable struct for question rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionRow {
    question_id: i64,
    event_id: i64,
    identifier: String,
    kind: String,
    required: i32,
    active: i32,
}

impl TryFrom<QuestionRow> for Question {
    type Error = PersistenceError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let kind: QuestionKind = row
            .kind
            .parse()
            .map_err(|e| PersistenceError::InvalidData(format!("question {}: {e}", row.question_id)))?;

        Ok(Self {
            question_id: row.question_id,
            event_id: row.event_id,
            identifier: row.identifier,
            kind,
            required: row.required != 0,
            active: row.active != 0,
        })
    }
}

/// Looks up an event by slug.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn find_event_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<EventData>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::slug.eq(slug))
        .select(EventRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_event_by_slug: {e}")))?;

    Ok(row.map(EventData::from))
}

/// Lists all events ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<EventData>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_events: {e}")))?;

    Ok(rows.into_iter().map(EventData::from).collect())
}

/// Looks up a question by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored kind is unknown.
pub fn find_question(
    conn: &mut SqliteConnection,
    question_id: i64,
) -> Result<Option<Question>, PersistenceError> {
    questions::table
        .find(question_id)
        .select(QuestionRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_question: {e}")))?
        .map(Question::try_from)
        .transpose()
}

/// Looks up a question of an event by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the stored kind is unknown.
pub fn find_question_by_identifier(
    conn: &mut SqliteConnection,
    event_id: i64,
    identifier: &str,
) -> Result<Option<Question>, PersistenceError> {
    questions::table
        .filter(questions::event_id.eq(event_id))
        .filter(questions::identifier.eq(identifier))
        .select(QuestionRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_question_by_identifier: {e}")))?
        .map(Question::try_from)
        .transpose()
}

/// Lists the questions of an event ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored kind is unknown.
pub fn list_questions(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Question>, PersistenceError> {
    let rows: Vec<QuestionRow> = questions::table
        .filter(questions::event_id.eq(event_id))
        .order(questions::question_id.asc())
        .select(QuestionRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_questions: {e}")))?;

    rows.into_iter().map(Question::try_from).collect()
}
