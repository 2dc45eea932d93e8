// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{EventData, NewQuestion};
use crate::diesel_schema::{events, questions};
use crate::error::PersistenceError;

/// Creates an event.
///
/// # Errors
///
/// Returns an error if the slug is taken or the insert fails.
pub fn create_event(
    conn: &mut SqliteConnection,
    slug: &str,
    name: &str,
) -> Result<EventData, PersistenceError> {
    diesel::insert_into(events::table)
        .values((events::slug.eq(slug), events::name.eq(name)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("create_event: {e}")))?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    info!(event_id, slug, "Created event");

    Ok(EventData {
        event_id,
        slug: slug.to_string(),
        name: name.to_string(),
    })
}

/// Creates a question for an event and returns its id.
///
/// # Errors
///
/// Returns an error if the identifier is taken within the event or the
/// insert fails.
pub fn create_question(
    conn: &mut SqliteConnection,
    event_id: i64,
    question: &NewQuestion,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(questions::table)
        .values((
            questions::event_id.eq(event_id),
            questions::identifier.eq(&question.identifier),
            questions::kind.eq(question.kind.as_code()),
            questions::required.eq(i32::from(question.required)),
            questions::active.eq(i32::from(question.active)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("create_question: {e}")))?;

    let question_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        event_id,
        question_id,
        identifier = %question.identifier,
        kind = %question.kind,
        "Created question"
    );
    Ok(question_id)
}

/// Activates or deactivates a question.
///
/// # Errors
///
/// Returns an error if the question does not exist or the update fails.
pub fn set_question_active(
    conn: &mut SqliteConnection,
    question_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(questions::table.find(question_id))
        .set(questions::active.eq(i32::from(active)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_question_active: {e}")))?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("question {question_id}")));
    }
    Ok(())
}
