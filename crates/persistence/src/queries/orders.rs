// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order, position, and answer queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rollno::{AnswerRecord, DuplicateQuery, OrderRef};
use rollno_domain::OrderStatus;
use tracing::debug;

use super::{replace, upper};
use crate::diesel_schema::{order_positions, orders, question_answers};
use crate::error::PersistenceError;

/// Order statuses stored for orders that hold their roll numbers.
fn active_status_codes() -> Vec<&'static str> {
    OrderStatus::ACTIVE.iter().map(OrderStatus::as_str).collect()
}

/// Returns whether an active order of the event holds an answer with the
/// given identity key.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn active_answer_exists(
    conn: &mut SqliteConnection,
    query: &DuplicateQuery<'_>,
) -> Result<bool, PersistenceError> {
    let mut search = question_answers::table
        .inner_join(order_positions::table.inner_join(orders::table))
        .filter(question_answers::question_id.eq(query.question_id))
        .filter(orders::event_id.eq(query.event_id))
        .filter(orders::status.eq_any(active_status_codes()))
        .filter(upper(replace(question_answers::answer, "-", "")).eq(query.key))
        .select(question_answers::answer_id)
        .into_boxed();

    if let Some(excluded) = query.exclude_order {
        search = search.filter(orders::order_id.ne(excluded));
    }

    let found: Option<i64> = search
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("active_answer_exists: {e}")))?;

    debug!(
        event_id = query.event_id,
        question_id = query.question_id,
        key = query.key,
        found = found.is_some(),
        "Searched for duplicate answers"
    );
    Ok(found.is_some())
}

/// Returns the answers of an order to a question, across all positions.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn order_answers(
    conn: &mut SqliteConnection,
    order_id: i64,
    question_id: i64,
) -> Result<Vec<AnswerRecord>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, String)> = question_answers::table
        .inner_join(order_positions::table)
        .filter(order_positions::order_id.eq(order_id))
        .filter(question_answers::question_id.eq(question_id))
        .order(question_answers::answer_id.asc())
        .select((
            question_answers::answer_id,
            question_answers::position_id,
            question_answers::question_id,
            question_answers::answer,
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("order_answers: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(answer_id, position_id, question_id, answer)| AnswerRecord {
            answer_id,
            position_id,
            order_id,
            question_id,
            answer,
        })
        .collect())
}

/// Looks up an order by its code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_order_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<OrderRef>, PersistenceError> {
    let row: Option<(i64, i64, String)> = orders::table
        .filter(orders::code.eq(code))
        .select((orders::order_id, orders::event_id, orders::code))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_order_by_code: {e}")))?;

    Ok(row.map(|(order_id, event_id, code)| OrderRef {
        order_id,
        event_id,
        code,
    }))
}

/// Returns the status of an order.
///
/// # Errors
///
/// Returns an error if the order does not exist or its status is unknown.
pub fn order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<OrderStatus, PersistenceError> {
    let status: String = orders::table
        .find(order_id)
        .select(orders::status)
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("order_status: {e}")))?
        .ok_or_else(|| PersistenceError::NotFound(format!("order {order_id}")))?;

    status
        .parse()
        .map_err(|e| PersistenceError::InvalidData(format!("order {order_id}: {e}")))
}
