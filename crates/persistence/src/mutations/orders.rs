// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rollno::OrderRef;
use rollno_domain::OrderStatus;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewOrder;
use crate::diesel_schema::{order_positions, orders, question_answers};
use crate::error::PersistenceError;

/// Inserts an order with its positions and answers.
///
/// # Errors
///
/// Returns an error if the code is taken, a question does not exist, or an
/// insert fails.
pub fn insert_order(
    conn: &mut SqliteConnection,
    order: &NewOrder,
) -> Result<OrderRef, PersistenceError> {
    diesel::insert_into(orders::table)
        .values((
            orders::event_id.eq(order.event_id),
            orders::code.eq(&order.code),
            orders::status.eq(order.status.as_str()),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_order: {e}")))?;
    let order_id: i64 = get_last_insert_rowid(conn)?;

    for position in &order.positions {
        diesel::insert_into(order_positions::table)
            .values(order_positions::order_id.eq(order_id))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("insert_order: {e}")))?;
        let position_id: i64 = get_last_insert_rowid(conn)?;

        for (question_id, answer) in &position.answers {
            diesel::insert_into(question_answers::table)
                .values((
                    question_answers::position_id.eq(position_id),
                    question_answers::question_id.eq(question_id),
                    question_answers::answer.eq(answer),
                ))
                .execute(conn)
                .map_err(|e| PersistenceError::QueryFailed(format!("insert_order: {e}")))?;
        }
    }

    info!(
        order_id,
        event_id = order.event_id,
        code = %order.code,
        positions = order.positions.len(),
        "Inserted order"
    );

    Ok(OrderRef {
        order_id,
        event_id: order.event_id,
        code: order.code.clone(),
    })
}

/// Replaces the text of an answer.
///
/// # Errors
///
/// Returns an error if the answer does not exist or the update fails.
pub fn update_answer(
    conn: &mut SqliteConnection,
    answer_id: i64,
    answer: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(question_answers::table.find(answer_id))
        .set(question_answers::answer.eq(answer))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_answer: {e}")))?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("answer {answer_id}")));
    }

    debug!(answer_id, answer, "Rewrote answer");
    Ok(())
}

/// Sets the status of an order.
///
/// # Errors
///
/// Returns an error if the order does not exist or the update fails.
pub fn set_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(orders::table.find(order_id))
        .set(orders::status.eq(status.as_str()))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_order_status: {e}")))?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("order {order_id}")));
    }

    info!(order_id, %status, "Order status changed");
    Ok(())
}
