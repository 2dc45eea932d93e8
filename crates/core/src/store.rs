// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage collaborators consumed by the engine.
//!
//! The engine never talks to a database directly. Hosts provide the event
//! configuration and the order/answer data through these traits, and a
//! `UnitOfWork` that runs commit-time validation in one transaction.

use crate::error::StoreError;
use rollno_domain::{OrderStatus, Question, StudentRecord};

/// An answer to a question, attached to an order position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// The answer id.
    pub answer_id: i64,
    /// The order position the answer belongs to.
    pub position_id: i64,
    /// The order owning the position.
    pub order_id: i64,
    /// The question being answered.
    pub question_id: i64,
    /// The stored answer text.
    pub answer: String,
}

/// Parameters of a duplicate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateQuery<'a> {
    /// The event to search within.
    pub event_id: i64,
    /// The roll number question.
    pub question_id: i64,
    /// The identity key of the roll number. Stored answers match when
    /// their own identity key is equal.
    pub key: &'a str,
    /// An order whose answers never count as duplicates.
    pub exclude_order: Option<i64>,
}

/// An order handed to the commit-time hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRef {
    /// The order id.
    pub order_id: i64,
    /// The event the order belongs to.
    pub event_id: i64,
    /// Human-facing order code.
    pub code: String,
}

/// Per-event key/value configuration.
pub trait SettingsStore {
    /// Reads `rollno_question_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be read.
    fn question_id(&mut self, event_id: i64) -> Result<Option<i64>, StoreError>;

    /// Writes `rollno_question_id`; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be written.
    fn set_question_id(&mut self, event_id: i64, question_id: Option<i64>)
    -> Result<(), StoreError>;

    /// Reads `valid_department_codes`; empty when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be read.
    fn department_codes(&mut self, event_id: i64) -> Result<Vec<String>, StoreError>;

    /// Writes `valid_department_codes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be written.
    fn set_department_codes(&mut self, event_id: i64, codes: &[String]) -> Result<(), StoreError>;

    /// Reads `valid_roll_numbers`; empty when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be read.
    fn roster(&mut self, event_id: i64) -> Result<Vec<StudentRecord>, StoreError>;
}

/// Host order, position, and answer data.
pub trait OrderStore {
    /// Looks up a question by id, regardless of event or state.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_question(&mut self, question_id: i64) -> Result<Option<Question>, StoreError>;

    /// Looks up a question of `event_id` by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_question_by_identifier(
        &mut self,
        event_id: i64,
        identifier: &str,
    ) -> Result<Option<Question>, StoreError>;

    /// Returns whether an order in an active status holds the roll number.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    fn active_answer_exists(&mut self, query: &DuplicateQuery<'_>) -> Result<bool, StoreError>;

    /// Returns the answers of `order_id` to `question_id`, across all
    /// positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the answers cannot be read.
    fn order_answers(
        &mut self,
        order_id: i64,
        question_id: i64,
    ) -> Result<Vec<AnswerRecord>, StoreError>;

    /// Replaces the text of an answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be written.
    fn update_answer(&mut self, answer_id: i64, answer: &str) -> Result<(), StoreError>;

    /// Sets the status of an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be written.
    fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> Result<(), StoreError>;
}

/// Both storage collaborators behind one handle.
pub trait Storage: SettingsStore + OrderStore {}

impl<T: SettingsStore + OrderStore> Storage for T {}

/// Runs work atomically against storage.
///
/// Implementations must provide read-committed or stronger isolation: a
/// roll number committed by an overlapping unit of work must be visible to
/// the duplicate search of this one, or this one must wait for it.
pub trait UnitOfWork: Storage {
    /// Runs `work` in one transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when
    /// it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error of `work`, or a backend error if the transaction
    /// cannot be started or committed.
    fn atomically<T, F>(&mut self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn Storage) -> Result<T, StoreError>;
}
