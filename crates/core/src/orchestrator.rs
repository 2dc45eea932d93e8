// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The validation pipeline and the two host hooks built on it.
//!
//! An answer passes format, roster, and duplicate checks in that order. The
//! cart hook rejects a checkout; the commit hook cancels a placed order.

use crate::cache::SettingsCache;
use crate::error::{CartError, OrderError, StoreError};
use crate::registry::RollNumberValidator;
use crate::store::{OrderRef, Storage, UnitOfWork};
use rollno_domain::{
    DepartmentCodeSet, FormatOutcome, OrderStatus, Question, RollNumber, RollNumberError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// One line of a cart awaiting checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Answers keyed by question id.
    pub answers: BTreeMap<i64, Value>,
}

impl CartLine {
    /// Creates a line with a single answer.
    #[must_use]
    pub fn with_answer(question_id: i64, answer: Value) -> Self {
        let mut answers: BTreeMap<i64, Value> = BTreeMap::new();
        answers.insert(question_id, answer);
        Self { answers }
    }
}

/// Result of the commit-time hook for an order that was not canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The event has no active roll number question.
    NotConfigured,
    /// Every answer passed.
    Accepted {
        /// Answers validated.
        checked: usize,
        /// Answers rewritten to canonical form.
        normalized: usize,
    },
}

enum Verdict {
    Accepted { checked: usize, normalized: usize },
    Rejected(RollNumberError),
}

/// Textual form of a cart answer as the host submitted it.
fn answer_text(answer: &Value) -> String {
    match answer {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<C: SettingsCache> RollNumberValidator<C> {
    /// Validates the format of a roll number against the event's department
    /// codes.
    ///
    /// # Errors
    ///
    /// Returns the first format rule the value violates.
    pub fn validate_format<S>(
        &self,
        storage: &mut S,
        raw: &str,
        event_id: i64,
    ) -> Result<RollNumber, RollNumberError>
    where
        S: Storage + ?Sized,
    {
        let departments: DepartmentCodeSet = self.department_codes(storage, event_id);
        rollno_domain::validate_format(raw, &departments)
    }

    /// Same checks as [`Self::validate_format`], reported as an outcome.
    pub fn check_format<S>(&self, storage: &mut S, raw: &str, event_id: i64) -> FormatOutcome
    where
        S: Storage + ?Sized,
    {
        self.validate_format(storage, raw, event_id).into()
    }

    /// Runs the full pipeline on one answer and returns its canonical form.
    ///
    /// # Arguments
    ///
    /// * `storage` - Event configuration and order data
    /// * `raw` - The answer as submitted
    /// * `event_id` - The event being registered for
    /// * `question_id` - The roll number question
    /// * `exclude_order` - The order being validated, if it already exists
    ///
    /// # Errors
    ///
    /// Returns the format error, `NotInRoster`, `RosterUnavailable`, or
    /// `DuplicateRollNumber`, in pipeline order.
    pub fn validate_answer<S>(
        &self,
        storage: &mut S,
        raw: &str,
        event_id: i64,
        question_id: i64,
        exclude_order: Option<i64>,
    ) -> Result<RollNumber, RollNumberError>
    where
        S: Storage + ?Sized,
    {
        let roll_number: RollNumber = self.validate_format(storage, raw, event_id)?;

        self.check_roster(storage, roll_number.as_str(), event_id)?;

        let (exists, _message) = self.check_duplicate(
            storage,
            question_id,
            roll_number.as_str(),
            event_id,
            exclude_order,
        );
        if exists {
            return Err(RollNumberError::DuplicateRollNumber(
                roll_number.into_inner(),
            ));
        }

        Ok(roll_number)
    }

    /// Cart-time hook: validates every answer to the roll number question
    /// and rewrites it to canonical form in place.
    ///
    /// Does nothing when the event has no active roll number question.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Rejected` for the first failing answer, or
    /// `CartError::Storage` if the configuration cannot be read.
    pub fn validate_cart<S>(
        &self,
        storage: &mut S,
        event_id: i64,
        lines: &mut [CartLine],
    ) -> Result<(), CartError>
    where
        S: Storage + ?Sized,
    {
        let Some(question) = self.active_question(storage, event_id)? else {
            return Ok(());
        };

        for line in lines.iter_mut() {
            let Some(answer) = line.answers.get_mut(&question.question_id) else {
                continue;
            };

            let raw: String = answer_text(answer);
            match self.validate_answer(storage, &raw, event_id, question.question_id, None) {
                Ok(roll_number) => *answer = Value::String(roll_number.into_inner()),
                Err(source) => {
                    info!(
                        event_id,
                        question_id = question.question_id,
                        error = %source,
                        "Cart rejected"
                    );
                    return Err(CartError::Rejected { source });
                }
            }
        }

        Ok(())
    }

    /// Commit-time hook: re-validates a placed order and cancels it on
    /// failure.
    ///
    /// Every answer of the order to the roll number question is checked in
    /// one unit of work, excluding the order itself from the duplicate
    /// search. Stored answers are rewritten to canonical form only after all
    /// of them pass.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Rejected` if an answer fails validation and
    /// `OrderError::Storage` if validation could not complete. In both cases
    /// the order has been set to canceled, unless the cancellation itself
    /// failed, which is logged.
    pub fn on_order_placed<U>(
        &self,
        storage: &mut U,
        order: &OrderRef,
    ) -> Result<CommitOutcome, OrderError>
    where
        U: UnitOfWork,
    {
        let order_id: i64 = order.order_id;
        let event_id: i64 = order.event_id;

        let question: Question = match self.active_question(storage, event_id) {
            Ok(Some(question)) => question,
            Ok(None) => return Ok(CommitOutcome::NotConfigured),
            Err(source) => {
                error!(order_id, event_id, error = %source, "Question lookup failed");
                cancel_order(storage, order_id);
                return Err(OrderError::Storage { order_id, source });
            }
        };
        let question_id: i64 = question.question_id;

        let result: Result<Verdict, StoreError> = storage.atomically(|tx| {
            let answers = tx.order_answers(order_id, question_id)?;
            let mut rewrites: Vec<(i64, RollNumber)> = Vec::new();

            for answer in &answers {
                match self.validate_answer(
                    &mut *tx,
                    &answer.answer,
                    event_id,
                    question_id,
                    Some(order_id),
                ) {
                    Ok(roll_number) => {
                        if roll_number.as_str() != answer.answer {
                            rewrites.push((answer.answer_id, roll_number));
                        }
                    }
                    Err(rejection) => {
                        tx.set_order_status(order_id, OrderStatus::Canceled)?;
                        return Ok(Verdict::Rejected(rejection));
                    }
                }
            }

            for (answer_id, roll_number) in &rewrites {
                tx.update_answer(*answer_id, roll_number.as_str())?;
            }

            Ok(Verdict::Accepted {
                checked: answers.len(),
                normalized: rewrites.len(),
            })
        });

        match result {
            Ok(Verdict::Accepted {
                checked,
                normalized,
            }) => {
                info!(
                    order_id,
                    code = %order.code,
                    checked,
                    normalized,
                    "Order roll numbers validated"
                );
                Ok(CommitOutcome::Accepted {
                    checked,
                    normalized,
                })
            }
            Ok(Verdict::Rejected(source)) => {
                warn!(
                    order_id,
                    code = %order.code,
                    error = %source,
                    "Order canceled: roll number rejected"
                );
                Err(OrderError::Rejected { order_id, source })
            }
            Err(source) => {
                error!(
                    order_id,
                    code = %order.code,
                    error = %source,
                    "Order validation failed"
                );
                cancel_order(storage, order_id);
                Err(OrderError::Storage { order_id, source })
            }
        }
    }
}

/// Best-effort cancellation after validation could not complete.
fn cancel_order<S>(storage: &mut S, order_id: i64)
where
    S: Storage + ?Sized,
{
    if let Err(err) = storage.set_order_status(order_id, OrderStatus::Canceled) {
        error!(order_id, error = %err, "Failed to cancel order");
    }
}
