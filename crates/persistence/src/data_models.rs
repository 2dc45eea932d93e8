// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollno::{CommitOutcome, OrderError, OrderRef};
use rollno_domain::{OrderStatus, QuestionKind, Student};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: i64,
    pub slug: String,
    pub name: String,
}

/// A question to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub identifier: String,
    pub kind: QuestionKind,
    pub required: bool,
    pub active: bool,
}

/// A stored student with its bookkeeping columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentData {
    pub student_id: i64,
    pub event_id: i64,
    pub student: Student,
    pub created_at: String,
    pub updated_at: String,
}

/// Outcome of a bulk student import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    /// One message per rejected row, naming the 1-based row number.
    pub errors: Vec<String>,
}

/// One position of an order to place, with its answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPosition {
    pub answers: BTreeMap<i64, String>,
}

/// An order to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub event_id: i64,
    pub code: String,
    pub status: OrderStatus,
    pub positions: Vec<NewPosition>,
}

/// An order written by `place_order`, with the commit-time verdict.
///
/// The order exists either way; a rejected order is stored as canceled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: OrderRef,
    pub validation: Result<CommitOutcome, OrderError>,
}
