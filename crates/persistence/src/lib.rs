// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the roll-number validation engine.
//!
//! [`Persistence`] owns a Diesel connection and implements the engine's
//! storage traits over it. It also provides the host-side data the engine
//! reads: events, questions, orders with their answers, and the student
//! table whose active rows are projected into each event's roster setting.
//!
//! ## Concurrency
//!
//! Commit-time validation runs inside `BEGIN IMMEDIATE`, which takes the
//! database write lock up front. Two processes placing orders with the same
//! roll number therefore serialize, and the second sees the first's
//! committed answer. File databases use WAL mode and a busy timeout so the
//! second writer waits instead of failing.
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which gives each call its own
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rollno::{
    AnswerRecord, CommitOutcome, DuplicateQuery, OrderError, OrderRef, OrderStore, RollNumberValidator,
    SettingsCache, SettingsStore, Storage, StoreError, UnitOfWork,
};
use rollno_domain::{OrderStatus, Question, Student, StudentImportRow, StudentRecord};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::{
    EventData, ImportReport, NewOrder, NewPosition, NewQuestion, PlacedOrder, StudentData,
};
pub use error::PersistenceError;
pub use store::ConnectionStore;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_rollno_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Returns a storage view over this adapter's connection.
    pub const fn store(&mut self) -> ConnectionStore<'_> {
        ConnectionStore::new(&mut self.conn)
    }

    // ========================================================================
    // Events & Questions
    // ========================================================================

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is taken or the insert fails.
    pub fn create_event(&mut self, slug: &str, name: &str) -> Result<EventData, PersistenceError> {
        mutations::events::create_event(&mut self.conn, slug, name)
    }

    /// Looks up an event by slug.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no event has this slug.
    pub fn event_by_slug(&mut self, slug: &str) -> Result<EventData, PersistenceError> {
        queries::events::find_event_by_slug(&mut self.conn, slug)?
            .ok_or_else(|| PersistenceError::EventNotFound(slug.to_string()))
    }

    /// Lists all events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(&mut self) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_events(&mut self.conn)
    }

    /// Creates a question and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is taken or the insert fails.
    pub fn create_question(
        &mut self,
        event_id: i64,
        question: &NewQuestion,
    ) -> Result<i64, PersistenceError> {
        mutations::events::create_question(&mut self.conn, event_id, question)
    }

    /// Activates or deactivates a question.
    ///
    /// # Errors
    ///
    /// Returns an error if the question does not exist.
    pub fn set_question_active(
        &mut self,
        question_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::events::set_question_active(&mut self.conn, question_id, active)
    }

    /// Lists the questions of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_questions(&mut self, event_id: i64) -> Result<Vec<Question>, PersistenceError> {
        queries::events::list_questions(&mut self.conn, event_id)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Inserts an order without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_order(&mut self, order: &NewOrder) -> Result<OrderRef, PersistenceError> {
        diesel::Connection::transaction(&mut self.conn, |conn| {
            mutations::orders::insert_order(conn, order)
        })
    }

    /// Inserts an order and runs commit-time validation on it, all under
    /// one `BEGIN IMMEDIATE` transaction.
    ///
    /// The order is stored even when validation rejects it; it is then
    /// canceled. Concurrent placements serialize on the write lock, so of
    /// two orders claiming the same roll number at most one stays active.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be written. Validation failures
    /// are reported in [`PlacedOrder::validation`].
    pub fn place_order<C: SettingsCache>(
        &mut self,
        validator: &RollNumberValidator<C>,
        order: &NewOrder,
    ) -> Result<PlacedOrder, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let order_ref: OrderRef = mutations::orders::insert_order(conn, order)?;
            let mut store: ConnectionStore<'_> = ConnectionStore::new(conn);
            let validation = validator.on_order_placed(&mut store, &order_ref);
            Ok(PlacedOrder {
                order: order_ref,
                validation,
            })
        })
    }

    /// Looks up an order by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_order(&mut self, code: &str) -> Result<Option<OrderRef>, PersistenceError> {
        queries::orders::find_order_by_code(&mut self.conn, code)
    }

    /// Returns the status of an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist.
    pub fn order_status(&mut self, order_id: i64) -> Result<OrderStatus, PersistenceError> {
        queries::orders::order_status(&mut self.conn, order_id)
    }

    /// Runs commit-time validation for an order that is already stored.
    ///
    /// # Errors
    ///
    /// Returns the engine's verdict when the order was canceled.
    pub fn validate_order<C: SettingsCache>(
        &mut self,
        validator: &RollNumberValidator<C>,
        order: &OrderRef,
    ) -> Result<CommitOutcome, OrderError> {
        validator.on_order_placed(self, order)
    }

    // ========================================================================
    // Students & Roster
    // ========================================================================

    /// Adds a student and refreshes the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the roll number is taken or a write fails.
    pub fn create_student(
        &mut self,
        event_id: i64,
        student: &Student,
    ) -> Result<StudentData, PersistenceError> {
        mutations::students::create_student(&mut self.conn, event_id, student)
    }

    /// Updates a student and refreshes the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the student does not exist or a write fails.
    pub fn update_student(
        &mut self,
        event_id: i64,
        student: &Student,
    ) -> Result<StudentData, PersistenceError> {
        mutations::students::update_student(&mut self.conn, event_id, student)
    }

    /// Deletes a student and refreshes the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the student does not exist or a write fails.
    pub fn delete_student(&mut self, event_id: i64, roll_number: &str) -> Result<(), PersistenceError> {
        mutations::students::delete_student(&mut self.conn, event_id, roll_number)
    }

    /// Imports students in bulk and refreshes the roster once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails; row problems are reported.
    pub fn import_students(
        &mut self,
        event_id: i64,
        rows: Vec<StudentImportRow>,
        update_existing: bool,
    ) -> Result<ImportReport, PersistenceError> {
        mutations::students::import_students(&mut self.conn, event_id, rows, update_existing)
    }

    /// Lists the students of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_students(&mut self, event_id: i64) -> Result<Vec<StudentData>, PersistenceError> {
        queries::students::list_students(&mut self.conn, event_id)
    }

    /// Recomputes the stored roster of an event from its students.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be written.
    pub fn refresh_roster(&mut self, event_id: i64) -> Result<usize, PersistenceError> {
        diesel::Connection::transaction(&mut self.conn, |conn| {
            mutations::students::refresh_roster(conn, event_id)
        })
    }
}

impl SettingsStore for Persistence {
    fn question_id(&mut self, event_id: i64) -> Result<Option<i64>, StoreError> {
        self.store().question_id(event_id)
    }

    fn set_question_id(
        &mut self,
        event_id: i64,
        question_id: Option<i64>,
    ) -> Result<(), StoreError> {
        self.store().set_question_id(event_id, question_id)
    }

    fn department_codes(&mut self, event_id: i64) -> Result<Vec<String>, StoreError> {
        self.store().department_codes(event_id)
    }

    fn set_department_codes(&mut self, event_id: i64, codes: &[String]) -> Result<(), StoreError> {
        self.store().set_department_codes(event_id, codes)
    }

    fn roster(&mut self, event_id: i64) -> Result<Vec<StudentRecord>, StoreError> {
        self.store().roster(event_id)
    }
}

impl OrderStore for Persistence {
    fn find_question(&mut self, question_id: i64) -> Result<Option<Question>, StoreError> {
        self.store().find_question(question_id)
    }

    fn find_question_by_identifier(
        &mut self,
        event_id: i64,
        identifier: &str,
    ) -> Result<Option<Question>, StoreError> {
        self.store().find_question_by_identifier(event_id, identifier)
    }

    fn active_answer_exists(&mut self, query: &DuplicateQuery<'_>) -> Result<bool, StoreError> {
        self.store().active_answer_exists(query)
    }

    fn order_answers(
        &mut self,
        order_id: i64,
        question_id: i64,
    ) -> Result<Vec<AnswerRecord>, StoreError> {
        self.store().order_answers(order_id, question_id)
    }

    fn update_answer(&mut self, answer_id: i64, answer: &str) -> Result<(), StoreError> {
        self.store().update_answer(answer_id, answer)
    }

    fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> Result<(), StoreError> {
        self.store().set_order_status(order_id, status)
    }
}

impl UnitOfWork for Persistence {
    /// Runs `work` under `BEGIN IMMEDIATE`.
    fn atomically<T, F>(&mut self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn Storage) -> Result<T, StoreError>,
    {
        self.conn
            .immediate_transaction::<T, PersistenceError, _>(|conn| {
                let mut store: ConnectionStore<'_> = ConnectionStore::new(conn);
                Ok(work(&mut store)?)
            })
            .map_err(|err| {
                warn!(error = %err, "Unit of work rolled back");
                StoreError::from(err)
            })
    }
}
