// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine storage traits over a `SQLite` connection.

use diesel::{Connection, SqliteConnection};
use rollno::{
    AnswerRecord, DuplicateQuery, OrderStore, SettingsStore, Storage, StoreError, UnitOfWork,
};
use rollno_domain::{
    OrderStatus, Question, SETTINGS_KEY_DEPARTMENT_CODES, SETTINGS_KEY_QUESTION_ID,
    SETTINGS_KEY_VALID_STUDENTS, StudentRecord,
};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Storage view over a borrowed connection.
///
/// Used directly inside an open transaction; `atomically` nests as a
/// savepoint there and opens a deferred transaction otherwise.
pub struct ConnectionStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ConnectionStore<'c> {
    /// Wraps a connection.
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl SettingsStore for ConnectionStore<'_> {
    fn question_id(&mut self, event_id: i64) -> Result<Option<i64>, StoreError> {
        Ok(queries::settings::read_setting(
            self.conn,
            event_id,
            SETTINGS_KEY_QUESTION_ID,
        )?)
    }

    fn set_question_id(
        &mut self,
        event_id: i64,
        question_id: Option<i64>,
    ) -> Result<(), StoreError> {
        match question_id {
            Some(question_id) => mutations::settings::write_setting(
                self.conn,
                event_id,
                SETTINGS_KEY_QUESTION_ID,
                &question_id,
            )?,
            None => {
                mutations::settings::delete_setting(self.conn, event_id, SETTINGS_KEY_QUESTION_ID)?;
            }
        }
        Ok(())
    }

    fn department_codes(&mut self, event_id: i64) -> Result<Vec<String>, StoreError> {
        Ok(queries::settings::read_setting(
            self.conn,
            event_id,
            SETTINGS_KEY_DEPARTMENT_CODES,
        )?
        .unwrap_or_default())
    }

    fn set_department_codes(&mut self, event_id: i64, codes: &[String]) -> Result<(), StoreError> {
        Ok(mutations::settings::write_setting(
            self.conn,
            event_id,
            SETTINGS_KEY_DEPARTMENT_CODES,
            codes,
        )?)
    }

    fn roster(&mut self, event_id: i64) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(queries::settings::read_setting(
            self.conn,
            event_id,
            SETTINGS_KEY_VALID_STUDENTS,
        )?
        .unwrap_or_default())
    }
}

impl OrderStore for ConnectionStore<'_> {
    fn find_question(&mut self, question_id: i64) -> Result<Option<Question>, StoreError> {
        Ok(queries::events::find_question(self.conn, question_id)?)
    }

    fn find_question_by_identifier(
        &mut self,
        event_id: i64,
        identifier: &str,
    ) -> Result<Option<Question>, StoreError> {
        Ok(queries::events::find_question_by_identifier(
            self.conn, event_id, identifier,
        )?)
    }

    fn active_answer_exists(&mut self, query: &DuplicateQuery<'_>) -> Result<bool, StoreError> {
        Ok(queries::orders::active_answer_exists(self.conn, query)?)
    }

    fn order_answers(
        &mut self,
        order_id: i64,
        question_id: i64,
    ) -> Result<Vec<AnswerRecord>, StoreError> {
        Ok(queries::orders::order_answers(
            self.conn,
            order_id,
            question_id,
        )?)
    }

    fn update_answer(&mut self, answer_id: i64, answer: &str) -> Result<(), StoreError> {
        Ok(mutations::orders::update_answer(self.conn, answer_id, answer)?)
    }

    fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> Result<(), StoreError> {
        Ok(mutations::orders::set_order_status(
            self.conn, order_id, status,
        )?)
    }
}

impl UnitOfWork for ConnectionStore<'_> {
    fn atomically<T, F>(&mut self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn Storage) -> Result<T, StoreError>,
    {
        self.conn
            .transaction::<T, PersistenceError, _>(|conn| {
                let mut store: ConnectionStore<'_> = ConnectionStore::new(conn);
                Ok(work(&mut store)?)
            })
            .map_err(StoreError::from)
    }
}
