// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AnswerRecord, CachedSetting, DuplicateQuery, OrderRef, OrderStore, RollNumberValidator,
    SettingsCache, SettingsStore, Storage, StoreError, UnitOfWork,
};
use rollno_domain::{OrderStatus, Question, QuestionKind, StudentRecord};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

pub const EVENT_ID: i64 = 1;
pub const OTHER_EVENT_ID: i64 = 2;
pub const QUESTION_ID: i64 = 10;

/// Deterministic cache: entries live until deleted or expired by hand.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (CachedSetting, Duration)>>,
}

impl MemoryCache {
    pub fn expire(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl SettingsCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedSetting> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    fn set(&self, key: &str, value: CachedSetting, ttl: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl));
    }

    fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventSettings {
    pub question_id: Option<i64>,
    pub department_codes: Vec<String>,
    pub roster: Vec<StudentRecord>,
}

#[derive(Debug, Clone)]
pub struct TestOrder {
    pub event_id: i64,
    pub status: OrderStatus,
}

/// In-memory host storage. `atomically` restores a snapshot on failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub settings: HashMap<i64, EventSettings>,
    pub questions: Vec<Question>,
    pub orders: BTreeMap<i64, TestOrder>,
    pub answers: Vec<AnswerRecord>,
    pub settings_reads: usize,
    pub fail_settings: bool,
    pub fail_duplicate_search: bool,
    pub fail_answer_updates: bool,
    pub fail_commit: bool,
    pub fail_status_updates: bool,
}

impl MemoryStorage {
    fn check_settings(&mut self) -> Result<(), StoreError> {
        self.settings_reads += 1;
        if self.fail_settings {
            return Err(StoreError::Backend(String::from("settings offline")));
        }
        Ok(())
    }

    pub fn add_order(&mut self, order_id: i64, event_id: i64, status: OrderStatus, answers: &[&str]) {
        self.orders
            .insert(order_id, TestOrder { event_id, status });
        for answer in answers {
            let answer_id: i64 = i64::try_from(self.answers.len()).unwrap() + 1;
            self.answers.push(AnswerRecord {
                answer_id,
                position_id: answer_id,
                order_id,
                question_id: QUESTION_ID,
                answer: (*answer).to_string(),
            });
        }
    }

    pub fn status(&self, order_id: i64) -> OrderStatus {
        self.orders[&order_id].status
    }

    pub fn answers_of(&self, order_id: i64) -> Vec<String> {
        self.answers
            .iter()
            .filter(|a| a.order_id == order_id)
            .map(|a| a.answer.clone())
            .collect()
    }
}

impl SettingsStore for MemoryStorage {
    fn question_id(&mut self, event_id: i64) -> Result<Option<i64>, StoreError> {
        self.check_settings()?;
        Ok(self
            .settings
            .get(&event_id)
            .and_then(|settings| settings.question_id))
    }

    fn set_question_id(
        &mut self,
        event_id: i64,
        question_id: Option<i64>,
    ) -> Result<(), StoreError> {
        self.settings.entry(event_id).or_default().question_id = question_id;
        Ok(())
    }

    fn department_codes(&mut self, event_id: i64) -> Result<Vec<String>, StoreError> {
        self.check_settings()?;
        Ok(self
            .settings
            .get(&event_id)
            .map(|settings| settings.department_codes.clone())
            .unwrap_or_default())
    }

    fn set_department_codes(&mut self, event_id: i64, codes: &[String]) -> Result<(), StoreError> {
        self.settings.entry(event_id).or_default().department_codes = codes.to_vec();
        Ok(())
    }

    fn roster(&mut self, event_id: i64) -> Result<Vec<StudentRecord>, StoreError> {
        self.check_settings()?;
        Ok(self
            .settings
            .get(&event_id)
            .map(|settings| settings.roster.clone())
            .unwrap_or_default())
    }
}

impl OrderStore for MemoryStorage {
    fn find_question(&mut self, question_id: i64) -> Result<Option<Question>, StoreError> {
        Ok(self
            .questions
            .iter()
            .find(|q| q.question_id == question_id)
            .cloned())
    }

    fn find_question_by_identifier(
        &mut self,
        event_id: i64,
        identifier: &str,
    ) -> Result<Option<Question>, StoreError> {
        Ok(self
            .questions
            .iter()
            .find(|q| q.event_id == event_id && q.identifier == identifier)
            .cloned())
    }

    fn active_answer_exists(&mut self, query: &DuplicateQuery<'_>) -> Result<bool, StoreError> {
        if self.fail_duplicate_search {
            return Err(StoreError::Backend(String::from("search failed")));
        }

        Ok(self.answers.iter().any(|answer| {
            let order: &TestOrder = &self.orders[&answer.order_id];
            answer.question_id == query.question_id
                && order.event_id == query.event_id
                && order.status.is_active()
                && Some(answer.order_id) != query.exclude_order
                && answer.answer.to_ascii_uppercase().replace('-', "") == query.key
        }))
    }

    fn order_answers(
        &mut self,
        order_id: i64,
        question_id: i64,
    ) -> Result<Vec<AnswerRecord>, StoreError> {
        Ok(self
            .answers
            .iter()
            .filter(|a| a.order_id == order_id && a.question_id == question_id)
            .cloned()
            .collect())
    }

    fn update_answer(&mut self, answer_id: i64, answer: &str) -> Result<(), StoreError> {
        if self.fail_answer_updates {
            return Err(StoreError::Backend(String::from("answer write failed")));
        }
        let record: &mut AnswerRecord = self
            .answers
            .iter_mut()
            .find(|a| a.answer_id == answer_id)
            .ok_or_else(|| StoreError::NotFound(format!("answer {answer_id}")))?;
        record.answer = answer.to_string();
        Ok(())
    }

    fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> Result<(), StoreError> {
        if self.fail_status_updates {
            return Err(StoreError::Backend(String::from("order write failed")));
        }
        let order: &mut TestOrder = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::NotFound(format!("order {order_id}")))?;
        order.status = status;
        Ok(())
    }
}

impl UnitOfWork for MemoryStorage {
    fn atomically<T, F>(&mut self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn Storage) -> Result<T, StoreError>,
    {
        let snapshot: Self = self.clone();
        let result: Result<T, StoreError> = match work(self) {
            Ok(_) if self.fail_commit => Err(StoreError::Backend(String::from("commit failed"))),
            other => other,
        };
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

pub fn create_test_question(question_id: i64, event_id: i64, identifier: &str) -> Question {
    Question {
        question_id,
        event_id,
        identifier: String::from(identifier),
        kind: QuestionKind::Text,
        required: true,
        active: true,
    }
}

pub fn create_test_record(roll_number: &str, name: &str, department: &str) -> StudentRecord {
    StudentRecord {
        roll_number: String::from(roll_number),
        name: String::from(name),
        department: String::from(department),
        batch: String::new(),
    }
}

/// Storage for `EVENT_ID` with `QUESTION_ID` configured and no roster.
pub fn create_configured_storage() -> MemoryStorage {
    let mut storage: MemoryStorage = MemoryStorage::default();
    storage
        .questions
        .push(create_test_question(QUESTION_ID, EVENT_ID, "rollno"));
    storage.settings.insert(
        EVENT_ID,
        EventSettings {
            question_id: Some(QUESTION_ID),
            ..EventSettings::default()
        },
    );
    storage
}

pub fn create_test_validator() -> RollNumberValidator<MemoryCache> {
    RollNumberValidator::new(MemoryCache::default())
}

pub fn create_test_order(order_id: i64) -> OrderRef {
    OrderRef {
        order_id,
        event_id: EVENT_ID,
        code: format!("ORD{order_id:02}"),
    }
}
