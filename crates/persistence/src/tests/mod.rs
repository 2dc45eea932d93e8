// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{EventData, NewOrder, NewPosition, NewQuestion, Persistence};
use rollno::{MokaSettingsCache, RollNumberValidator, SettingsStore};
use rollno_domain::{OrderStatus, QuestionKind, Student};
use std::collections::BTreeMap;

pub fn create_test_event(persistence: &mut Persistence, slug: &str) -> EventData {
    persistence
        .create_event(slug, &format!("Event {slug}"))
        .unwrap()
}

pub fn create_rollno_question(persistence: &mut Persistence, event_id: i64) -> i64 {
    persistence
        .create_question(
            event_id,
            &NewQuestion {
                identifier: String::from("rollno"),
                kind: QuestionKind::Text,
                required: true,
                active: true,
            },
        )
        .unwrap()
}

/// Creates an event whose roll number question is configured.
pub fn create_configured_event(persistence: &mut Persistence, slug: &str) -> (EventData, i64) {
    let event: EventData = create_test_event(persistence, slug);
    let question_id: i64 = create_rollno_question(persistence, event.event_id);
    persistence
        .set_question_id(event.event_id, Some(question_id))
        .unwrap();
    (event, question_id)
}

pub fn create_test_order(
    event_id: i64,
    code: &str,
    status: OrderStatus,
    question_id: i64,
    answers: &[&str],
) -> NewOrder {
    NewOrder {
        event_id,
        code: String::from(code),
        status,
        positions: answers
            .iter()
            .map(|answer| {
                let mut answers: BTreeMap<i64, String> = BTreeMap::new();
                answers.insert(question_id, (*answer).to_string());
                NewPosition { answers }
            })
            .collect(),
    }
}

pub fn create_test_student(roll_number: &str, name: &str, is_active: bool) -> Student {
    Student {
        roll_number: String::from(roll_number),
        name: String::from(name),
        department: String::from("Computer Science"),
        email: String::new(),
        batch: String::from("2026"),
        is_active,
    }
}

pub fn create_test_validator() -> RollNumberValidator<MokaSettingsCache> {
    RollNumberValidator::new(MokaSettingsCache::default())
}
