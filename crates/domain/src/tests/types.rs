// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CACHE_KIND_DEPARTMENT_CODES, ConfigurationError, DepartmentCodeSet, OrderStatus,
    QuestionKind, cache_key,
};
use std::str::FromStr;

#[test]
fn test_default_department_codes() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::default();

    assert_eq!(departments.len(), 12);
    for code in ["CS", "CSE", "EC", "ECE", "ME", "MECH", "EE", "CE", "CIVIL", "IT", "BT", "BTECH"] {
        assert!(departments.contains(code), "missing default code {code}");
    }
}

#[test]
fn test_empty_configuration_falls_back_to_defaults() {
    let configured: Vec<String> = Vec::new();
    assert_eq!(
        DepartmentCodeSet::from_configured(configured),
        DepartmentCodeSet::default()
    );

    assert_eq!(
        DepartmentCodeSet::from_configured(["  ", ""]),
        DepartmentCodeSet::default()
    );
}

#[test]
fn test_configured_codes_replace_defaults() {
    let departments: DepartmentCodeSet = DepartmentCodeSet::from_configured([" aero ", "NAV"]);

    assert_eq!(departments.sorted(), vec!["AERO", "NAV"]);
    assert!(!departments.contains("CSE"));
}

#[test]
fn test_order_status_activity() {
    assert!(OrderStatus::Pending.is_active());
    assert!(OrderStatus::Paid.is_active());
    assert!(!OrderStatus::Expired.is_active());
    assert!(!OrderStatus::Canceled.is_active());
    assert!(OrderStatus::ACTIVE.iter().all(OrderStatus::is_active));
}

#[test]
fn test_order_status_string_round_trip() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Expired,
        OrderStatus::Canceled,
    ] {
        assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
    }

    assert_eq!(
        OrderStatus::from_str("refunded"),
        Err(ConfigurationError::UnknownOrderStatus(String::from(
            "refunded"
        )))
    );
}

#[test]
fn test_question_kind_codes() {
    assert_eq!(QuestionKind::from_str("T").unwrap(), QuestionKind::Text);
    assert_eq!(QuestionKind::from_str("N").unwrap(), QuestionKind::Number);
    assert!(QuestionKind::Text.accepts_roll_numbers());
    assert!(QuestionKind::Number.accepts_roll_numbers());
    assert!(!QuestionKind::Boolean.accepts_roll_numbers());
    assert!(QuestionKind::from_str("X").is_err());
}

#[test]
fn test_cache_key_layout() {
    assert_eq!(
        cache_key(42, CACHE_KIND_DEPARTMENT_CODES),
        "pretix_rollno_validator:42:department_codes"
    );
}
