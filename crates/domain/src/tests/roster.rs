// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    RollNumberError, Student, StudentImportRow, StudentRecord, match_roster, project_roster,
    roster_listing,
};

fn create_test_record(roll_number: &str, name: &str, department: &str) -> StudentRecord {
    StudentRecord {
        roll_number: String::from(roll_number),
        name: String::from(name),
        department: String::from(department),
        batch: String::new(),
    }
}

fn create_test_roster() -> Vec<StudentRecord> {
    vec![
        create_test_record("CSE001", "John Doe", "Computer Science"),
        create_test_record("CSE002", "Jane Smith", "Computer Science"),
        create_test_record("ECE001", "Alice Johnson", "Electronics"),
    ]
}

fn create_test_student(roll_number: &str, is_active: bool) -> Student {
    Student {
        roll_number: String::from(roll_number),
        name: format!("Student {roll_number}"),
        department: String::from("Computer Science"),
        email: String::new(),
        batch: String::from("2026"),
        is_active,
    }
}

#[test]
fn test_match_roster_accepts_listed_roll_number() {
    let roster: Vec<StudentRecord> = create_test_roster();
    assert!(match_roster("CSE001", &roster).is_ok());
}

#[test]
fn test_match_roster_is_case_insensitive() {
    let roster: Vec<StudentRecord> = create_test_roster();
    assert!(match_roster("cse001", &roster).is_ok());
}

#[test]
fn test_match_roster_normalizes_stored_entries() {
    let roster: Vec<StudentRecord> = vec![create_test_record(" cse-010 ", "Legacy Entry", "CS")];
    assert!(match_roster("CSE-010", &roster).is_ok());
}

#[test]
fn test_match_roster_rejects_unlisted_roll_number() {
    let roster: Vec<StudentRecord> = create_test_roster();

    let err: RollNumberError = match_roster("CSE999", &roster).unwrap_err();
    let message: String = err.to_string();
    assert!(message.starts_with("Invalid roll number"));
    assert!(message.contains("CSE001: John Doe"));
}

#[test]
fn test_match_roster_accepts_anything_when_roster_empty() {
    assert!(match_roster("CSE999", &[]).is_ok());
    assert!(match_roster("MECH-123456", &[]).is_ok());
}

#[test]
fn test_roster_listing_preserves_stored_order() {
    let roster: Vec<StudentRecord> = vec![
        create_test_record("ECE001", "Alice Johnson", "Electronics"),
        create_test_record("CSE002", "Jane Smith", "Computer Science"),
        create_test_record("CSE001", "John Doe", "Computer Science"),
    ];

    assert_eq!(
        roster_listing(&roster),
        "- ECE001: Alice Johnson (Electronics)\n- CSE002: Jane Smith (Computer Science)\n- CSE001: John Doe (Computer Science)"
    );
}

#[test]
fn test_project_roster_keeps_active_students_sorted() {
    let students: Vec<Student> = vec![
        create_test_student("ECE001", true),
        create_test_student("CSE002", false),
        create_test_student("CSE001", true),
    ];

    let roster: Vec<StudentRecord> = project_roster(&students);
    let roll_numbers: Vec<&str> = roster.iter().map(|s| s.roll_number.as_str()).collect();
    assert_eq!(roll_numbers, vec!["CSE001", "ECE001"]);
    assert_eq!(roster[0].batch, "2026");
}

#[test]
fn test_import_row_normalizes_fields() {
    let row: StudentImportRow = StudentImportRow {
        roll_number: String::from(" cse001 "),
        name: String::from(" John Doe "),
        department: String::from(" Computer Science "),
        email: Some(String::from(" john@example.com ")),
        batch: None,
        is_active: None,
    };

    let student: Student = row.into_student();
    assert_eq!(student.roll_number, "CSE001");
    assert_eq!(student.name, "John Doe");
    assert_eq!(student.department, "Computer Science");
    assert_eq!(student.email, "john@example.com");
    assert_eq!(student.batch, "");
    assert!(student.is_active);
}

#[test]
fn test_import_row_reads_inactive_flag() {
    let row: StudentImportRow = StudentImportRow {
        roll_number: String::from("CSE001"),
        name: String::from("John Doe"),
        department: String::from("CS"),
        email: None,
        batch: None,
        is_active: Some(String::from("false")),
    };

    assert!(!row.into_student().is_active);
}

#[test]
fn test_student_record_deserializes_without_optional_fields() {
    let record: StudentRecord =
        serde_json::from_str(r#"{"roll_number": "CSE001", "name": "John Doe"}"#).unwrap();
    assert_eq!(record.department, "");
    assert_eq!(record.batch, "");
}

#[test]
fn test_match_roster_ignores_hyphenation() {
    let roster: Vec<StudentRecord> = create_test_roster();
    assert!(match_roster("cse-001", &roster).is_ok());
}
