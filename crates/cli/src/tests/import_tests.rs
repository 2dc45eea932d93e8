// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CliError;
use crate::import::read_students;
use rollno_domain::StudentImportRow;

#[test]
fn test_read_students_with_optional_columns() {
    let csv: &str = "roll_number,name,department,email,batch,is_active\n\
                     cse001 , John Doe,Computer Science,john@example.com,2026,true\n\
                     ECE002,Jane Roe,Electronics,,,false\n";

    let rows: Vec<StudentImportRow> = read_students(csv.as_bytes()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].roll_number, "cse001");
    assert_eq!(rows[0].email.as_deref(), Some("john@example.com"));
    assert_eq!(rows[1].is_active.as_deref(), Some("false"));
    assert!(!rows[1].clone().into_student().is_active);
}

#[test]
fn test_read_students_without_optional_columns() {
    let csv: &str = "name,roll_number,department\nJohn Doe,CSE001,Computer Science\n";

    let rows: Vec<StudentImportRow> = read_students(csv.as_bytes()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, None);
    assert!(rows[0].clone().into_student().is_active);
}

#[test]
fn test_read_students_normalizes_headers() {
    let csv: &str = "Roll Number, Name ,DEPARTMENT\nCSE001,John Doe,Computer Science\n";

    let rows: Vec<StudentImportRow> = read_students(csv.as_bytes()).unwrap();

    assert_eq!(rows[0].roll_number, "CSE001");
    assert_eq!(rows[0].department, "Computer Science");
}

#[test]
fn test_read_students_rejects_missing_columns() {
    let csv: &str = "roll_number,email\nCSE001,john@example.com\n";

    let result: Result<Vec<StudentImportRow>, CliError> = read_students(csv.as_bytes());

    match result {
        Err(CliError::MissingColumns(missing)) => {
            assert_eq!(missing, vec![String::from("name"), String::from("department")]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_missing_columns_message() {
    let err: CliError = CliError::MissingColumns(vec![String::from("name")]);
    assert_eq!(err.to_string(), "Missing required columns: name");
}
