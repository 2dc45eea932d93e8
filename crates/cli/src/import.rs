// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student CSV parsing.

use csv::StringRecord;
use rollno_domain::StudentImportRow;
use std::io::Read;

use crate::error::CliError;

/// Normalizes a CSV header for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Reads student rows from CSV.
///
/// Headers are matched after normalization, so `Roll Number` names the
/// `roll_number` column. The header must name every required column; a file
/// missing one is rejected as a whole. Extra columns are ignored and cells
/// are trimmed.
///
/// # Errors
///
/// Returns `MissingColumns` for an incomplete header, or a CSV error if a
/// record cannot be parsed.
pub fn read_students<R: Read>(reader: R) -> Result<Vec<StudentImportRow>, CliError> {
    let mut reader: csv::Reader<R> = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
    reader.set_headers(headers.clone());

    let missing: Vec<String> = StudentImportRow::REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CliError::MissingColumns(missing));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(CliError::from))
        .collect()
}
