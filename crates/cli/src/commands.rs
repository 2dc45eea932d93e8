// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand execution.
//!
//! Each command returns the text to print on success.

use rollno::{CommitOutcome, MokaSettingsCache, OrderStore, RollNumberValidator};
use rollno_domain::{OrderStatus, Question, RollNumber, StudentImportRow};
use rollno_persistence::{
    EventData, ImportReport, NewOrder, NewPosition, NewQuestion, Persistence, PlacedOrder,
    StudentData,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::Command;
use crate::error::CliError;
use crate::import::read_students;

type Validator = RollNumberValidator<MokaSettingsCache>;

/// Executes a command.
///
/// # Errors
///
/// Returns an error if the command fails or a roll number is rejected.
pub fn run(
    persistence: &mut Persistence,
    validator: &Validator,
    command: Command,
) -> Result<String, CliError> {
    match command {
        Command::CreateEvent { slug, name } => create_event(persistence, &slug, &name),
        Command::AddQuestion {
            event,
            identifier,
            kind,
            optional,
            inactive,
        } => add_question(
            persistence,
            &event,
            &NewQuestion {
                identifier,
                kind,
                required: !optional,
                active: !inactive,
            },
        ),
        Command::SetQuestion { event, identifier } => {
            set_question(persistence, validator, &event, identifier.as_deref())
        }
        Command::SetDepartments { event, codes } => {
            set_departments(persistence, validator, &event, &codes)
        }
        Command::Import {
            event,
            file,
            update_existing,
        } => import(persistence, validator, &event, &file, update_existing),
        Command::Check { event, roll_number } => {
            check(persistence, validator, &event, &roll_number)
        }
        Command::PlaceOrder {
            event,
            code,
            roll_numbers,
            status,
        } => place_order(persistence, validator, &event, code, status, &roll_numbers),
        Command::CopySettings { from, to } => copy_settings(persistence, validator, &from, &to),
        Command::ListStudents { event } => list_students(persistence, &event),
    }
}

fn create_event(persistence: &mut Persistence, slug: &str, name: &str) -> Result<String, CliError> {
    let event: EventData = persistence.create_event(slug, name)?;
    Ok(format!("Created event {} ({})", event.slug, event.event_id))
}

fn add_question(
    persistence: &mut Persistence,
    event: &str,
    question: &NewQuestion,
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;
    let question_id: i64 = persistence.create_question(event.event_id, question)?;

    if question.kind.accepts_roll_numbers() {
        Ok(format!(
            "Created question {} ({question_id})",
            question.identifier
        ))
    } else {
        Ok(format!(
            "Created question {} ({question_id}); {} questions cannot hold roll numbers",
            question.identifier, question.kind
        ))
    }
}

fn set_question(
    persistence: &mut Persistence,
    validator: &Validator,
    event: &str,
    identifier: Option<&str>,
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;

    let Some(identifier) = identifier else {
        validator.configure_question(persistence, event.event_id, None)?;
        return Ok(format!("Cleared roll number question of {}", event.slug));
    };

    let question: Question = persistence
        .find_question_by_identifier(event.event_id, identifier)?
        .ok_or_else(|| CliError::QuestionNotFound {
            event: event.slug.clone(),
            identifier: identifier.to_string(),
        })?;
    validator.configure_question(persistence, event.event_id, Some(question.question_id))?;

    Ok(format!(
        "Roll number question of {} set to {identifier}",
        event.slug
    ))
}

fn set_departments(
    persistence: &mut Persistence,
    validator: &Validator,
    event: &str,
    codes: &[String],
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;
    let stored: Vec<String> = validator.set_department_codes(persistence, event.event_id, codes)?;
    Ok(format!(
        "Department codes of {}: {}",
        event.slug,
        stored.join(", ")
    ))
}

fn import(
    persistence: &mut Persistence,
    validator: &Validator,
    event: &str,
    path: &Path,
    update_existing: bool,
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;
    let file: File = File::open(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rows: Vec<StudentImportRow> = read_students(file)?;

    let report: ImportReport = persistence.import_students(event.event_id, rows, update_existing)?;
    validator.invalidate_event(event.event_id);

    Ok(format_report(&report))
}

/// Renders an import report, one rejected row per line.
pub fn format_report(report: &ImportReport) -> String {
    let mut lines: Vec<String> = vec![format!(
        "Created {}, updated {}, rejected {}",
        report.created,
        report.updated,
        report.errors.len()
    )];
    lines.extend(report.errors.iter().cloned());
    lines.join("\n")
}

fn check(
    persistence: &mut Persistence,
    validator: &Validator,
    event: &str,
    raw: &str,
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;

    let Some(question) = validator.active_question(persistence, event.event_id)? else {
        let roll_number: RollNumber = validator.validate_format(persistence, raw, event.event_id)?;
        warn!(event_id = event.event_id, "No roll number question; checked format only");
        return Ok(roll_number.into_inner());
    };

    let roll_number: RollNumber =
        validator.validate_answer(persistence, raw, event.event_id, question.question_id, None)?;
    Ok(roll_number.into_inner())
}

fn place_order(
    persistence: &mut Persistence,
    validator: &Validator,
    event: &str,
    code: String,
    status: OrderStatus,
    roll_numbers: &[String],
) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;
    let question: Question = validator
        .active_question(persistence, event.event_id)?
        .ok_or_else(|| CliError::NotConfigured(event.slug.clone()))?;

    let order: NewOrder = NewOrder {
        event_id: event.event_id,
        code,
        status,
        positions: roll_numbers
            .iter()
            .map(|roll_number| NewPosition {
                answers: BTreeMap::from([(question.question_id, roll_number.clone())]),
            })
            .collect(),
    };

    let placed: PlacedOrder = persistence.place_order(validator, &order)?;
    match placed.validation {
        Ok(CommitOutcome::Accepted {
            checked,
            normalized,
        }) => {
            info!(order_id = placed.order.order_id, "Order placed");
            Ok(format!(
                "Order {} placed: {checked} checked, {normalized} normalized",
                placed.order.code
            ))
        }
        Ok(CommitOutcome::NotConfigured) => Ok(format!(
            "Order {} placed without roll number validation",
            placed.order.code
        )),
        Err(err) => Err(CliError::Order(err)),
    }
}

fn copy_settings(
    persistence: &mut Persistence,
    validator: &Validator,
    from: &str,
    to: &str,
) -> Result<String, CliError> {
    let source: EventData = persistence.event_by_slug(from)?;
    let target: EventData = persistence.event_by_slug(to)?;

    match validator.copy_settings(persistence, source.event_id, target.event_id)? {
        Some(question_id) => Ok(format!(
            "Copied roll number question {question_id} to {}",
            target.slug
        )),
        None => Ok(format!("No roll number question copied to {}", target.slug)),
    }
}

fn list_students(persistence: &mut Persistence, event: &str) -> Result<String, CliError> {
    let event: EventData = persistence.event_by_slug(event)?;
    let students: Vec<StudentData> = persistence.list_students(event.event_id)?;
    Ok(serde_json::to_string_pretty(&students)?)
}
