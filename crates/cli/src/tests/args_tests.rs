// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cli::{Args, Command};
use clap::{CommandFactory, Parser};
use rollno_domain::{OrderStatus, QuestionKind};

#[test]
fn test_args_are_consistent() {
    Args::command().debug_assert();
}

#[test]
fn test_database_flag_is_global() {
    let args: Args = Args::try_parse_from([
        "rollno-admin",
        "check",
        "fest",
        "cse001",
        "--database",
        "rollno.sqlite",
    ])
    .unwrap();

    assert_eq!(args.database.as_deref(), Some("rollno.sqlite"));
    assert_eq!(
        args.command,
        Command::Check {
            event: String::from("fest"),
            roll_number: String::from("cse001"),
        }
    );
}

#[test]
fn test_add_question_parses_kind_code() {
    let args: Args =
        Args::try_parse_from(["rollno-admin", "add-question", "fest", "year", "--kind", "N"])
            .unwrap();

    assert!(matches!(
        args.command,
        Command::AddQuestion {
            kind: QuestionKind::Number,
            optional: false,
            ..
        }
    ));
}

#[test]
fn test_place_order_defaults_to_pending() {
    let args: Args =
        Args::try_parse_from(["rollno-admin", "place-order", "fest", "A1", "CSE001"]).unwrap();

    assert!(matches!(
        args.command,
        Command::PlaceOrder {
            status: OrderStatus::Pending,
            ..
        }
    ));
}

#[test]
fn test_unknown_status_is_rejected() {
    let result = Args::try_parse_from([
        "rollno-admin",
        "place-order",
        "fest",
        "A1",
        "CSE001",
        "--status",
        "refunded",
    ]);

    assert!(result.is_err());
}
