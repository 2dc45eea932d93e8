// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Parser, Subcommand};
use rollno_domain::{OrderStatus, QuestionKind};
use std::path::PathBuf;

/// Roll number administration for registration events.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an event
    CreateEvent {
        slug: String,
        name: String,
    },

    /// Add a question to an event
    AddQuestion {
        /// Event slug
        event: String,
        identifier: String,
        /// Question kind code (T, N, B, C, D, F)
        #[arg(long, default_value = "T")]
        kind: QuestionKind,
        /// Create the question as optional
        #[arg(long)]
        optional: bool,
        /// Create the question as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Select the roll number question of an event, or clear it
    SetQuestion {
        /// Event slug
        event: String,
        /// Question identifier; omit to clear
        identifier: Option<String>,
    },

    /// Replace the accepted department codes of an event
    SetDepartments {
        /// Event slug
        event: String,
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Import students from a CSV file
    Import {
        /// Event slug
        event: String,
        file: PathBuf,
        /// Update students whose roll number already exists
        #[arg(long)]
        update_existing: bool,
    },

    /// Validate a roll number as a new registration would
    Check {
        /// Event slug
        event: String,
        roll_number: String,
    },

    /// Place an order with one position per roll number
    PlaceOrder {
        /// Event slug
        event: String,
        code: String,
        #[arg(required = true)]
        roll_numbers: Vec<String>,
        #[arg(long, default_value = "pending")]
        status: OrderStatus,
    },

    /// Copy the roll number question selection to another event
    CopySettings {
        /// Source event slug
        from: String,
        /// Target event slug
        to: String,
    },

    /// List the students of an event
    ListStudents {
        /// Event slug
        event: String,
    },
}
