// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod args_tests;
mod import_tests;

use crate::cli::Command;
use crate::commands::run;
use crate::error::CliError;
use rollno::{MokaSettingsCache, RollNumberValidator};
use rollno_persistence::Persistence;

pub struct TestContext {
    pub persistence: Persistence,
    pub validator: RollNumberValidator<MokaSettingsCache>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            persistence: Persistence::new_in_memory().unwrap(),
            validator: RollNumberValidator::new(MokaSettingsCache::default()),
        }
    }

    pub fn run(&mut self, command: Command) -> Result<String, CliError> {
        run(&mut self.persistence, &self.validator, command)
    }

    /// Creates event `slug` with a configured `rollno` text question.
    pub fn configured_event(&mut self, slug: &str) {
        self.run(Command::CreateEvent {
            slug: slug.to_string(),
            name: format!("Event {slug}"),
        })
        .unwrap();
        self.run(Command::AddQuestion {
            event: slug.to_string(),
            identifier: String::from("rollno"),
            kind: rollno_domain::QuestionKind::Text,
            optional: false,
            inactive: false,
        })
        .unwrap();
        self.run(Command::SetQuestion {
            event: slug.to_string(),
            identifier: Some(String::from("rollno")),
        })
        .unwrap();
    }
}
