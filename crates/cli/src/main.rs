// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use rollno::{MokaSettingsCache, RollNumberValidator};
use rollno_persistence::Persistence;
use tracing::info;

mod cli;
mod commands;
mod error;
mod import;

#[cfg(test)]
mod tests;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let validator: RollNumberValidator<MokaSettingsCache> =
        RollNumberValidator::new(MokaSettingsCache::default());

    let output: String = commands::run(&mut persistence, &validator, args.command)?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
