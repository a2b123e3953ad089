// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting
//!
//! STL data may be streaming on stdout, so everything except facecount
//! results goes to stderr.

use super::runner::{FacecountEntry, RunResult};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print `path: count`, or report why the file could not be read
    pub fn report_facecount(entry: &FacecountEntry) {
        match (entry.facecount, &entry.error) {
            (Some(count), _) => println!("{}: {}", entry.path, count),
            (None, Some(error)) => Self::report_error(error),
            (None, None) => Self::report_error(&format!("Cannot open {}", entry.path)),
        }
    }

    /// Summary of a decode/encode run
    pub fn report_run(operation: &str, result: &RunResult) {
        eprintln!(
            "{} {} {} faces in {}",
            "✅".green(),
            operation.bold(),
            result.facecount.to_string().cyan(),
            Self::format_duration(result.duration).yellow()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
