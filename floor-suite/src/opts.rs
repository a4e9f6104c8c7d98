// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::run_suite;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use testpane_metadata::{ReportDocument, TestReport};

/// Exit codes returned by `floor-suite`.
pub enum SuiteExitCode {}

impl SuiteExitCode {
    /// Every test passed or was skipped.
    pub const OK: i32 = 0;

    /// At least one test failed.
    pub const TESTS_FAILED: i32 = 1;

    /// The report was not written as requested.
    pub const INTERNAL_ERROR: i32 = 3;

    /// There were no tests to run.
    pub const NO_TESTS_COLLECTED: i32 = 5;
}

/// Check `my_floor` against a set of values and write a JSON report.
#[derive(Debug, Parser)]
#[command(version)]
pub struct SuiteOpts {
    /// Write a JSON report to this path
    #[arg(long, value_name = "PATH")]
    json: Option<Utf8PathBuf>,

    /// Run one test per value [default: 0 1 1.0 1.5]
    ///
    /// Values may start with `-`, so this should be the last option given.
    #[arg(
        long = "test-values",
        visible_alias = "test_values",
        value_name = "VALUE",
        num_args = 0..,
        allow_hyphen_values = true
    )]
    test_values: Option<Vec<String>>,

    /// Also run the fixed cases
    #[arg(long)]
    builtin: bool,

    /// What to write to the report path
    #[arg(long, value_enum, default_value_t, value_name = "MODE")]
    emit: EmitMode,
}

/// What `floor-suite` writes to its report path.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum EmitMode {
    /// The report.
    #[default]
    Report,

    /// Nothing: the report file is not created.
    Nothing,

    /// An empty file.
    Empty,

    /// A truncated JSON document.
    Malformed,
}

impl SuiteOpts {
    /// The values used when `--test-values` isn't passed.
    pub const DEFAULT_VALUES: &'static [&'static str] = &["0", "1", "1.0", "1.5"];

    /// Runs the suite, printing a line per test to stdout.
    ///
    /// Returns the exit code.
    pub fn exec(self) -> i32 {
        let values = self.test_values.unwrap_or_else(|| {
            Self::DEFAULT_VALUES
                .iter()
                .map(|&value| value.to_owned())
                .collect()
        });
        let report = run_suite(&values, self.builtin);

        let mut stdout = io::stdout().lock();
        // The report is the result. Failing to print progress doesn't change it.
        let _ = print_results(&report, &mut stdout);

        if let Some(path) = &self.json {
            if let Err(error) = write_report(&report, path, self.emit) {
                eprintln!("floor-suite: failed to write report to `{path}`: {error}");
                return SuiteExitCode::INTERNAL_ERROR;
            }
        }

        if self.emit != EmitMode::Report {
            SuiteExitCode::INTERNAL_ERROR
        } else if report.summary.total == 0 {
            SuiteExitCode::NO_TESTS_COLLECTED
        } else if report.summary.has_failures() {
            SuiteExitCode::TESTS_FAILED
        } else {
            SuiteExitCode::OK
        }
    }
}

fn print_results(report: &TestReport, out: &mut impl Write) -> io::Result<()> {
    for test in &report.tests {
        writeln!(out, "{} {}", test.name, test.outcome.as_str().to_uppercase())?;
    }
    let summary = &report.summary;
    writeln!(
        out,
        "{} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    )
}

fn write_report(report: &TestReport, path: &Utf8Path, emit: EmitMode) -> io::Result<()> {
    let contents = match emit {
        EmitMode::Report => ReportDocument::from(report.clone())
            .to_json_pretty()
            .map_err(io::Error::other)?,
        EmitMode::Nothing => return Ok(()),
        EmitMode::Empty => String::new(),
        EmitMode::Malformed => r#"{"report": {"summary": {"passed": "#.to_owned(),
    };
    std::fs::write(path, contents)
}
