// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning test reports into views.
//!
//! [`RenderedView`] is a description of what should be on screen, built from scratch for every
//! report. Displays replace whatever they showed before with the new view, so nothing from an
//! earlier run can leak into a later one.

use crate::errors::ExecutionError;
use testpane_metadata::{TestOutcome, TestReport, TestResult};

/// Everything that is shown for one state of a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedView {
    /// The status line.
    pub status: ViewStatus,

    /// Outcome counts. Empty unless a report was rendered.
    pub summary: Vec<SummaryRow>,

    /// One block per test, in report order. Empty unless a report was rendered.
    pub blocks: Vec<TestBlock>,
}

impl RenderedView {
    /// The view shown before the first run.
    pub fn idle() -> Self {
        Self::status_only(ViewStatus::Idle)
    }

    /// The view shown while a run is in flight.
    pub fn running() -> Self {
        Self::status_only(ViewStatus::Running)
    }

    /// The view shown when a run didn't produce a report.
    pub fn failed_to_run() -> Self {
        Self::status_only(ViewStatus::FailedToRun)
    }

    /// Renders a report.
    pub fn from_report(report: &TestReport) -> Self {
        let summary = &report.summary;
        Self {
            status: ViewStatus::Complete,
            summary: vec![
                SummaryRow::new(
                    "Tests passed",
                    summary.passed,
                    summary.total,
                    OutcomeCategory::Passed,
                ),
                SummaryRow::new(
                    "Tests failed",
                    summary.failed,
                    summary.total,
                    OutcomeCategory::Failed,
                ),
                SummaryRow::new(
                    "Tests skipped",
                    summary.skipped,
                    summary.total,
                    OutcomeCategory::Skipped,
                ),
            ],
            blocks: report.tests.iter().map(TestBlock::new).collect(),
        }
    }

    /// Renders the result of a run.
    pub fn from_outcome(outcome: &Result<TestReport, ExecutionError>) -> Self {
        match outcome {
            Ok(report) => Self::from_report(report),
            Err(_) => Self::failed_to_run(),
        }
    }

    fn status_only(status: ViewStatus) -> Self {
        Self {
            status,
            summary: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// The status line of a view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewStatus {
    /// No run has happened yet.
    Idle,

    /// A run is in flight.
    Running,

    /// The last run produced a report.
    Complete,

    /// The last run did not produce a report.
    FailedToRun,
}

impl ViewStatus {
    /// Returns the message shown for this status.
    pub fn message(self) -> &'static str {
        match self {
            Self::Idle => "Press Enter to run the tests!",
            Self::Running => "Running tests...",
            Self::Complete => "Tests complete!",
            Self::FailedToRun => "Tests failed to run",
        }
    }
}

/// One row of the summary: `label: count/total`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryRow {
    /// The label, for example `Tests passed`.
    pub label: &'static str,

    /// The number of tests in this category.
    pub count: usize,

    /// The total number of tests.
    pub total: usize,

    /// The category used to style the row.
    pub category: OutcomeCategory,
}

impl SummaryRow {
    fn new(label: &'static str, count: usize, total: usize, category: OutcomeCategory) -> Self {
        Self {
            label,
            count,
            total,
            category,
        }
    }

    /// Returns `count/total`.
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.count, self.total)
    }
}

/// The rendering of a single test.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestBlock {
    /// The test's name.
    pub name: String,

    /// The test's outcome, uppercased.
    pub outcome: String,

    /// The category used to style the outcome.
    pub category: OutcomeCategory,

    /// Long-form detail text, if the test has any.
    pub detail: Option<String>,
}

impl TestBlock {
    fn new(test: &TestResult) -> Self {
        Self {
            name: test.name.clone(),
            outcome: test.outcome.as_str().to_uppercase(),
            category: OutcomeCategory::of(&test.outcome),
            detail: test.detail().map(ToOwned::to_owned),
        }
    }
}

/// How an outcome is styled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OutcomeCategory {
    /// Green.
    Passed,

    /// Red.
    Failed,

    /// Blue.
    Skipped,

    /// Unstyled. Used for outcomes testpane doesn't know about.
    Neutral,
}

impl OutcomeCategory {
    /// Returns the category for an outcome.
    pub fn of(outcome: &TestOutcome) -> Self {
        match outcome {
            TestOutcome::Passed => Self::Passed,
            TestOutcome::Failed => Self::Failed,
            TestOutcome::Skipped => Self::Skipped,
            TestOutcome::Other(_) => Self::Neutral,
        }
    }
}
