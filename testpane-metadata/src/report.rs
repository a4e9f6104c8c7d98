// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The report document written by a test-running tool.
//!
//! A report looks like:
//!
//! ```json
//! { "report": {
//!     "summary": {"passed": 1, "failed": 0, "skipped": 0, "num_tests": 1},
//!     "tests": [{"name": "test_my_floor[0]", "outcome": "passed"}]
//! } }
//! ```
//!
//! Tools disagree on the details, so parsing is lenient: zero counts may be omitted from the
//! summary, unknown fields are ignored, unknown outcomes are kept as
//! [`TestOutcome::Other`], and the `call` section of a test may be absent, `null`, or carry a
//! structured `longrepr`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The top-level report document.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ReportDocument {
    /// The report.
    pub report: TestReport,
}

impl ReportDocument {
    /// Parses a report document from JSON.
    pub fn from_slice(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    /// Serializes this document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<TestReport> for ReportDocument {
    fn from(report: TestReport) -> Self {
        Self { report }
    }
}

/// The parsed result of one test run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct TestReport {
    /// Outcome counts, as stated by the tool.
    #[serde(default)]
    pub summary: ReportSummary,

    /// Individual tests, in the order the tool reported them.
    #[serde(default)]
    pub tests: Vec<TestResult>,
}

impl TestReport {
    /// Creates a report whose summary is computed from `tests`.
    pub fn from_tests(tests: Vec<TestResult>) -> Self {
        Self {
            summary: ReportSummary::from_tests(&tests),
            tests,
        }
    }

    /// Returns true if the summary adds up and matches the number of tests listed.
    ///
    /// Tools that hit collection errors can produce reports for which this is false.
    pub fn is_consistent(&self) -> bool {
        self.summary.is_consistent() && self.summary.total == self.tests.len()
    }
}

/// Outcome counts for a report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ReportSummary {
    /// The number of tests that passed.
    #[serde(default)]
    pub passed: usize,

    /// The number of tests that failed.
    #[serde(default)]
    pub failed: usize,

    /// The number of tests that were skipped.
    #[serde(default)]
    pub skipped: usize,

    /// The total number of tests.
    #[serde(rename = "num_tests", default)]
    pub total: usize,
}

impl ReportSummary {
    /// Counts the outcomes of `tests`.
    ///
    /// Tests with an [`Other`](TestOutcome::Other) outcome only count towards the total.
    pub fn from_tests<'a>(tests: impl IntoIterator<Item = &'a TestResult>) -> Self {
        let mut summary = Self::default();
        for test in tests {
            summary.total += 1;
            match test.outcome {
                TestOutcome::Passed => summary.passed += 1,
                TestOutcome::Failed => summary.failed += 1,
                TestOutcome::Skipped => summary.skipped += 1,
                TestOutcome::Other(_) => {}
            }
        }
        summary
    }

    /// Returns true if `passed + failed + skipped == total`.
    pub fn is_consistent(&self) -> bool {
        self.passed
            .checked_add(self.failed)
            .and_then(|n| n.checked_add(self.skipped))
            == Some(self.total)
    }

    /// Returns true if at least one test failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// The result of an individual test.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TestResult {
    /// The name of the test.
    pub name: String,

    /// The outcome of the test.
    pub outcome: TestOutcome,

    /// Information about the call phase of the test, if the tool recorded any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<CallPhase>,
}

impl TestResult {
    /// Creates a new test result without any detail.
    pub fn new(name: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
            call: None,
        }
    }

    /// Attaches long-form detail text to this result.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.call = Some(CallPhase {
            longrepr: Some(detail.into()),
        });
        self
    }

    /// Returns the long-form detail for this test, if any was captured.
    ///
    /// Blank detail text is treated as absent.
    pub fn detail(&self) -> Option<&str> {
        self.call
            .as_ref()?
            .longrepr
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// The call phase of a test.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct CallPhase {
    /// The long-form failure representation.
    ///
    /// Non-string values are stored as compact JSON.
    #[serde(
        default,
        deserialize_with = "deserialize_longrepr",
        skip_serializing_if = "Option::is_none"
    )]
    pub longrepr: Option<String>,
}

fn deserialize_longrepr<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// The outcome of a test.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TestOutcome {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test was skipped.
    Skipped,

    /// An outcome testpane doesn't know about, e.g. `xfailed` or `error`.
    Other(String),
}

impl TestOutcome {
    /// Returns the string representation of this outcome, as found in reports.
    pub fn as_str(&self) -> &str {
        match self {
            TestOutcome::Passed => "passed",
            TestOutcome::Failed => "failed",
            TestOutcome::Skipped => "skipped",
            TestOutcome::Other(other) => other,
        }
    }
}

impl From<&str> for TestOutcome {
    fn from(s: &str) -> Self {
        match s {
            "passed" => TestOutcome::Passed,
            "failed" => TestOutcome::Failed,
            "skipped" => TestOutcome::Skipped,
            other => TestOutcome::Other(other.to_owned()),
        }
    }
}

impl From<String> for TestOutcome {
    fn from(s: String) -> Self {
        match s.as_str() {
            "passed" => TestOutcome::Passed,
            "failed" => TestOutcome::Failed,
            "skipped" => TestOutcome::Skipped,
            _ => TestOutcome::Other(s),
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TestOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TestOutcome::from(s))
    }
}
