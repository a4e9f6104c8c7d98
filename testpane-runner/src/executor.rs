// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running the test suite and reading back its report.
//!
//! The main structure in this module is [`TestExecutor`].

use crate::{config::TestpaneConfig, errors::ExecutionError, values::InputSet};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use std::{io, process::Stdio};
use testpane_metadata::{ReportDocument, TestReport};
use tracing::debug;

/// Runs the configured test suite against a set of values.
///
/// Each run gets its own [`ReportArtifact`], so any number of executors may run at once. A run
/// is a success if and only if the suite leaves a parseable report behind: the suite's exit
/// status is recorded but does not decide the outcome, since test suites usually exit non-zero
/// when a test fails.
#[derive(Clone, Debug)]
pub struct TestExecutor {
    program: String,
    leading_args: Vec<String>,
    report_arg: String,
    values_arg: Option<String>,
    cwd: Utf8PathBuf,
}

impl TestExecutor {
    /// The file name of the report within the artifact directory.
    pub const REPORT_FILE_NAME: &'static str = "report.json";

    /// Creates a new executor from the suite configuration.
    pub fn new(config: &TestpaneConfig) -> Self {
        let suite = config.suite();
        Self {
            program: suite.program().unwrap_or_default().to_owned(),
            leading_args: suite.leading_args().to_vec(),
            report_arg: suite.report_arg().to_owned(),
            values_arg: suite.values_arg().map(ToOwned::to_owned),
            cwd: config.working_dir(),
        }
    }

    /// Returns the program that runs the test suite.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments the suite is invoked with, for a report written to `report_path`.
    pub fn command_args(&self, report_path: &Utf8Path, values: &InputSet) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push(
            self.report_arg
                .replace(TestpaneConfig::REPORT_PLACEHOLDER, report_path.as_str()),
        );
        if let Some(values_arg) = &self.values_arg {
            args.push(values_arg.clone());
        }
        args.extend(values.values().iter().cloned());
        args
    }

    /// Runs the test suite once and returns the report it wrote.
    ///
    /// If the returned future is dropped, the suite is killed.
    pub async fn run(&self, values: &InputSet) -> Result<TestReport, ExecutionError> {
        let artifact = ReportArtifact::create()?;
        let args = self.command_args(artifact.report_path(), values);
        debug!(
            "running `{}` with args {:?} in `{}`",
            self.program, args, self.cwd
        );

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .current_dir(&self.cwd)
            // This environment variable is set to indicate that the suite is being run under
            // testpane.
            .env("TESTPANE", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|error| ExecutionError::Spawn {
                program: self.program.clone(),
                error,
            })?;
        debug!("`{}` exited with {}", self.program, output.status);

        let report = artifact.read().await;
        // `artifact` is dropped here on both paths, which removes the directory.
        match report {
            Ok(report) => {
                debug!(
                    "read report with {} tests ({} passed, {} failed, {} skipped)",
                    report.summary.total,
                    report.summary.passed,
                    report.summary.failed,
                    report.summary.skipped,
                );
                Ok(report)
            }
            Err(ReadError::Missing(path)) => Err(ExecutionError::ReportMissing {
                path,
                exit_status: output.status,
                stderr: stderr_tail(&output.stderr),
            }),
            Err(ReadError::Empty(path)) => Err(ExecutionError::ReportEmpty {
                path,
                exit_status: output.status,
                stderr: stderr_tail(&output.stderr),
            }),
            Err(ReadError::Other(error)) => Err(error),
        }
    }
}

/// A fresh temporary location for one run's report.
///
/// The directory and everything in it are removed when the artifact is dropped.
#[derive(Debug)]
pub struct ReportArtifact {
    dir: Utf8TempDir,
    report_path: Utf8PathBuf,
}

impl ReportArtifact {
    /// Creates a new, empty artifact directory.
    pub fn create() -> Result<Self, ExecutionError> {
        let dir = camino_tempfile::Builder::new()
            .prefix("testpane-report-")
            .tempdir()
            .map_err(|error| ExecutionError::ArtifactCreate { error })?;
        let report_path = dir.path().join(TestExecutor::REPORT_FILE_NAME);
        Ok(Self { dir, report_path })
    }

    /// Returns the directory holding the report.
    pub fn dir(&self) -> &Utf8Path {
        self.dir.path()
    }

    /// Returns the path the report is expected at.
    pub fn report_path(&self) -> &Utf8Path {
        &self.report_path
    }

    async fn read(&self) -> Result<TestReport, ReadError> {
        let path = self.report_path.clone();
        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ReadError::Missing(path));
            }
            Err(error) => {
                return Err(ReadError::Other(ExecutionError::ReportRead { path, error }));
            }
        };

        if contents.iter().all(u8::is_ascii_whitespace) {
            return Err(ReadError::Empty(path));
        }

        ReportDocument::from_slice(&contents)
            .map(|document| document.report)
            .map_err(|error| ReadError::Other(ExecutionError::ReportParse { path, error }))
    }
}

enum ReadError {
    Missing(Utf8PathBuf),
    Empty(Utf8PathBuf),
    Other(ExecutionError),
}

/// The number of trailing stderr lines kept for error messages.
const STDERR_TAIL_LINES: usize = 10;

fn stderr_tail(stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
