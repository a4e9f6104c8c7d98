// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The state of the interactive view across runs.

use crate::{errors::ExecutionError, values::InputSet, view::RenderedView};
use testpane_metadata::TestReport;
use tracing::debug;

/// Where a [`RunSession`] is in its cycle.
///
/// ```text
/// Idle -> Running -> Rendered | Failed -> Running -> ...
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunState {
    /// No run has been started.
    Idle,

    /// A run is in flight.
    Running,

    /// The last run produced a report.
    Rendered,

    /// The last run did not produce a report.
    Failed,
}

/// Tracks runs and the view currently on screen.
///
/// At most one run is in flight at a time: triggers while running are ignored.
#[derive(Clone, Debug)]
pub struct RunSession {
    state: RunState,
    view: RenderedView,
    runs_started: usize,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSession {
    /// Creates a new, idle session.
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            view: RenderedView::idle(),
            runs_started: 0,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns the view to show.
    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    /// Returns the number of runs started so far.
    pub fn runs_started(&self) -> usize {
        self.runs_started
    }

    /// Returns true if a run is in flight.
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Starts a run with the given entries.
    ///
    /// Returns the values to run with, or `None` if a run is already in flight.
    pub fn trigger<I, S>(&mut self, entries: I, defaults: &[String]) -> Option<InputSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.is_running() {
            debug!("ignoring trigger: a run is already in flight");
            return None;
        }

        let values = InputSet::from_entries(entries, defaults);
        self.state = RunState::Running;
        self.view = RenderedView::running();
        self.runs_started += 1;
        debug!("starting run {} with values {values}", self.runs_started);
        Some(values)
    }

    /// Records the result of the in-flight run, and returns the new view.
    pub fn finish(&mut self, result: &Result<TestReport, ExecutionError>) -> &RenderedView {
        self.state = match result {
            Ok(_) => RunState::Rendered,
            Err(_) => RunState::Failed,
        };
        self.view = RenderedView::from_outcome(result);
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewStatus;
    use testpane_metadata::{TestOutcome, TestResult};

    fn defaults() -> Vec<String> {
        ["0", "2", "4", "1.5"].map(String::from).to_vec()
    }

    fn missing_report() -> ExecutionError {
        ExecutionError::ReportRead {
            path: "/tmp/report.json".into(),
            error: std::io::Error::other("disk on fire"),
        }
    }

    #[test]
    fn cycle() {
        let mut session = RunSession::new();
        assert_eq!(session.state(), RunState::Idle);
        assert_eq!(session.view().status, ViewStatus::Idle);

        let values = session.trigger(["", "", ""], &defaults()).expect("run starts");
        assert_eq!(values.values(), ["0", "2", "4", "1.5"]);
        assert_eq!(session.state(), RunState::Running);
        assert_eq!(session.view(), &RenderedView::running());

        let report = TestReport::from_tests(vec![TestResult::new("t", TestOutcome::Passed)]);
        let view = session.finish(&Ok(report));
        assert_eq!(view.blocks.len(), 1);
        assert_eq!(session.state(), RunState::Rendered);

        session.trigger(["-1.5"], &defaults()).expect("run starts");
        assert!(
            session.view().blocks.is_empty(),
            "previous blocks are cleared while running"
        );
        session.finish(&Err(missing_report()));
        assert_eq!(session.state(), RunState::Failed);
        assert_eq!(session.view(), &RenderedView::failed_to_run());

        assert!(session.trigger(["1"], &defaults()).is_some());
        assert_eq!(session.runs_started(), 3);
    }

    #[test]
    fn trigger_while_running_is_ignored() {
        let mut session = RunSession::new();
        assert!(session.trigger(["1"], &defaults()).is_some());
        assert!(session.trigger(["2"], &defaults()).is_none());
        assert!(session.trigger(Vec::<String>::new(), &defaults()).is_none());
        assert_eq!(session.runs_started(), 1);
        assert_eq!(session.state(), RunState::Running);
    }
}
