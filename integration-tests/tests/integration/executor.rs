// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests that drive the executor directly against `floor-suite-dup`.

use crate::fixtures::floor_suite_root;
use pretty_assertions::assert_eq;
use testpane_metadata::TestOutcome;
use testpane_runner::{
    config::TestpaneConfig, errors::ExecutionError, executor::TestExecutor, values::InputSet,
    view::RenderedView,
};

fn executor(suite_args: &[&str]) -> (integration_tests::temp_root::TempRoot, TestExecutor) {
    let root = floor_suite_root(suite_args);
    let config = TestpaneConfig::from_sources(root.path(), None).expect("config is valid");
    let executor = TestExecutor::new(&config);
    (root, executor)
}

#[tokio::test]
async fn concurrent_runs_do_not_share_reports() {
    let (_root, executor) = executor(&[]);
    let passing = InputSet::from_entries(["0", "2"], &[]);
    let failing = InputSet::from_entries(["-1.5"], &[]);

    let (passing, failing) = tokio::join!(executor.run(&passing), executor.run(&failing));
    let passing = passing.expect("first run produced a report");
    let failing = failing.expect("second run produced a report");

    let names: Vec<_> = passing.tests.iter().map(|test| test.name.as_str()).collect();
    assert_eq!(names, ["test_my_floor[0]", "test_my_floor[2]"]);
    assert_eq!(passing.summary.passed, 2);

    assert_eq!(failing.tests.len(), 1);
    assert_eq!(failing.tests[0].outcome, TestOutcome::Failed);
}

#[tokio::test]
async fn rendering_twice_keeps_only_the_latest_run() {
    let (_root, executor) = executor(&[]);

    let first = executor
        .run(&InputSet::from_entries(["0", "2", "4", "1.5"], &[]))
        .await;
    let second = executor.run(&InputSet::from_entries(["-1.5"], &[])).await;

    let first_view = RenderedView::from_outcome(&first);
    assert_eq!(first_view.blocks.len(), 4);

    let second_view = RenderedView::from_outcome(&second);
    assert_eq!(second_view.blocks.len(), 1);
    assert_eq!(second_view.blocks[0].name, "test_my_floor[-1.5]");
    assert!(
        second_view.blocks[0]
            .detail
            .as_deref()
            .is_some_and(|detail| detail.contains("my_floor failed for input -1.5")),
        "{second_view:?}"
    );
}

#[tokio::test]
async fn missing_report_keeps_suite_stderr() {
    // Passing no values to `--emit` makes floor-suite exit with a usage error on stderr.
    let (_root, executor) = executor(&["--emit"]);

    let error = executor
        .run(&InputSet::from_entries(["0"], &[]))
        .await
        .expect_err("no report is written");
    assert!(
        matches!(error, ExecutionError::ReportMissing { .. }),
        "{error:?}"
    );
    let stderr = error.stderr().expect("suite wrote to stderr");
    assert!(stderr.contains("--emit"), "{stderr}");
}
