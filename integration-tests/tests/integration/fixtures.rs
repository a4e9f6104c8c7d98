// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use integration_tests::{temp_root::TempRoot, testpane_cli::TestpaneCli};

pub(crate) fn testpane_bin() -> &'static Utf8Path {
    Utf8Path::new(env!("CARGO_BIN_EXE_testpane-dup"))
}

pub(crate) fn floor_suite_bin() -> &'static Utf8Path {
    Utf8Path::new(env!("CARGO_BIN_EXE_floor-suite-dup"))
}

/// A root whose suite is `floor-suite-dup` followed by `suite_args`.
pub(crate) fn floor_suite_root(suite_args: &[&str]) -> TempRoot {
    TempRoot::new(floor_suite_bin(), suite_args).expect("temp root created")
}

/// `testpane-dup --root <root>`, with further arguments to be added.
pub(crate) fn testpane_in(root: &TempRoot) -> TestpaneCli {
    testpane_in_dir(root.path())
}

/// `testpane-dup --root <dir>`, for roots that aren't set up by [`TempRoot`].
pub(crate) fn testpane_in_dir(dir: &Utf8Path) -> TestpaneCli {
    let mut cli = TestpaneCli::new(testpane_bin());
    cli.args(["--root", dir.as_str()]);
    cli
}
