// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A duplicate of floor-suite's main.rs, used as the test suite that testpane-dup runs.

use clap::Parser;
use floor_suite::SuiteOpts;

fn main() {
    std::process::exit(SuiteOpts::parse().exec());
}
