// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use floor_suite::SuiteOpts;

fn main() {
    let opts = SuiteOpts::parse();
    std::process::exit(opts.exec());
}
