// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A duplicate of testpane's main.rs, so that the tests don't run a binary cargo may be
//! rebuilding. See tests/integration/main.rs for more.

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    testpane::main_impl()
}
