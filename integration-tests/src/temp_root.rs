// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use color_eyre::{Result, eyre::Context};
use swrite::{SWrite, swrite};

/// A temporary root directory with a `.config/testpane.toml` pointing at a suite binary.
#[derive(Debug)]
pub struct TempRoot {
    dir: Utf8TempDir,
}

impl TempRoot {
    /// Creates a root whose config runs `suite_bin` followed by `suite_args`.
    pub fn new(suite_bin: &Utf8Path, suite_args: &[&str]) -> Result<Self> {
        Self::with_extra_config(suite_bin, suite_args, "")
    }

    /// Like [`Self::new`], with `extra` appended to the `[suite]` table.
    pub fn with_extra_config(
        suite_bin: &Utf8Path,
        suite_args: &[&str],
        extra: &str,
    ) -> Result<Self> {
        let dir = camino_tempfile::Builder::new()
            .prefix("testpane-root-")
            .tempdir()
            .wrap_err("failed to create temp root")?;

        // Literal strings keep Windows paths intact.
        let mut command = format!("['{suite_bin}'");
        for arg in suite_args {
            swrite!(command, ", '{arg}'");
        }
        command.push(']');

        let config = format!(
            "[suite]\n\
             command = {command}\n\
             report-arg = \"--json={{report}}\"\n\
             values-arg = \"--test-values\"\n\
             {extra}\n"
        );

        let config_dir = dir.path().join(".config");
        std::fs::create_dir(&config_dir)
            .wrap_err_with(|| format!("failed to create `{config_dir}`"))?;
        let config_path = config_dir.join("testpane.toml");
        std::fs::write(&config_path, config)
            .wrap_err_with(|| format!("failed to write `{config_path}`"))?;

        Ok(Self { dir })
    }

    /// The root directory.
    pub fn path(&self) -> &Utf8Path {
        self.dir.path()
    }

    /// The config file in this root.
    pub fn config_path(&self) -> Utf8PathBuf {
        self.dir.path().join(".config/testpane.toml")
    }
}
