// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for testpane.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};

/// Overall configuration for testpane.
///
/// The config is made of the embedded [default config](Self::DEFAULT_CONFIG), with the repository
/// config file layered on top of it.
#[derive(Clone, Debug)]
pub struct TestpaneConfig {
    root: Utf8PathBuf,
    inner: TestpaneConfigImpl,
}

impl TestpaneConfig {
    /// The default location of the config within the root: `.config/testpane.toml`.
    pub const CONFIG_PATH: &'static str = ".config/testpane.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// The placeholder in `suite.report-arg` that is replaced with the report path.
    pub const REPORT_PLACEHOLDER: &'static str = "{report}";

    /// The maximum number of input slots.
    pub const MAX_INPUT_SLOTS: usize = 9;

    /// Reads the testpane config from the given file, or if not specified from
    /// `.config/testpane.toml` in the root.
    ///
    /// If no config file is specified and the root doesn't have `.config/testpane.toml`, uses the
    /// default config options.
    pub fn from_sources(
        root: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let root = root.into();
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let inner = Self::build_and_deserialize_config(&builder)
            .and_then(|inner| inner.validate().map(|()| inner))
            .map_err(|kind| ConfigParseError::new(config_file, kind))?;

        Ok(Self { root, inner })
    }

    /// Returns the default testpane config.
    pub fn default_config(root: impl Into<Utf8PathBuf>) -> Self {
        let inner = Self::build_and_deserialize_config(&Self::make_default_config())
            .expect("default config is always valid");
        Self {
            root: root.into(),
            inner,
        }
    }

    /// Returns the root this config was read relative to.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the test suite configuration.
    pub fn suite(&self) -> &SuiteConfig {
        &self.inner.suite
    }

    /// Returns the interactive view configuration.
    pub fn ui(&self) -> &UiConfig {
        &self.inner.ui
    }

    /// Returns the directory the test suite runs in.
    pub fn working_dir(&self) -> Utf8PathBuf {
        match &self.inner.suite.working_dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }

    /// Serializes the resolved config as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.inner)
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<TestpaneConfigImpl, ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        config
            .try_deserialize()
            .map_err(|error| ConfigParseErrorKind::DeserializeError(Box::new(error)))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct TestpaneConfigImpl {
    suite: SuiteConfig,
    ui: UiConfig,
}

impl TestpaneConfigImpl {
    fn validate(&self) -> Result<(), ConfigParseErrorKind> {
        let invalid = |key, reason: &str| ConfigParseErrorKind::InvalidValue {
            key,
            reason: reason.to_owned(),
        };

        if self.suite.program().is_none_or(str::is_empty) {
            return Err(invalid("suite.command", "must name a program"));
        }
        if !self
            .suite
            .report_arg
            .contains(TestpaneConfig::REPORT_PLACEHOLDER)
        {
            return Err(invalid("suite.report-arg", "must contain `{report}`"));
        }
        if self
            .suite
            .default_values
            .iter()
            .all(|value| value.trim().is_empty())
        {
            return Err(invalid(
                "suite.default-values",
                "must contain at least one non-blank value",
            ));
        }
        if !(1..=TestpaneConfig::MAX_INPUT_SLOTS).contains(&self.ui.input_slots) {
            return Err(ConfigParseErrorKind::InvalidValue {
                key: "ui.input-slots",
                reason: format!(
                    "must be between 1 and {}, found {}",
                    TestpaneConfig::MAX_INPUT_SLOTS,
                    self.ui.input_slots,
                ),
            });
        }

        Ok(())
    }
}

/// How to run the test suite.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteConfig {
    command: Vec<String>,
    report_arg: String,
    #[serde(default)]
    values_arg: String,
    default_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    working_dir: Option<Utf8PathBuf>,
}

impl SuiteConfig {
    /// Returns the program that runs the test suite.
    pub fn program(&self) -> Option<&str> {
        self.command.first().map(String::as_str)
    }

    /// Returns the leading arguments passed to the program.
    pub fn leading_args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    /// Returns the report argument template, containing
    /// [`REPORT_PLACEHOLDER`](TestpaneConfig::REPORT_PLACEHOLDER).
    pub fn report_arg(&self) -> &str {
        &self.report_arg
    }

    /// Returns the flag passed before the test values, if any.
    pub fn values_arg(&self) -> Option<&str> {
        (!self.values_arg.is_empty()).then_some(self.values_arg.as_str())
    }

    /// Returns the values used when every input is blank.
    pub fn default_values(&self) -> &[String] {
        &self.default_values
    }
}

/// Settings for the interactive view.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct UiConfig {
    input_slots: usize,
}

impl UiConfig {
    /// Returns the number of input slots to show.
    pub fn input_slots(&self) -> usize {
        self.input_slots
    }
}
