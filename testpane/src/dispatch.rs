// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level application and command routing.

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use testpane_metadata::{TestOutcome, TestReport, TestpaneExitCode};
use testpane_runner::{
    config::TestpaneConfig,
    display::ViewDisplayer,
    executor::TestExecutor,
    ui::InteractiveUi,
    values::InputSet,
    view::RenderedView,
};
use tracing::{debug, info};

/// Run a test suite against a set of values, and view the results side by side.
///
/// With no subcommand, opens the interactive view.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = clap_styles::style(),
    max_term_width = 100,
)]
pub struct TestpaneApp {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(subcommand)]
    command: Option<Command>,
}

/// Parses the command line, runs testpane, and exits the process.
pub fn main_impl() -> ! {
    let opts = TestpaneApp::parse();
    let output = opts.init_output();

    match opts.exec(output, &mut OutputWriter::default()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}

impl TestpaneApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.common.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let config = self.common.load_config()?;

        let command = self.command.unwrap_or(Command::Ui { values: Vec::new() });
        match command {
            Command::Run { values } => exec_run(&config, values, output, output_writer),
            Command::Ui { values } => exec_ui(&config, &values, output),
            Command::ShowConfig => exec_show_config(&config, output_writer),
        }
    }
}

#[derive(Debug, Args)]
struct CommonOpts {
    #[clap(flatten)]
    output: OutputOpts,

    /// Config file [default: <root>/.config/testpane.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Directory holding `.config/testpane.toml`, and the default directory to run tests in
    /// [default: current directory]
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<Utf8PathBuf>,
}

impl CommonOpts {
    fn load_config(&self) -> Result<TestpaneConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => current_dir()?,
        };
        debug!("reading config relative to root `{root}`");
        let config = TestpaneConfig::from_sources(root, self.config_file.as_deref())?;
        Ok(config)
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().map_err(|error| ExpectedError::CurrentDirFailed { error })?;
    Utf8PathBuf::try_from(dir).map_err(|error| ExpectedError::RootInvalidUtf8 { error })
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the tests once and print the results
    Run {
        /// Values to test [default: the configured default values]
        #[arg(
            value_name = "VALUES",
            allow_hyphen_values = true,
            allow_negative_numbers = true
        )]
        values: Vec<String>,
    },

    /// Open the interactive view (the default)
    Ui {
        /// Pre-fill an input slot; may be repeated
        #[arg(
            long = "value",
            value_name = "VALUE",
            allow_hyphen_values = true
        )]
        values: Vec<String>,
    },

    /// Print the resolved configuration as TOML
    ShowConfig,
}

fn exec_run(
    config: &TestpaneConfig,
    values: Vec<String>,
    output: OutputContext,
    output_writer: &mut OutputWriter,
) -> Result<i32> {
    let input = InputSet::from_entries(values, config.suite().default_values());
    if output.verbose {
        info!("running tests with values {input}");
    }

    let executor = TestExecutor::new(config);
    let result = build_runtime()?.block_on(executor.run(&input));

    let view = RenderedView::from_outcome(&result);
    let displayer = ViewDisplayer::new(output.view_styles());
    let mut writer = output_writer.stdout_writer();
    displayer
        .write_plain(&view, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(|error| ExpectedError::WriteOutputError { error })?;

    match result {
        Ok(report) if has_failures(&report) => Err(ExpectedError::TestRunFailed),
        Ok(_) => Ok(TestpaneExitCode::OK),
        Err(error) => Err(ExpectedError::TestsFailedToRun { error }),
    }
}

fn exec_ui(config: &TestpaneConfig, values: &[String], output: OutputContext) -> Result<i32> {
    let mut ui = InteractiveUi::new(config, ViewDisplayer::new(output.view_styles()));
    ui.prefill(values);
    build_runtime()?.block_on(ui.run())?;
    Ok(TestpaneExitCode::OK)
}

fn exec_show_config(config: &TestpaneConfig, output_writer: &mut OutputWriter) -> Result<i32> {
    let toml = config
        .to_toml()
        .map_err(|error| ExpectedError::ConfigSerializeError { error })?;

    let mut writer = output_writer.stdout_writer();
    writeln!(writer, "# resolved config for root `{}`", config.root())
        .and_then(|()| writer.write_all(toml.as_bytes()))
        .and_then(|()| writer.flush())
        .map_err(|error| ExpectedError::WriteOutputError { error })?;
    Ok(TestpaneExitCode::OK)
}

/// A report has failures if its summary says so, or if any listed test failed.
fn has_failures(report: &TestReport) -> bool {
    report.summary.has_failures()
        || report
            .tests
            .iter()
            .any(|test| test.outcome == TestOutcome::Failed)
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| ExpectedError::RuntimeBuildError { error })
}
