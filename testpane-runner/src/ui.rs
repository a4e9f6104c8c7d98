// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive two-pane view.
//!
//! A single control loop owns the form, the session and the screen. Runs happen on a spawned
//! task, and their results come back to the control loop to be rendered.

use crate::{
    config::TestpaneConfig,
    display::{FrameSize, ViewDisplayer},
    errors::{DisplayErrorChain, ExecutionError, UiError},
    executor::TestExecutor,
    form::InputForm,
    input::{InputHandler, TerminalGuard, UiEvent, is_interactive_terminal},
    session::RunSession,
    values::InputSet,
};
use crossterm::{cursor, queue, style, terminal};
use std::io::{self, Write};
use testpane_metadata::TestReport;
use tokio::task::JoinHandle;
use tracing::debug;

type RunHandle = JoinHandle<Result<TestReport, ExecutionError>>;

/// The interactive view.
#[derive(Debug)]
pub struct InteractiveUi {
    executor: TestExecutor,
    defaults: Vec<String>,
    form: InputForm,
    session: RunSession,
    displayer: ViewDisplayer,
    size: FrameSize,
    scroll: usize,
}

/// What the control loop should do after an event.
#[derive(Debug, Eq, PartialEq)]
enum UiAction {
    Redraw,
    Start(InputSet),
    Quit,
}

impl InteractiveUi {
    /// Creates a new interactive view for the given config.
    pub fn new(config: &TestpaneConfig, displayer: ViewDisplayer) -> Self {
        Self {
            executor: TestExecutor::new(config),
            defaults: config.suite().default_values().to_vec(),
            form: InputForm::new(config.ui().input_slots()),
            session: RunSession::new(),
            displayer,
            size: FrameSize {
                width: 80,
                height: 24,
            },
            scroll: 0,
        }
    }

    /// Pre-fills the input slots with `values`.
    pub fn prefill<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.form.prefill(values);
    }

    /// Runs the view until the user quits.
    ///
    /// Requires standard input and output to be terminals.
    pub async fn run(mut self) -> Result<(), UiError> {
        if !is_interactive_terminal() {
            return Err(UiError::NotATerminal);
        }

        let guard = TerminalGuard::new()?;
        let (width, height) =
            terminal::size().map_err(|error| UiError::TerminalSetup { error })?;
        self.resize(width, height);

        let mut input = InputHandler::new();
        let mut in_flight: Option<RunHandle> = None;
        let mut stdout = io::stdout();
        self.draw(&mut stdout)?;

        loop {
            tokio::select! {
                event = input.recv() => {
                    let Some(event) = event else {
                        debug!("input closed, leaving interactive view");
                        break;
                    };
                    match self.handle_event(event) {
                        UiAction::Redraw => {}
                        UiAction::Start(values) => {
                            let executor = self.executor.clone();
                            in_flight = Some(tokio::spawn(async move {
                                executor.run(&values).await
                            }));
                        }
                        UiAction::Quit => break,
                    }
                }
                result = wait_for_run(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.finish_run(result);
                }
            }
            self.draw(&mut stdout)?;
        }

        if let Some(handle) = in_flight {
            // Aborting drops the run's future, which kills the suite.
            debug!("quitting with a run in flight, aborting it");
            handle.abort();
        }

        guard
            .restore()
            .map_err(|error| UiError::TerminalRestore { error })
    }

    fn handle_event(&mut self, event: UiEvent) -> UiAction {
        match event {
            UiEvent::Insert(c) => {
                self.form.insert(c);
            }
            UiEvent::Backspace => self.form.backspace(),
            UiEvent::ClearField => self.form.clear_field(),
            UiEvent::FocusNext => self.form.focus_next(),
            UiEvent::FocusPrev => self.form.focus_prev(),
            UiEvent::Run => {
                let entries = self.form.entries().to_vec();
                if let Some(values) = self.session.trigger(entries, &self.defaults) {
                    self.scroll = 0;
                    return UiAction::Start(values);
                }
            }
            UiEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(self.page()),
            UiEvent::ScrollDown => self.scroll = self.scroll.saturating_add(self.page()),
            UiEvent::Quit => return UiAction::Quit,
            UiEvent::Resize { width, height } => self.resize(width, height),
        }
        UiAction::Redraw
    }

    fn finish_run(&mut self, result: Result<TestReport, ExecutionError>) {
        if let Err(error) = &result {
            debug!("tests failed to run: {}", DisplayErrorChain::new(error));
        }
        self.session.finish(&result);
        self.scroll = 0;
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = FrameSize {
            width: usize::from(width),
            height: usize::from(height),
        };
    }

    /// The number of lines moved by one scroll step.
    fn page(&self) -> usize {
        self.size.height.saturating_sub(2).max(1)
    }

    fn draw(&mut self, out: &mut impl Write) -> Result<(), UiError> {
        let frame =
            self.displayer
                .compose_frame(&self.form, self.session.view(), self.size, self.scroll);
        self.scroll = frame.scroll;

        write_rows(out, &frame.rows).map_err(|error| UiError::Draw { error })
    }
}

fn write_rows(out: &mut impl Write, rows: &[String]) -> io::Result<()> {
    for (row, line) in (0u16..).zip(rows) {
        queue!(
            out,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(line),
        )?;
    }
    out.flush()
}

async fn wait_for_run(handle: &mut Option<RunHandle>) -> Result<TestReport, ExecutionError> {
    match handle {
        Some(handle) => handle
            .await
            .map_err(|error| ExecutionError::TaskFailed { error })?,
        None => std::future::pending().await,
    }
}
