// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Displaying rendered views.
//!
//! There are two displays:
//!
//! * [`ViewDisplayer::write_plain`] writes a view as plain lines, for one-shot runs.
//! * [`ViewDisplayer::compose_frame`] lays out a full terminal frame for the interactive view: the
//!   input form and summary on the left, test blocks on the right, and a key help line at the
//!   bottom.

use crate::{
    form::InputForm,
    view::{OutcomeCategory, RenderedView, TestBlock},
};
use owo_colors::{OwoColorize, Style};
use std::io;
use swrite::{SWrite, swrite};
use unicode_width::UnicodeWidthChar;

/// Styles used by displays.
#[derive(Clone, Debug, Default)]
pub struct Styles {
    is_colorized: bool,
    pass: Style,
    fail: Style,
    skip: Style,
    name: Style,
    focus: Style,
    help: Style,
}

impl Styles {
    /// Enables colors.
    pub fn colorize(&mut self) {
        self.is_colorized = true;
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().blue().bold();
        self.name = Style::new().bold();
        self.focus = Style::new().cyan();
        self.help = Style::new().dimmed();
    }

    /// Returns true if colors are enabled.
    pub fn is_colorized(&self) -> bool {
        self.is_colorized
    }

    fn category(&self, category: OutcomeCategory) -> Style {
        match category {
            OutcomeCategory::Passed => self.pass,
            OutcomeCategory::Failed => self.fail,
            OutcomeCategory::Skipped => self.skip,
            OutcomeCategory::Neutral => Style::new(),
        }
    }
}

/// The size of a terminal, in columns and rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameSize {
    /// The number of columns.
    pub width: usize,

    /// The number of rows.
    pub height: usize,
}

/// A composed terminal frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    /// Exactly `height` rows, none wider than `width` columns.
    pub rows: Vec<String>,

    /// The scroll offset of the right pane after clamping.
    pub scroll: usize,
}

/// Displays [`RenderedView`]s.
#[derive(Clone, Debug, Default)]
pub struct ViewDisplayer {
    styles: Styles,
}

impl ViewDisplayer {
    /// The key help shown at the bottom of the interactive view.
    pub const KEY_HELP: &'static str =
        "Enter: run  Tab/Up/Down: switch field  Ctrl-U: clear  PgUp/PgDn: scroll  Esc: quit";

    /// The column budget for the left pane.
    const LEFT_PANE_MAX: usize = 36;

    const SEPARATOR: &'static str = " │ ";
    const DETAIL_PREFIX: &'static str = "  | ";

    /// Creates a new displayer with the given styles.
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    /// Writes a view as plain lines.
    pub fn write_plain(&self, view: &RenderedView, mut writer: impl io::Write) -> io::Result<()> {
        writeln!(writer, "{}", view.status.message())?;

        let label_width = view
            .summary
            .iter()
            .map(|row| row.label.len() + 1)
            .max()
            .unwrap_or(0);
        for row in &view.summary {
            writeln!(
                writer,
                "{:label_width$} {}",
                format!("{}:", row.label),
                row.fraction().style(self.styles.category(row.category)),
            )?;
        }

        for block in &view.blocks {
            writeln!(writer)?;
            writeln!(writer, "{}", clean_line(&block.name).style(self.styles.name))?;
            writeln!(
                writer,
                "  Result: {}",
                clean_line(&block.outcome).style(self.styles.category(block.category))
            )?;
            if let Some(detail) = &block.detail {
                for line in detail.lines() {
                    writeln!(writer, "{}{}", Self::DETAIL_PREFIX, clean_line(line).trim_end())?;
                }
            }
        }

        Ok(())
    }

    /// Lays out a full frame for the interactive view.
    ///
    /// `scroll` is the requested first line of the right pane; it is clamped so that the pane is
    /// never scrolled past its content. The clamped value is returned in the frame.
    pub fn compose_frame(
        &self,
        form: &InputForm,
        view: &RenderedView,
        size: FrameSize,
        scroll: usize,
    ) -> Frame {
        let FrameSize { width, height } = size;
        if height == 0 {
            return Frame {
                rows: Vec::new(),
                scroll: 0,
            };
        }

        let body_height = height - 1;
        let left_width = (width / 3).clamp(width.min(24), Self::LEFT_PANE_MAX);
        let separator_width = display_width(Self::SEPARATOR);
        let right_width = width.saturating_sub(left_width + separator_width);

        let left = self.left_pane(form, view);
        let right = self.right_pane(view, right_width);

        let max_scroll = right.len().saturating_sub(body_height);
        let scroll = scroll.min(max_scroll);

        let mut rows = Vec::with_capacity(height);
        for index in 0..body_height {
            let mut line = left.get(index).cloned().unwrap_or_default();
            line.fit(left_width);
            line.push(Self::SEPARATOR, self.styles.help);
            if let Some(right_line) = right.get(scroll + index) {
                line.extend(right_line);
            }
            line.fit(width);
            rows.push(line.render(&self.styles));
        }

        let mut help = Line::new();
        help.push(Self::KEY_HELP, self.styles.help);
        help.fit(width);
        rows.push(help.render(&self.styles));

        Frame { rows, scroll }
    }

    fn left_pane(&self, form: &InputForm, view: &RenderedView) -> Vec<Line> {
        let mut lines = Vec::new();
        for (index, entry) in form.entries().iter().enumerate() {
            let mut line = Line::new();
            if index == form.focus() {
                line.push("> ", self.styles.focus);
                line.push(&InputForm::label(index), self.styles.focus);
                line.push(" ", Style::new());
                line.push(entry, Style::new());
                line.push("_", self.styles.focus);
            } else {
                line.push("  ", Style::new());
                line.push(&InputForm::label(index), Style::new());
                line.push(" ", Style::new());
                line.push(entry, Style::new());
            }
            lines.push(line);
        }

        lines.push(Line::new());
        lines.push(Line::plain(view.status.message()));

        if !view.summary.is_empty() {
            lines.push(Line::new());
            let label_width = view
                .summary
                .iter()
                .map(|row| row.label.len() + 1)
                .max()
                .unwrap_or(0);
            for row in &view.summary {
                let mut line = Line::new();
                line.push(
                    &format!("{:label_width$} ", format!("{}:", row.label)),
                    Style::new(),
                );
                line.push(&row.fraction(), self.styles.category(row.category));
                lines.push(line);
            }
        }

        lines
    }

    fn right_pane(&self, view: &RenderedView, width: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        for (index, block) in view.blocks.iter().enumerate() {
            if index > 0 {
                lines.push(Line::new());
            }
            self.push_block(block, width, &mut lines);
        }
        lines
    }

    fn push_block(&self, block: &TestBlock, width: usize, lines: &mut Vec<Line>) {
        let mut name = Line::new();
        name.push(&block.name, self.styles.name);
        lines.push(name);

        let mut outcome = Line::new();
        outcome.push("  Result: ", Style::new());
        outcome.push(&block.outcome, self.styles.category(block.category));
        lines.push(outcome);

        if let Some(detail) = &block.detail {
            let wrap_width = width
                .saturating_sub(display_width(Self::DETAIL_PREFIX))
                .max(1);
            for line in detail.lines() {
                for chunk in wrap_columns(clean_line(line).trim_end(), wrap_width) {
                    let mut detail_line = Line::new();
                    detail_line.push(Self::DETAIL_PREFIX, self.styles.help);
                    detail_line.push(&chunk, Style::new());
                    lines.push(detail_line);
                }
            }
        }
    }
}

/// A line of styled text.
#[derive(Clone, Debug, Default)]
struct Line {
    spans: Vec<(String, Style)>,
}

impl Line {
    fn new() -> Self {
        Self::default()
    }

    fn plain(text: &str) -> Self {
        let mut line = Self::new();
        line.push(text, Style::new());
        line
    }

    /// Appends a span. Control characters in `text` are replaced so they never reach the terminal.
    fn push(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.spans.push((clean_line(text), style));
        }
    }

    fn extend(&mut self, other: &Line) {
        self.spans.extend(other.spans.iter().cloned());
    }

    fn width(&self) -> usize {
        self.spans.iter().map(|(text, _)| display_width(text)).sum()
    }

    /// Cuts or pads this line to exactly `width` columns.
    fn fit(&mut self, width: usize) {
        let mut remaining = width;
        let mut spans = Vec::with_capacity(self.spans.len());
        for (text, style) in self.spans.drain(..) {
            if remaining == 0 {
                break;
            }
            let mut kept = String::with_capacity(text.len());
            for c in text.chars() {
                let char_width = c.width().unwrap_or(0);
                if char_width > remaining {
                    remaining = 0;
                    break;
                }
                remaining -= char_width;
                kept.push(c);
            }
            if !kept.is_empty() {
                spans.push((kept, style));
            }
        }
        self.spans = spans;

        let padding = width.saturating_sub(self.width());
        if padding > 0 {
            self.spans.push((" ".repeat(padding), Style::new()));
        }
    }

    fn render(&self, styles: &Styles) -> String {
        let mut out = String::new();
        for (text, style) in &self.spans {
            if styles.is_colorized {
                swrite!(out, "{}", text.style(*style));
            } else {
                out.push_str(text);
            }
        }
        out
    }
}

/// Returns the number of terminal columns `text` takes up.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Expands tabs to four spaces and replaces every other control character with U+FFFD.
///
/// Line breaks count as control characters, so callers split multi-line text first.
fn clean_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str("    "),
            c if c.is_control() => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// Hard-wraps `text` into chunks of at most `width` columns.
fn wrap_columns(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += char_width;
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use testpane_metadata::{TestOutcome, TestReport, TestResult};

    fn floor_report() -> TestReport {
        TestReport::from_tests(vec![
            TestResult::new("test_my_floor[2]", TestOutcome::Passed),
            TestResult::new("test_my_floor[-1.5]", TestOutcome::Failed).with_detail(
                "def test_my_floor(value):\n\
                 >\tassert my_floor(x) == math.floor(x)\n\
                 E   assert -1.0 == -2",
            ),
            TestResult::new("test_my_floor_skip", TestOutcome::Skipped),
        ])
    }

    #[test]
    fn plain_report() {
        let view = RenderedView::from_report(&floor_report());
        let mut out = Vec::new();
        ViewDisplayer::default()
            .write_plain(&view, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            indoc! {"
                Tests complete!
                Tests passed:  1/3
                Tests failed:  1/3
                Tests skipped: 1/3

                test_my_floor[2]
                  Result: PASSED

                test_my_floor[-1.5]
                  Result: FAILED
                  | def test_my_floor(value):
                  | >    assert my_floor(x) == math.floor(x)
                  | E   assert -1.0 == -2

                test_my_floor_skip
                  Result: SKIPPED
            "}
        );
    }

    #[test]
    fn plain_failed_to_run() {
        let mut out = Vec::new();
        ViewDisplayer::default()
            .write_plain(&RenderedView::failed_to_run(), &mut out)
            .unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @"Tests failed to run");
    }

    #[test]
    fn plain_colorized() {
        let mut styles = Styles::default();
        styles.colorize();
        let view = RenderedView::from_report(&floor_report());
        let mut out = Vec::new();
        ViewDisplayer::new(styles)
            .write_plain(&view, &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\u{1b}["), "output has escape codes: {out:?}");
        assert!(out.contains("FAILED"));
    }

    #[test_case(80, 24 ; "standard")]
    #[test_case(30, 5 ; "small")]
    #[test_case(200, 60 ; "large")]
    #[test_case(3, 2 ; "tiny")]
    #[test_case(0, 1 ; "zero width")]
    fn frame_geometry(width: usize, height: usize) {
        let mut form = InputForm::new(5);
        form.prefill(["2", "-1.5"]);
        let view = RenderedView::from_report(&floor_report());
        let frame = ViewDisplayer::default().compose_frame(
            &form,
            &view,
            FrameSize { width, height },
            0,
        );
        assert_eq!(frame.rows.len(), height);
        for row in &frame.rows {
            assert_eq!(display_width(row), width, "row {row:?} fills the width");
        }
    }

    #[test]
    fn frame_zero_height() {
        let frame = ViewDisplayer::default().compose_frame(
            &InputForm::new(5),
            &RenderedView::idle(),
            FrameSize {
                width: 80,
                height: 0,
            },
            3,
        );
        assert!(frame.rows.is_empty());
        assert_eq!(frame.scroll, 0);
    }

    #[test]
    fn frame_contents() {
        let mut form = InputForm::new(2);
        form.prefill(["2"]);
        let view = RenderedView::from_report(&floor_report());
        let frame = ViewDisplayer::default().compose_frame(
            &form,
            &view,
            FrameSize {
                width: 90,
                height: 12,
            },
            0,
        );

        let rows: Vec<_> = frame.rows.iter().map(|row| row.trim_end()).collect();
        assert_eq!(
            rows[0],
            format!("> Test value 1: 2_{}│ test_my_floor[2]", " ".repeat(13))
        );
        assert!(rows[1].starts_with("  Test value 2: "));
        assert!(rows[3].starts_with("Tests complete!"));
        assert!(rows[5].starts_with("Tests passed:  1/3"));
        assert!(rows[7].starts_with("Tests skipped: 1/3"));
        assert!(rows[1].ends_with("│   Result: PASSED"));
        assert!(rows[4].ends_with("│   Result: FAILED"));
        assert!(rows[6].ends_with("│   | >    assert my_floor(x) == math.floor(x)"));
        assert!(rows[11].starts_with("Enter: run  Tab"));
    }

    #[test]
    fn frame_scrolls_and_clamps() {
        let form = InputForm::new(1);
        let view = RenderedView::from_report(&floor_report());
        let size = FrameSize {
            width: 80,
            height: 4,
        };
        let displayer = ViewDisplayer::default();

        // 11 lines on the right, 3 body rows.
        let frame = displayer.compose_frame(&form, &view, size, 5);
        assert_eq!(frame.scroll, 5);
        assert!(
            frame.rows[0]
                .trim_end()
                .ends_with("│   | def test_my_floor(value):")
        );

        let frame = displayer.compose_frame(&form, &view, size, 100);
        assert_eq!(frame.scroll, 8);
        assert_eq!(frame.rows[2].trim_end().rsplit("│ ").next(), Some("  Result: SKIPPED"));
    }

    #[test]
    fn idle_frame_has_no_blocks() {
        let frame = ViewDisplayer::default().compose_frame(
            &InputForm::new(1),
            &RenderedView::idle(),
            FrameSize {
                width: 60,
                height: 5,
            },
            0,
        );
        let rows: Vec<_> = frame.rows.iter().map(|row| row.trim_end()).collect();
        // The left pane is 24 columns wide here, so the status is cut short.
        assert_eq!(rows[2], "Press Enter to run the t │");
        assert!(rows.iter().take(4).all(|row| row.ends_with('│')));
    }

    #[test]
    fn detail_wraps_to_right_pane() {
        let report = TestReport::from_tests(vec![
            TestResult::new("t", TestOutcome::Failed).with_detail("x".repeat(100)),
        ]);
        let view = RenderedView::from_report(&report);
        let displayer = ViewDisplayer::default();
        let lines = displayer.right_pane(&view, 20);
        let chunks: Vec<_> = lines
            .iter()
            .skip(2)
            .map(|line| line.render(&Styles::default()))
            .collect();
        assert_eq!(chunks.len(), 7);
        assert!(chunks.iter().all(|chunk| display_width(chunk) <= 20));
        assert_eq!(chunks[6], format!("  | {}", "x".repeat(4)));
    }

    #[test_case("", 4, &[""] ; "empty")]
    #[test_case("abcdef", 4, &["abcd", "ef"] ; "ascii")]
    #[test_case("日本語", 4, &["日本", "語"] ; "wide characters")]
    #[test_case("日本", 1, &["日", "本"] ; "wide characters in narrow columns")]
    fn wrapping(text: &str, width: usize, expected: &[&str]) {
        assert_eq!(wrap_columns(text, width), expected);
    }

    #[test]
    fn frame_rows_have_no_control_characters() {
        let report = TestReport::from_tests(vec![
            TestResult::new("test_bell[\u{7}]", TestOutcome::Failed)
                .with_detail("E\tboom\u{1b}[2J\rXX\u{8}\r\nnext line"),
        ]);
        let mut form = InputForm::new(1);
        form.prefill(["a\u{1b}b"]);
        let view = RenderedView::from_report(&report);
        let frame = ViewDisplayer::default().compose_frame(
            &form,
            &view,
            FrameSize {
                width: 80,
                height: 8,
            },
            0,
        );

        for row in &frame.rows {
            assert!(!row.chars().any(char::is_control), "row {row:?} is clean");
            assert_eq!(display_width(row), 80, "row {row:?} fills the width");
        }
        let rows: Vec<_> = frame.rows.iter().map(|row| row.trim_end()).collect();
        assert!(rows[0].ends_with("│ test_bell[\u{fffd}]"), "{rows:#?}");
        assert!(
            rows[2].ends_with("│   | E    boom\u{fffd}[2J\u{fffd}XX\u{fffd}"),
            "{rows:#?}"
        );
        assert!(rows[3].ends_with("│   | next line"), "{rows:#?}");
    }

    #[test]
    fn plain_output_has_no_control_characters() {
        let report = TestReport::from_tests(vec![
            TestResult::new("t\u{1b}]0;title\u{7}", TestOutcome::Failed)
                .with_detail("x\u{1b}[31my"),
        ]);
        let mut out = Vec::new();
        ViewDisplayer::default()
            .write_plain(&RenderedView::from_report(&report), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(
            !out.chars().any(|c| c.is_control() && c != '\n'),
            "{out:?}"
        );
        assert!(out.contains("t\u{fffd}]0;title\u{fffd}\n"), "{out:?}");
        assert!(out.contains("  | x\u{fffd}[31my\n"), "{out:?}");
    }

    #[test]
    fn fit_cuts_wide_characters() {
        let mut line = Line::plain("日本語");
        line.fit(5);
        assert_eq!(line.render(&Styles::default()), "日本 ");
    }
}
