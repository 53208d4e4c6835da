//! Input card: text area, style and length pickers, submit/clear buttons.
//!
//! Text, selections and request state live in the `Session`; this
//! component only owns the cursor, scroll offset, focus and dropdowns.

use std::cell::Cell;
use std::ops::Range;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use briefly_core::picker::{
    DropDirection, Dropdown, DropdownMetrics, PickerState, TriggerBounds,
};
use briefly_core::{Session, SummaryStyle};

use crate::action::{Action, Notice};
use crate::components::{hit, spinner_frame, Component};
use crate::theme::Theme;

const PLACEHOLDER: &str =
    "Paste or type your text here... (minimum 50 characters for meaningful summarization)";

/// Rows per entry in the style dropdown (label + description).
const STYLE_ITEM_ROWS: u16 = 2;
/// Style dropdown height in rows, borders included.
const STYLE_DROPDOWN_ROWS: u16 = 8;
/// Length dropdown height estimate used for the direction check.
const LENGTH_DROPDOWN_ROWS: u16 = 6;

/// Which part of the form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Style,
    Length,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Style,
            Focus::Style => Focus::Length,
            Focus::Length => Focus::Input,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Length,
            Focus::Style => Focus::Input,
            Focus::Length => Focus::Style,
        }
    }

    fn dropdown(self) -> Option<Dropdown> {
        match self {
            Focus::Input => None,
            Focus::Style => Some(Dropdown::Style),
            Focus::Length => Some(Dropdown::Length),
        }
    }
}

/// Screen positions from the last render, used for mouse hits and
/// dropdown placement.
#[derive(Debug, Clone, Copy, Default)]
struct FormLayout {
    bounds: Rect,
    text: Rect,
    style_trigger: Rect,
    length_trigger: Rect,
    submit: Rect,
    clear: Rect,
}

pub struct SummaryFormComponent {
    focus: Focus,
    /// Byte offset into the session input.
    cursor: usize,
    /// First visible wrapped row of the text area.
    scroll: Cell<usize>,
    pickers: PickerState,
    layout: Cell<FormLayout>,
    tick: usize,
}

impl SummaryFormComponent {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input,
            cursor: 0,
            scroll: Cell::new(0),
            pickers: PickerState::new(DropdownMetrics {
                style_height: STYLE_DROPDOWN_ROWS.into(),
                length_height: LENGTH_DROPDOWN_ROWS.into(),
            }),
            layout: Cell::new(FormLayout::default()),
            tick: 0,
        }
    }

    /// Whether raw key presses should go to the text area.
    pub fn wants_input(&self, session: &Session) -> bool {
        self.focus == Focus::Input && !session.is_submitting() && self.pickers.open().is_none()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Put the cursor after the last character, e.g. after prefilled text.
    pub fn move_cursor_to_end(&mut self, session: &Session) {
        self.cursor = session.input().len();
    }

    // ── Text editing ────────────────────────────────────────

    /// Run an edit against the session text, keeping the cursor in step.
    fn edit<F>(&mut self, session: &mut Session, f: F) -> Option<Action>
    where
        F: FnOnce(&mut String, &mut usize),
    {
        let cursor = &mut self.cursor;
        session
            .edit(|text| {
                *cursor = clamp_cursor(text, *cursor);
                f(text, cursor);
            })
            .map(|warning| Action::Notify(Notice::warning(warning.to_string())))
    }

    fn move_cursor<F>(&mut self, session: &Session, f: F)
    where
        F: FnOnce(&str, usize) -> usize,
    {
        let text = session.input();
        self.cursor = f(text, clamp_cursor(text, self.cursor));
    }

    /// Move the cursor one wrapped row up or down, keeping the column.
    fn move_vertical(&mut self, session: &Session, down: bool) {
        let text = session.input();
        let width = self.layout.get().text.width.max(1) as usize;
        let segments = wrap_segments(text, width);
        let cursor = clamp_cursor(text, self.cursor);
        let row = cursor_row(&segments, cursor);

        let target = if down {
            row + 1
        } else {
            match row.checked_sub(1) {
                Some(target) => target,
                None => return,
            }
        };
        let Some(segment) = segments.get(target) else {
            return;
        };

        let col = text[segments[row].start..cursor].chars().count();
        self.cursor = text[segment.clone()]
            .char_indices()
            .nth(col)
            .map(|(i, _)| segment.start + i)
            .unwrap_or(segment.end);
    }

    // ── Pickers ─────────────────────────────────────────────

    fn trigger(&self, dropdown: Dropdown) -> Rect {
        let layout = self.layout.get();
        match dropdown {
            Dropdown::Style => layout.style_trigger,
            Dropdown::Length => layout.length_trigger,
        }
    }

    fn toggle(&mut self, dropdown: Dropdown, session: &Session) {
        let trigger = self.trigger(dropdown);
        let current = match dropdown {
            Dropdown::Style => SummaryStyle::all()
                .iter()
                .position(|style| *style == session.style()),
            Dropdown::Length => session
                .style()
                .length_options()
                .allowed
                .iter()
                .position(|length| *length == session.max_length()),
        }
        .unwrap_or(0);

        self.pickers.toggle_at(
            dropdown,
            TriggerBounds::new(trigger.y.into(), trigger.bottom().into()),
            self.layout.get().bounds.height.into(),
            current,
        );
    }

    fn option_count(dropdown: Dropdown, session: &Session) -> usize {
        match dropdown {
            Dropdown::Style => SummaryStyle::all().len(),
            Dropdown::Length => session.style().length_options().allowed.len(),
        }
    }

    fn choose(&mut self, dropdown: Dropdown, index: usize, session: &mut Session) {
        match dropdown {
            Dropdown::Style => {
                if let Some(style) = SummaryStyle::all().get(index) {
                    session.select_style(*style);
                }
            }
            Dropdown::Length => {
                let allowed = session.style().length_options().allowed;
                if let Some(length) = allowed.get(index) {
                    session.select_length(*length);
                }
            }
        }
        self.pickers.close_all();
    }

    fn dropdown_area(&self, dropdown: Dropdown, session: &Session) -> Rect {
        let rows = match dropdown {
            Dropdown::Style => STYLE_DROPDOWN_ROWS,
            Dropdown::Length => Self::option_count(dropdown, session) as u16 + 2,
        };
        place_dropdown(
            self.trigger(dropdown),
            self.pickers.direction(dropdown),
            rows,
            self.layout.get().bounds,
        )
    }

    fn click(&mut self, column: u16, row: u16, session: &mut Session) -> Option<Action> {
        let layout = self.layout.get();

        if let Some(open) = self.pickers.open() {
            let area = self.dropdown_area(open, session);
            if hit(area, column, row) {
                if let Some(index) = item_at(open, area, row) {
                    self.choose(open, index, session);
                }
                return None;
            }
        }

        if hit(layout.style_trigger, column, row) {
            self.focus = Focus::Style;
            self.toggle(Dropdown::Style, session);
            return None;
        }
        if hit(layout.length_trigger, column, row) {
            self.focus = Focus::Length;
            self.toggle(Dropdown::Length, session);
            return None;
        }

        // Anything else closes an open dropdown.
        self.pickers.close_all();

        if hit(layout.text, column, row) {
            self.focus = Focus::Input;
            None
        } else if hit(layout.submit, column, row) {
            Some(Action::SubmitForm)
        } else if session.has_output() && hit(layout.clear, column, row) {
            Some(Action::ClearAll)
        } else {
            None
        }
    }

    // ── Rendering ───────────────────────────────────────────

    fn render_text(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let counter = session.counter();
        let focused = self.focus == Focus::Input;
        let locked = session.is_submitting();

        let border_style = if counter.count > 0 && !counter.in_range() {
            Style::default().fg(Theme::error())
        } else if focused && !locked {
            Theme::focused_border()
        } else {
            Theme::border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = session.input();
        let show_cursor = focused && !locked;
        if text.is_empty() {
            let mut spans = Vec::new();
            if show_cursor {
                spans.push(Span::styled(" ", Theme::cursor()));
            }
            spans.push(Span::styled(PLACEHOLDER, Theme::dim()));
            frame.render_widget(
                Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
                inner,
            );
            return;
        }

        let width = inner.width.max(1) as usize;
        let height = inner.height as usize;
        let segments = wrap_segments(text, width);
        let cursor = clamp_cursor(text, self.cursor);
        let row = cursor_row(&segments, cursor);

        let mut scroll = self.scroll.get().min(segments.len().saturating_sub(1));
        if row < scroll {
            scroll = row;
        } else if height > 0 && row >= scroll + height {
            scroll = row + 1 - height;
        }
        self.scroll.set(scroll);

        let text_style = if locked { Theme::dim() } else { Theme::normal() };
        let lines: Vec<Line> = segments
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(i, segment)| {
                let content = &text[segment.clone()];
                if show_cursor && i == row {
                    let (before, after) = content.split_at(cursor - segment.start);
                    let mut rest = after.chars();
                    let under = rest.next().map(String::from).unwrap_or_else(|| " ".into());
                    Line::from(vec![
                        Span::styled(before.to_string(), text_style),
                        Span::styled(under, Theme::cursor()),
                        Span::styled(rest.as_str().to_string(), text_style),
                    ])
                } else {
                    Line::from(Span::styled(content.to_string(), text_style))
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_counter(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let counter = session.counter();
        let counter_style = if counter.over_limit() || counter.needs_minimum_hint() {
            Style::default().fg(Theme::error())
        } else {
            Theme::muted()
        };

        let mut spans = vec![Span::styled(counter.to_string(), counter_style)];
        if counter.needs_minimum_hint() {
            spans.push(Span::styled(" (Min 50 required)", counter_style));
        }

        frame.render_widget(
            Paragraph::new(Span::styled("Enter your text:", Theme::header())),
            area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            area,
        );
    }

    fn render_trigger(
        &self,
        frame: &mut Frame,
        area: Rect,
        dropdown: Dropdown,
        content: Vec<Span<'static>>,
    ) {
        let focused = self.focus.dropdown() == Some(dropdown);
        let open = self.pickers.is_open(dropdown);
        let border_style = if focused || open {
            Theme::focused_border()
        } else {
            Theme::border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let arrow = if open { "▴" } else { "▾" };
        frame.render_widget(Paragraph::new(Line::from(content)), inner);
        frame.render_widget(
            Paragraph::new(Span::styled(arrow, Theme::muted())).alignment(Alignment::Right),
            inner,
        );
    }

    fn render_pickers(&self, frame: &mut Frame, area: Rect, session: &Session) -> (Rect, Rect) {
        let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(2)
            .split(area);
        let style_col = Layout::vertical([Constraint::Length(1), Constraint::Length(3)])
            .split(columns[0]);
        let length_col = Layout::vertical([Constraint::Length(1), Constraint::Length(3)])
            .split(columns[1]);

        let style = session.style();
        let length_label = match style {
            SummaryStyle::BulletPoints => "Max Points",
            _ => "Max Sentences",
        };

        frame.render_widget(
            Paragraph::new(Span::styled("Summary Style", Theme::muted())),
            style_col[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(length_label, Theme::muted())),
            length_col[0],
        );

        self.render_trigger(
            frame,
            style_col[1],
            Dropdown::Style,
            vec![
                Span::styled(
                    format!("{} ", Theme::style_icon(style)),
                    Style::default().fg(Theme::style_color(style)),
                ),
                Span::styled(style.label(), Theme::normal()),
            ],
        );
        self.render_trigger(
            frame,
            length_col[1],
            Dropdown::Length,
            vec![Span::styled(
                style.describe_length(session.max_length()),
                Theme::normal(),
            )],
        );

        (style_col[1], length_col[1])
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, session: &Session) -> (Rect, Rect) {
        let submitting = session.is_submitting();
        let (submit_label, submit_style) = if submitting {
            (
                format!(" {} Generating summary... ", spinner_frame(self.tick)),
                Theme::button_disabled(),
            )
        } else {
            (" ▶ Generate Summary ".to_string(), Theme::button())
        };
        let submit_width = submit_label.chars().count() as u16;
        let submit = Rect::new(area.x, area.y, submit_width, 1).intersection(area);
        frame.render_widget(Paragraph::new(Span::styled(submit_label, submit_style)), submit);

        if !session.has_output() {
            return (submit, Rect::default());
        }

        let clear_label = " ✕ Clear All ";
        let clear = Rect::new(
            submit.right().saturating_add(2),
            area.y,
            clear_label.chars().count() as u16,
            1,
        )
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(clear_label, Theme::button_outline())),
            clear,
        );
        (submit, clear)
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let hint = if session.is_submitting() {
            "Waiting for the summary..."
        } else if self.pickers.open().is_some() {
            "↑↓ choose · Enter select · Esc close"
        } else if self.focus == Focus::Input {
            "Ctrl+S summarize · Tab pickers · Esc leave text"
        } else {
            "Enter open · Tab next · i edit text · ? help"
        };
        frame.render_widget(Paragraph::new(Span::styled(hint, Theme::dim())), area);
    }

    /// Draw the open dropdown on top of everything else. Call last.
    pub fn render_dropdown(&self, frame: &mut Frame, session: &Session) {
        let Some(open) = self.pickers.open() else {
            return;
        };
        let area = self.dropdown_area(open, session);
        frame.render_widget(Clear, area);

        let highlight = self.pickers.highlight();
        let row_style = |i: usize| {
            if i == highlight {
                Theme::selection()
            } else {
                Style::default()
            }
        };

        let lines: Vec<Line> = match open {
            Dropdown::Style => SummaryStyle::all()
                .iter()
                .enumerate()
                .flat_map(|(i, style)| {
                    let selected = *style == session.style();
                    [
                        Line::from(vec![
                            Span::styled(
                                format!("{} ", Theme::style_icon(*style)),
                                Style::default().fg(Theme::style_color(*style)),
                            ),
                            Span::styled(
                                style.label(),
                                if selected {
                                    Theme::selected()
                                } else {
                                    Theme::normal()
                                },
                            ),
                            Span::styled(if selected { " ✓" } else { "" }, Theme::selected()),
                        ])
                        .style(row_style(i)),
                        Line::from(Span::styled(
                            format!("  {}", style.description()),
                            Theme::muted(),
                        ))
                        .style(row_style(i)),
                    ]
                })
                .collect(),
            Dropdown::Length => {
                let style = session.style();
                style
                    .length_options()
                    .allowed
                    .iter()
                    .enumerate()
                    .map(|(i, length)| {
                        let selected = *length == session.max_length();
                        Line::from(vec![
                            Span::styled(
                                style.describe_length(*length),
                                if selected {
                                    Theme::selected()
                                } else {
                                    Theme::normal()
                                },
                            ),
                            Span::styled(if selected { " ✓" } else { "" }, Theme::selected()),
                        ])
                        .style(row_style(i))
                    })
                    .collect()
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::focused_border());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Default for SummaryFormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SummaryFormComponent {
    fn handle_action(&mut self, action: &Action, session: &mut Session) -> Option<Action> {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                None
            }

            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) if self.focus == Focus::Input => {
                let mut buf = [0u8; 4];
                let s: &str = c.encode_utf8(&mut buf);
                self.edit(session, |text, cursor| insert_at(text, cursor, s))
            }
            Action::NewlineInput if self.focus == Focus::Input => {
                self.edit(session, |text, cursor| insert_at(text, cursor, "\n"))
            }
            Action::BackspaceInput if self.focus == Focus::Input => {
                self.edit(session, backspace)
            }
            Action::DeleteInput if self.focus == Focus::Input => {
                self.edit(session, delete_forward)
            }
            Action::DeleteWord if self.focus == Focus::Input => self.edit(session, delete_word),
            Action::PasteBulk(pasted) => {
                let normalized = pasted.replace("\r\n", "\n").replace('\r', "\n");
                self.pickers.close_all();
                self.focus = Focus::Input;
                self.edit(session, |text, cursor| insert_at(text, cursor, &normalized))
            }
            Action::CursorLeft if self.focus == Focus::Input => {
                self.move_cursor(session, prev_boundary);
                None
            }
            Action::CursorRight if self.focus == Focus::Input => {
                self.move_cursor(session, next_boundary);
                None
            }
            Action::CursorHome if self.focus == Focus::Input => {
                self.move_cursor(session, line_start);
                None
            }
            Action::CursorEnd if self.focus == Focus::Input => {
                self.move_cursor(session, line_end);
                None
            }

            // ── Navigation ─────────────────────────────────────
            Action::ScrollUp => {
                if self.pickers.open().is_some() {
                    self.pickers.highlight_prev();
                } else if self.focus == Focus::Input {
                    self.move_vertical(session, false);
                }
                None
            }
            Action::ScrollDown => {
                if let Some(open) = self.pickers.open() {
                    self.pickers
                        .highlight_next(Self::option_count(open, session));
                } else if self.focus == Focus::Input {
                    self.move_vertical(session, true);
                }
                None
            }
            Action::Confirm => {
                if let Some(open) = self.pickers.open() {
                    let index = self.pickers.highlight();
                    self.choose(open, index, session);
                } else if let Some(dropdown) = self.focus.dropdown() {
                    self.toggle(dropdown, session);
                }
                None
            }
            Action::Cancel => {
                if self.pickers.open().is_some() {
                    self.pickers.close_all();
                } else if self.focus == Focus::Input {
                    self.focus = Focus::Style;
                }
                None
            }
            Action::FocusNext => {
                self.pickers.close_all();
                self.focus = self.focus.next();
                None
            }
            Action::FocusPrev => {
                self.pickers.close_all();
                self.focus = self.focus.prev();
                None
            }
            Action::FocusInput => {
                self.pickers.close_all();
                self.focus = Focus::Input;
                None
            }
            Action::Click { column, row } => self.click(*column, *row, session),

            Action::ClearAll => {
                if session.input().is_empty() {
                    self.cursor = 0;
                    self.scroll.set(0);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let counter = session.counter();
        let invalid = counter.count > 0 && !counter.in_range();

        let mut title = vec![Span::styled(" Input Text ", Theme::title())];
        if invalid {
            title.push(Span::styled("! ", Style::default().fg(Theme::error())));
        }
        let card = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = card.inner(area);
        frame.render_widget(card, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // label + counter
            Constraint::Min(3),    // text area
            Constraint::Length(4), // pickers
            Constraint::Length(1), // spacer
            Constraint::Length(1), // buttons
            Constraint::Length(1), // hint
        ])
        .split(inner);

        self.render_counter(frame, chunks[0], session);
        self.render_text(frame, chunks[1], session);
        let (style_trigger, length_trigger) = self.render_pickers(frame, chunks[2], session);
        let (submit, clear) = self.render_buttons(frame, chunks[4], session);
        self.render_hint(frame, chunks[5], session);

        let text = Block::default().borders(Borders::ALL).inner(chunks[1]);
        self.layout.set(FormLayout {
            bounds: frame.area(),
            text,
            style_trigger,
            length_trigger,
            submit,
            clear,
        });
    }
}

// ── Pure helpers ────────────────────────────────────────────

/// Clamp a byte offset into `text` and back it onto a char boundary.
fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn insert_at(text: &mut String, cursor: &mut usize, s: &str) {
    text.insert_str(*cursor, s);
    *cursor += s.len();
}

fn backspace(text: &mut String, cursor: &mut usize) {
    if let Some((i, _)) = text[..*cursor].char_indices().next_back() {
        text.remove(i);
        *cursor = i;
    }
}

fn delete_forward(text: &mut String, cursor: &mut usize) {
    if *cursor < text.len() {
        text.remove(*cursor);
    }
}

/// Delete the word before the cursor along with any spaces after it.
fn delete_word(text: &mut String, cursor: &mut usize) {
    let before = &text[..*cursor];
    let end = before.trim_end_matches(' ').len();
    let start = before[..end]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    if start == *cursor {
        // Nothing but a line break before the cursor.
        backspace(text, cursor);
    } else {
        text.drain(start..*cursor);
        *cursor = start;
    }
}

fn prev_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|c| cursor + c.len_utf8())
        .unwrap_or(cursor)
}

fn line_start(text: &str, cursor: usize) -> usize {
    text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .find('\n')
        .map(|i| cursor + i)
        .unwrap_or(text.len())
}

/// Split `text` into display rows of at most `width` characters.
///
/// Rows are byte ranges into `text`. Lines break at the last space that
/// fits, or hard at `width` when a word is longer than a row. The `\n`
/// separators belong to no row.
fn wrap_segments(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut segments = Vec::new();
    let mut line_offset = 0;

    for line in text.split('\n') {
        let mut start = 0;
        loop {
            let rest = &line[start..];
            if rest.chars().count() <= width {
                segments.push(line_offset + start..line_offset + line.len());
                break;
            }
            let hard = rest
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let split = match rest[..hard].rfind(' ') {
                Some(pos) if pos > 0 => pos + 1,
                _ => hard,
            };
            segments.push(line_offset + start..line_offset + start + split);
            start += split;
        }
        line_offset += line.len() + 1;
    }
    segments
}

/// Row holding the cursor. At a wrap point the cursor sits on the later row.
fn cursor_row(segments: &[Range<usize>], cursor: usize) -> usize {
    segments
        .iter()
        .rposition(|segment| segment.start <= cursor && cursor <= segment.end)
        .unwrap_or(0)
}

/// Place a dropdown of `rows` against its trigger, kept inside `bounds`.
fn place_dropdown(trigger: Rect, direction: DropDirection, rows: u16, bounds: Rect) -> Rect {
    let height = rows.min(bounds.height);
    let y = match direction {
        DropDirection::Up => trigger.y.saturating_sub(height).max(bounds.y),
        DropDirection::Down => trigger
            .bottom()
            .min(bounds.bottom().saturating_sub(height)),
    };
    Rect::new(trigger.x, y, trigger.width, height)
}

/// Entry index under `row` in an open dropdown, borders excluded.
fn item_at(dropdown: Dropdown, area: Rect, row: u16) -> Option<usize> {
    let top = area.y + 1;
    if row < top || row >= area.bottom().saturating_sub(1) {
        return None;
    }
    let per_item = match dropdown {
        Dropdown::Style => STYLE_ITEM_ROWS,
        Dropdown::Length => 1,
    };
    Some(((row - top) / per_item) as usize)
}
