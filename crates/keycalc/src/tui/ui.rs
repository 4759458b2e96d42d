//! TUI rendering
//!
//! ```text
//! ┌ Keypad Calculator ─────────────────────────────────────┐
//! │┌ Display ─────────────┐┌ Keypad ─────────┐┌ Help ─────┐│
//! │└──────────────────────┘│                 ││           ││
//! │┌ History ─────────────┐│                 ││           ││
//! │└──────────────────────┘│                 ││           ││
//! │┌ State ───────────────┐│                 ││           ││
//! │└──────────────────────┘└─────────────────┘└───────────┘│
//! └────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Number of log lines shown, newest first
pub const HISTORY_VISIBLE: usize = 10;

/// Title of the outer frame
pub const APP_TITLE: &str = " Keypad Calculator ";

/// Keyboard shortcuts shown in the help sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/", "Operator"),
    ("Enter =", "Equals"),
    ("Esc", "Clear all"),
    ("Bksp", "Delete"),
    ("n", "Negate"),
    ("q", "Quit"),
];

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Splits the full terminal area into main, keypad and help columns
fn columns(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(24),
            Constraint::Length(22),
            Constraint::Length(20),
        ])
        .areas(area)
}

/// Returns where the keypad is drawn for a terminal of size `area`
///
/// Mouse clicks are hit-tested against this rectangle.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    columns(area)[1]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let calc = self.app.calculator();
        let (style, border) = if calc.is_error() {
            (
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                Color::Red,
            )
        } else {
            (
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Color::Yellow,
            )
        };

        Paragraph::new(Span::styled(calc.display(), style))
            .right_aligned()
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .calculator()
            .history()
            .iter_rev()
            .take(HISTORY_VISIBLE)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} {} {}", entry.x, entry.operand, entry.y),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(" = "),
                    Span::styled(entry.result.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" History (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let state = self.app.calculator().state();
        Paragraph::new(Span::styled(
            state.to_string(),
            Style::default().fg(Color::Magenta),
        ))
        .block(
            Block::default()
                .title(" State ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, keypad, help] = columns(area);
        let [display, history, status] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .areas(main_area);

        self.render_display(display, buf);
        self.render_history(history, buf);
        self.render_status(status, buf);
        KeypadWidget::new(self.app.keypad()).render(keypad, buf);
        Self::render_help(help, buf);
    }
}
