//! Subcommand execution

use std::io::{self, Write};

use console::Style;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::core::history::HistoryEntry;
use keycalc::core::{State, Token};
use keycalc::driver::{RecordingSink, Session};
use keycalc::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::{KeysArgs, RunArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// What a non-interactive run left behind
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Display text after every token, starting with the initial `0`
    pub displays: Vec<String>,
    /// Final display text
    pub display: String,
    /// Final state
    pub state: State,
    /// Log entries still shown at the end, oldest first
    pub history: Vec<HistoryEntry>,
    /// Lines the history sink holds at the end, like `12 + 3 = 15`
    pub lines: Vec<String>,
}

/// Reads the tokens of `keycalc run`
///
/// Every argument is tokenized on its own, then the `--script`.
pub fn collect_tokens(args: &RunArgs) -> CliResult<Vec<Token>> {
    let mut tokens = Vec::new();
    for arg in args.tokens.iter().chain(args.script.as_ref()) {
        tokens.extend(Token::tokenize(arg)?);
    }
    if tokens.is_empty() {
        return Err(CliError::invalid_argument(
            "nothing to press; pass tokens or --script",
        ));
    }
    Ok(tokens)
}

/// Maps key names to tokens, skipping keys the calculator ignores
#[must_use]
pub fn collect_keys(keys: &[String]) -> Vec<Token> {
    keys.iter()
        .filter_map(|key| {
            let token = Token::from_key(key);
            if token.is_none() {
                debug!(key = key.as_str(), "key skipped");
            }
            token
        })
        .collect()
}

/// Presses every token on a fresh calculator
#[must_use]
pub fn press_all<I>(tokens: I) -> Report
where
    I: IntoIterator<Item = Token>,
{
    let mut session = Session::new(RecordingSink::new(), RecordingSink::new());
    session.dispatch_all(tokens);

    let display = session.calculator().display();
    let state = session.calculator().state();
    let history = session.calculator().history().iter().cloned().collect();
    let (display_sink, history_sink) = session.into_sinks();

    Report {
        displays: display_sink.displays,
        display,
        state,
        history,
        lines: history_sink.lines,
    }
}

/// Writes a report in the configured format
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    config: &CliConfig,
    final_only: bool,
) -> CliResult<()> {
    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(
            out,
            report,
            config.color.should_color(),
            final_only,
            config.verbosity.is_verbose(),
        )?,
    }
    Ok(())
}

fn write_text<W: Write>(
    out: &mut W,
    report: &Report,
    color: bool,
    final_only: bool,
    show_state: bool,
) -> io::Result<()> {
    let display_style = Style::new().bold().force_styling(color);
    let final_style = if report.state == State::Error {
        Style::new().red().bold().force_styling(color)
    } else {
        Style::new().green().bold().force_styling(color)
    };
    let dim = Style::new().dim().force_styling(color);

    // The first entry is the initial display, before any token
    let intermediate = if final_only {
        &[][..]
    } else {
        report
            .displays
            .get(1..report.displays.len().saturating_sub(1))
            .unwrap_or_default()
    };
    for text in intermediate {
        writeln!(out, "{}", display_style.apply_to(text))?;
    }
    writeln!(out, "{}", final_style.apply_to(&report.display))?;
    if show_state {
        writeln!(out, "{}", dim.apply_to(format!("State: {}", report.state)))?;
    }

    if !report.lines.is_empty() {
        writeln!(out, "{}", dim.apply_to("History:"))?;
        for line in &report.lines {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

/// Runs `keycalc run`
pub fn run_tokens(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let tokens = collect_tokens(args)?;
    info!(count = tokens.len(), "pressing tokens");
    let report = press_all(tokens);
    write_report(&mut io::stdout().lock(), &report, config, args.final_only)
}

/// Runs `keycalc keys`
pub fn run_keys(config: &CliConfig, args: &KeysArgs) -> CliResult<()> {
    if args.keys.is_empty() {
        return Err(CliError::invalid_argument("nothing to press; pass key names"));
    }
    let tokens = collect_keys(&args.keys);
    info!(
        keys = args.keys.len(),
        pressed = tokens.len(),
        "pressing keys"
    );
    let report = press_all(tokens);
    write_report(&mut io::stdout().lock(), &report, config, args.final_only)
}

/// Runs the interactive terminal calculator
///
/// The log is printed once the terminal is restored.
pub fn run_tui(config: &CliConfig) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = CalculatorApp::new();
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    let log = app.calculator().history().export_formatted();
    if !log.is_empty() && !config.verbosity.is_quiet() {
        writeln!(io::stdout().lock(), "{log}")?;
    }
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    let handler = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|frame| render(app, frame))?;

        match event::read()? {
            Event::Key(key) => {
                app.apply(handler.handle_key(key));
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let size = terminal.size()?;
                let area = keypad_area(Rect::new(0, 0, size.width, size.height));
                app.click(area, column, row);
            }
            _ => {}
        }
    }
    Ok(())
}
