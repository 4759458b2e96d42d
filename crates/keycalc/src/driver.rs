//! Frontend contracts and the unified calculator driver
//!
//! A frontend supplies tokens and receives two streams back: the display
//! text after every token, and one log line per completed computation.
//! [`DisplaySink`] and [`HistorySink`] are those two receivers;
//! [`Session`] wires a [`Calculator`] to them.
//!
//! [`CalculatorDriver`] lets a scenario be written once and run against
//! the headless calculator and the terminal app alike.

use crate::core::{Calculator, Token, TokenError};

/// Receives the display text after every processed token
pub trait DisplaySink {
    /// Shows the given text
    fn show(&mut self, text: &str);
}

/// Receives formatted log lines of completed computations
pub trait HistorySink {
    /// Appends a line like `12 + 3 = 15`
    fn append(&mut self, line: &str);

    /// Drops every line shown so far
    fn clear(&mut self);
}

/// In-memory sink that keeps everything it was given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    /// Every display text, in order
    pub displays: Vec<String>,
    /// Log lines currently shown
    pub lines: Vec<String>,
}

impl RecordingSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent display text
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.displays.last().map(String::as_str)
    }
}

impl DisplaySink for RecordingSink {
    fn show(&mut self, text: &str) {
        self.displays.push(text.to_string());
    }
}

impl HistorySink for RecordingSink {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// A calculator bound to its display and history sinks
#[derive(Debug)]
pub struct Session<D, H> {
    calculator: Calculator,
    display: D,
    history: H,
}

impl<D: DisplaySink, H: HistorySink> Session<D, H> {
    /// Creates a session and shows the initial display
    pub fn new(mut display: D, history: H) -> Self {
        let calculator = Calculator::new();
        display.show(&calculator.display());
        Self {
            calculator,
            display,
            history,
        }
    }

    /// Processes one token and notifies both sinks
    pub fn dispatch(&mut self, token: Token) {
        let response = self.calculator.press(token);
        if response.cleared {
            self.history.clear();
        }
        if let Some(entry) = &response.logged {
            self.history.append(&entry.display());
        }
        self.display.show(&response.display);
    }

    /// Processes every token in order
    pub fn dispatch_all<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.dispatch(token);
        }
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the display sink
    #[must_use]
    pub fn display_sink(&self) -> &D {
        &self.display
    }

    /// Returns the history sink
    #[must_use]
    pub fn history_sink(&self) -> &H {
        &self.history
    }

    /// Ends the session, handing back both sinks
    pub fn into_sinks(self) -> (D, H) {
        (self.display, self.history)
    }
}

/// Abstract driver for calculator interactions
///
/// Implemented by the headless [`Calculator`] and, with the `tui` feature,
/// by [`TuiDriver`], so the scenarios at the bottom of this module run on
/// both.
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, token: Token);

    /// Gets the current display text
    fn display(&self) -> String;

    /// Gets log lines, oldest first
    fn history_lines(&self) -> Vec<String>;

    /// Presses clear
    fn reset(&mut self) {
        self.press(Token::Clear);
    }

    /// Presses every key of a script and returns the resulting display
    fn enter(&mut self, script: &str) -> Result<String, TokenError> {
        for token in Token::tokenize(script)? {
            self.press(token);
        }
        Ok(self.display())
    }
}

impl CalculatorDriver for Calculator {
    fn press(&mut self, token: Token) {
        Calculator::press(self, token);
    }

    fn display(&self) -> String {
        Calculator::display(self)
    }

    fn history_lines(&self) -> Vec<String> {
        self.history().lines()
    }
}

/// TUI Driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::CalculatorDriver;
    use crate::core::Token;
    use crate::tui::CalculatorApp;

    /// Driver that presses keys through the terminal app, keypad included
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, token: Token) {
            self.app.press(token);
        }

        fn display(&self) -> String {
            self.app.calculator().display()
        }

        fn history_lines(&self) -> Vec<String> {
            self.app.calculator().history().lines()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenarios =====
// These run against ANY CalculatorDriver implementation

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.enter("12+3="), Ok("15".to_string()));
    assert_eq!(driver.enter("10-4="), Ok("6".to_string()));
    assert_eq!(driver.enter("6*7="), Ok("42".to_string()));
    assert_eq!(driver.enter("20/4="), Ok("5".to_string()));
    assert_eq!(driver.enter("1/3="), Ok("0.33333333".to_string()));
}

/// Verifies left-to-right chaining without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.enter("2+3*4="), Ok("20".to_string()));
    assert_eq!(
        driver.history_lines(),
        vec!["2 + 3 = 5".to_string(), "5 * 4 = 20".to_string()]
    );
}

/// Verifies numeral editing keys
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.enter("1..5"), Ok("1.5".to_string()));
    assert_eq!(driver.enter("-/+"), Ok("-1.5".to_string()));
    assert_eq!(driver.enter("del"), Ok("0".to_string()));
    assert_eq!(driver.enter("98del"), Ok("9".to_string()));
}

/// Verifies the division-by-zero error and recovery
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.enter("5/0="), Ok("Cannot Divide By 0!".to_string()));
    assert_eq!(driver.enter("7"), Ok("0".to_string()));
    assert_eq!(driver.enter("7"), Ok("7".to_string()));
}

/// Verifies that clear wipes the log
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.enter("1+1="), Ok("2".to_string()));
    assert_eq!(driver.history_lines().len(), 1);
    driver.reset();
    assert_eq!(driver.display(), "0");
    assert!(driver.history_lines().is_empty());
}

/// Complete verification suite - runs every scenario
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_editing(driver);
    verify_error_handling(driver);
    verify_clear(driver);
}
