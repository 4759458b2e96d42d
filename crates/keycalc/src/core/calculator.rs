//! Calculator: the input machine plus its computation log

use crate::core::history::{History, HistoryEntry};
use crate::core::{Machine, Slots, State, Token};

/// What one token did to the calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Display text after the token
    pub display: String,
    /// Computation completed by the token, already appended to history
    pub logged: Option<HistoryEntry>,
    /// True when the token wiped the calculator and its history
    pub cleared: bool,
}

/// Keypad calculator.
///
/// Owns the current [`Machine`] and the [`History`] of completed
/// computations. Tokens are processed one at a time, each to completion;
/// wrap it in a lock before sharing it between threads.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    machine: Machine,
    history: History,
}

impl Calculator {
    /// Creates a calculator showing `0` with an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one token and returns the new display text
    pub fn handle_input(&mut self, token: Token) -> String {
        self.press(token).display
    }

    /// Handles one token and reports everything it changed
    pub fn press(&mut self, token: Token) -> Response {
        let step = std::mem::take(&mut self.machine).step(token);
        self.machine = step.machine;

        if step.cleared {
            self.history.clear();
        }
        if let Some(entry) = &step.completed {
            self.history.push(entry.clone());
        }

        Response {
            display: self.machine.display(),
            logged: step.completed,
            cleared: step.cleared,
        }
    }

    /// Handles a token in wire form (`"7"`, `"clr"`, `"-/+"`).
    ///
    /// Anything outside the token set leaves the calculator untouched.
    pub fn handle_str(&mut self, raw: &str) -> String {
        match raw.parse::<Token>() {
            Ok(token) => self.handle_input(token),
            Err(err) => {
                tracing::debug!(%err, "input ignored");
                self.display()
            }
        }
    }

    /// Handles a keyboard key name (`"Enter"`, `"Escape"`, `"5"`).
    ///
    /// Keys with no token equivalent are ignored.
    pub fn handle_key(&mut self, key: &str) -> String {
        match Token::from_key(key) {
            Some(token) => self.handle_input(token),
            None => {
                tracing::trace!(key, "key ignored");
                self.display()
            }
        }
    }

    /// Handles a sequence of tokens, returning the final display
    pub fn handle_all<I>(&mut self, tokens: I) -> String
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.press(token);
        }
        self.display()
    }

    /// Returns the current display text
    #[must_use]
    pub fn display(&self) -> String {
        self.machine.display()
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// Returns the slots
    #[must_use]
    pub fn slots(&self) -> &Slots {
        self.machine.slots()
    }

    /// Returns the input machine
    #[must_use]
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Returns true while a division by zero is on the display
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.machine.is_error()
    }

    /// Returns the computation log
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
}
