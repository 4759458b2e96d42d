//! Keypad Calculator
//!
//! A four-function calculator driven one key at a time, the way a pocket
//! calculator is. Input runs through a five-state machine that accumulates
//! two operands and an operator, evaluates strictly left to right (no
//! precedence), and logs every completed computation.
//!
//! # Structure
//!
//! - [`core`]: tokens, numeral editing, arithmetic, the input machine and
//!   the [`Calculator`](core::Calculator) that owns it
//! - [`driver`]: sink traits for frontends and a driver trait shared by
//!   headless and terminal runs
//! - `tui` (feature `tui`): a ratatui frontend with a clickable keypad
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! let display = calc.handle_all(Token::tokenize("2+3*4=").unwrap());
//!
//! // Left to right: (2 + 3) * 4
//! assert_eq!(display, "20");
//! assert_eq!(calc.history().lines(), vec!["2 + 3 = 5", "5 * 4 = 20"]);
//!
//! // Division by zero is a state, not a panic
//! assert_eq!(calc.handle_all(Token::tokenize("5/0=").unwrap()), "Cannot Divide By 0!");
//! assert_eq!(calc.state(), State::Error);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        format_number, CalcError, CalcResult, Calculator, Machine, Numeral, Operation, Response,
        State, Token, TokenError,
    };
    pub use crate::driver::{
        CalculatorDriver, DisplaySink, HistorySink, RecordingSink, Session,
    };

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
