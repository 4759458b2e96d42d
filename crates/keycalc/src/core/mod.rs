//! Calculator core: tokens, numeral editing, arithmetic and the input machine
//!
//! Everything here is headless. Frontends feed [`Token`]s into a
//! [`Calculator`] and render whatever it reports back.

mod calculator;
pub mod history;
pub mod machine;
pub mod numeral;
mod operations;
pub mod token;

pub use calculator::{Calculator, Response};
pub use machine::{Machine, Slots, State, Step};
pub use numeral::{format_number, Numeral};
pub use operations::{Operation, DECIMAL_PLACE_MAX, DIVIDE_BY_ZERO_TEXT};
pub use token::{Token, TokenError};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised by arithmetic.
///
/// Division by zero is the only way a computation can fail; every other
/// operation is total over well-formed numerals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero divisor
    #[error("division by zero")]
    DivideByZero,
}

impl CalcError {
    /// Text shown on the display while the calculator is in the error state
    #[must_use]
    pub const fn display_text(self) -> &'static str {
        match self {
            Self::DivideByZero => DIVIDE_BY_ZERO_TEXT,
        }
    }
}
