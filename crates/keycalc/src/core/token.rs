//! Input tokens and their wire form
//!
//! Buttons and keys reach the calculator as short strings: digits, `.`,
//! the four operator symbols, `=`, `clr`, `del` and `-/+`. Keyboard key
//! names are normalized onto the same set before they reach the core.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Operation;

/// Wire form of the clear token
pub const CLEAR_INPUT: &str = "clr";
/// Wire form of the delete token
pub const DELETE_INPUT: &str = "del";
/// Wire form of the sign toggle token
pub const NEGATE_INPUT: &str = "-/+";

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A single normalized unit of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// One of the four operators
    Operator(Operation),
    /// Evaluate the pending computation
    Equals,
    /// Reset everything, including history
    Clear,
    /// Erase the last character of the active numeral
    Delete,
    /// Toggle the sign of the active numeral
    Negate,
}

/// Errors from turning raw input into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Input is not part of the token set
    #[error("unknown token '{0}'")]
    Unknown(String),
    /// A script contained text that matches no token
    #[error("unexpected '{text}' at offset {offset}")]
    Unexpected {
        /// The unmatched text
        text: String,
        /// Byte offset in the script
        offset: usize,
    },
}

impl Token {
    /// Every token, in keypad reading order
    pub const ALL: [Self; 19] = [
        Self::Clear,
        Self::Delete,
        Self::Negate,
        Self::Operator(Operation::Divide),
        Self::Digit(7),
        Self::Digit(8),
        Self::Digit(9),
        Self::Operator(Operation::Multiply),
        Self::Digit(4),
        Self::Digit(5),
        Self::Digit(6),
        Self::Operator(Operation::Subtract),
        Self::Digit(1),
        Self::Digit(2),
        Self::Digit(3),
        Self::Operator(Operation::Add),
        Self::Digit(0),
        Self::Decimal,
        Self::Equals,
    ];

    /// Returns the wire form of the token
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Digit(d) => DIGITS[usize::from(d.min(9))],
            Self::Decimal => ".",
            Self::Operator(op) => op.symbol(),
            Self::Equals => "=",
            Self::Clear => CLEAR_INPUT,
            Self::Delete => DELETE_INPUT,
            Self::Negate => NEGATE_INPUT,
        }
    }

    /// Builds a digit token from a character
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        match c {
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            _ => Operation::from_symbol(c.encode_utf8(&mut [0; 4])).map(Self::Operator),
        }
    }

    /// Normalizes a keyboard key name.
    ///
    /// `Escape`, `Enter` and `Backspace` map onto clear, equals and delete;
    /// every other key passes through unchanged and is kept only if it is
    /// part of the token set.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Clear),
            "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Delete),
            other => other.parse().ok(),
        }
    }

    /// Splits a key script such as `"12+3="` or `"9 -/+ clr"` into tokens.
    ///
    /// Whitespace separates nothing and is skipped. Multi-character tokens
    /// win over their prefixes, so `-/+` is never read as `-`.
    pub fn tokenize(script: &str) -> Result<Vec<Self>, TokenError> {
        const WORDS: [(&str, Token); 3] = [
            (NEGATE_INPUT, Token::Negate),
            (CLEAR_INPUT, Token::Clear),
            (DELETE_INPUT, Token::Delete),
        ];

        let mut tokens = Vec::new();
        let mut offset = 0;
        while offset < script.len() {
            let rest = &script[offset..];
            if let Some((word, token)) = WORDS.iter().find(|(w, _)| rest.starts_with(w)) {
                tokens.push(*token);
                offset += word.len();
                continue;
            }
            let Some(c) = rest.chars().next() else {
                break;
            };
            if !c.is_whitespace() {
                let token = Self::from_char(c).ok_or_else(|| TokenError::Unexpected {
                    text: c.to_string(),
                    offset,
                })?;
                tokens.push(token);
            }
            offset += c.len_utf8();
        }
        Ok(tokens)
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CLEAR_INPUT => Ok(Self::Clear),
            DELETE_INPUT => Ok(Self::Delete),
            NEGATE_INPUT => Ok(Self::Negate),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
                .ok_or_else(|| TokenError::Unknown(s.to_string()))
            }
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
