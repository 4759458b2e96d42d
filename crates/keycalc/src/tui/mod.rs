//! Terminal frontend for the calculator
//!
//! A ratatui view over [`crate::core::Calculator`]: display, history,
//! state line and a clickable keypad.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, APP_TITLE, HELP_SHORTCUTS, HISTORY_VISIBLE};
