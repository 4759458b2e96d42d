//! TUI application state

use ratatui::layout::Rect;

use crate::core::{Calculator, Response, Token};

use super::input::KeyAction;
use super::keypad::Keypad;

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    /// Headless calculator doing the work
    calculator: Calculator,
    /// On-screen keypad, highlighting the last key
    keypad: Keypad,
    /// Whether the app should quit
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a key, highlighting its keypad button
    pub fn press(&mut self, token: Token) -> Response {
        self.keypad.highlight(token);
        self.calculator.press(token)
    }

    /// Applies a keyboard action
    ///
    /// Returns true if the app needs redrawing.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Press(token) => {
                self.press(token);
                true
            }
            KeyAction::Quit => {
                self.quit();
                false
            }
            KeyAction::None => false,
        }
    }

    /// Handles a mouse click at (x, y) on a keypad drawn in `keypad_area`
    ///
    /// Clicks that miss every button are ignored.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> Option<Response> {
        let index = self.keypad.hit_test(keypad_area, x, y)?;
        let token = self.keypad.get_button(index)?.token;
        Some(self.press(token))
    }
}
