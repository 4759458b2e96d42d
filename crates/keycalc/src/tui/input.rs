//! Keyboard input handling
//!
//! Maps terminal key events onto calculator tokens. Every key the keypad
//! has can also be typed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Token;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send a token to the calculator
    Press(Token),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    ///
    /// `Esc` clears, `Enter` evaluates, `Backspace` and `Delete` delete,
    /// `n` negates and `q` quits. Releases and repeats are ignored.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Esc => KeyAction::Press(Token::Clear),
            KeyCode::Enter => KeyAction::Press(Token::Equals),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Press(Token::Delete),
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('n' | 'N') => KeyAction::Press(Token::Negate),
            KeyCode::Char(c) => Token::from_char(c).map_or(KeyAction::None, KeyAction::Press),
            _ => KeyAction::None,
        }
    }
}
