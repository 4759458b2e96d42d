//! The five-state input machine
//!
//! [`Machine::step`] is a pure transition: it takes the current machine by
//! value, consumes one [`Token`] and hands back the next machine together
//! with the computation it completed, if any. Nothing here owns history or
//! talks to a frontend; [`crate::core::Calculator`] does that.
//!
//! ```text
//!            digit/./-/+/del              digit/./-/+/del
//!             ┌──────┐                      ┌──────┐
//!             ▼      │      op       digit  ▼      │   =
//!  ──► EnteringX ────┴──► HaveOperand ──► EnteringY ┴──► ShowingResult
//!          ▲   ◄──── del ────┘   ▲ op        │  op (chain)      │ op (chain)
//!          │                                 ▼                  ▼
//!          └───── digit/./op ───── Error ◄── ÷0          EnteringY
//! ```

use serde::{Deserialize, Serialize};

use crate::core::history::HistoryEntry;
use crate::core::{format_number, CalcError, Numeral, Operation, Token};

/// Which slot is being edited, or what the display is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum State {
    /// Typing the first operand
    #[default]
    EnteringX,
    /// Operator chosen, second operand not started
    HaveOperand,
    /// Typing the second operand
    EnteringY,
    /// A computation finished and its value is displayed
    ShowingResult,
    /// A division by zero happened; waiting for a reset
    Error,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EnteringX => "EnteringX",
            Self::HaveOperand => "HaveOperand",
            Self::EnteringY => "EnteringY",
            Self::ShowingResult => "ShowingResult",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

/// The four storage cells of a computation
#[derive(Debug, Clone, PartialEq)]
pub struct Slots {
    /// First operand text
    pub x: Numeral,
    /// Pending operator
    pub operand: Option<Operation>,
    /// Second operand text
    pub y: Numeral,
    /// Outcome of the last computation
    pub result: Option<Result<f64, CalcError>>,
}

impl Default for Slots {
    fn default() -> Self {
        Self::starting_with(Numeral::zero())
    }
}

impl Slots {
    /// Fresh slots with the given first operand
    #[must_use]
    pub fn starting_with(x: Numeral) -> Self {
        Self {
            x,
            operand: None,
            y: Numeral::empty(),
            result: None,
        }
    }

    /// Text of the result slot: the value, or the error message
    #[must_use]
    pub fn result_text(&self) -> Option<String> {
        self.result.map(|outcome| match outcome {
            Ok(value) => format_number(value),
            Err(err) => err.display_text().to_string(),
        })
    }

    /// All four slots joined by single spaces, empty slots as nothing
    #[must_use]
    pub fn joined(&self) -> String {
        let operand = self.operand.map_or("", Operation::symbol);
        let result = self.result_text().unwrap_or_default();
        [self.x.as_str(), operand, self.y.as_str(), result.as_str()].join(" ")
    }
}

/// Outcome of feeding one token to a [`Machine`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The machine after the transition
    pub machine: Machine,
    /// Record of the computation this token completed
    pub completed: Option<HistoryEntry>,
    /// True when the token was `clear`, which also wipes history
    pub cleared: bool,
}

/// Calculator input state: the current [`State`] plus its [`Slots`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Machine {
    state: State,
    slots: Slots,
}

impl Machine {
    /// A machine in `EnteringX` with X = `0` and every other slot empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the slots
    #[must_use]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Returns true while a division by zero is on the display
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.state == State::Error
    }

    /// Text for the display: the result if there is one, otherwise the
    /// slots joined by spaces.
    ///
    /// Trailing separators of empty slots are trimmed, so a fresh machine
    /// shows `0` and a pending `5 +` shows exactly that.
    #[must_use]
    pub fn display(&self) -> String {
        match self.slots.result_text() {
            Some(text) => text,
            None => self.slots.joined().trim_end_matches(' ').to_string(),
        }
    }

    /// Consumes one token and returns the next machine
    #[must_use]
    pub fn step(mut self, token: Token) -> Step {
        let before = self.state;
        let mut completed = None;
        let mut cleared = false;

        match (self.state, token) {
            (_, Token::Clear) => {
                self = Self::new();
                cleared = true;
            }

            // The first digit, decimal or operator after an error only resets.
            (State::Error, Token::Digit(_) | Token::Decimal | Token::Operator(_)) => {
                self = Self::new();
            }
            (State::Error, _) => {}

            (State::EnteringX, Token::Digit(d)) => self.slots.x.push_digit(d),
            (State::EnteringX, Token::Decimal) => self.slots.x.push_decimal(),
            (State::EnteringX, Token::Negate) => self.slots.x.negate(),
            (State::EnteringX, Token::Delete) => self.slots.x.delete_last(),
            (State::EnteringX, Token::Operator(op)) => {
                self.slots.operand = Some(op);
                self.state = State::HaveOperand;
            }
            (State::EnteringX, Token::Equals) => {}

            (State::HaveOperand, Token::Digit(d)) => {
                self.slots.y = Numeral::empty();
                self.slots.y.push_digit(d);
                self.state = State::EnteringY;
            }
            (State::HaveOperand, Token::Decimal) => {
                self.slots.y = Numeral::empty();
                self.slots.y.push_decimal();
                self.state = State::EnteringY;
            }
            (State::HaveOperand, Token::Operator(op)) => self.slots.operand = Some(op),
            (State::HaveOperand, Token::Delete) => {
                self.slots.operand = None;
                self.state = State::EnteringX;
            }
            (State::HaveOperand, Token::Equals | Token::Negate) => {}

            (State::EnteringY, Token::Digit(d)) => self.slots.y.push_digit(d),
            (State::EnteringY, Token::Decimal) => self.slots.y.push_decimal(),
            (State::EnteringY, Token::Negate) => self.slots.y.negate(),
            (State::EnteringY, Token::Delete) => self.slots.y.delete_last(),
            (State::EnteringY, Token::Equals) => completed = self.evaluate(),
            (State::EnteringY, Token::Operator(op)) => {
                completed = self.evaluate();
                if let Some(Ok(value)) = self.slots.result {
                    self.chain(value, op);
                }
            }

            (State::ShowingResult, Token::Digit(d)) => {
                let mut x = Numeral::empty();
                x.push_digit(d);
                self = Self::fresh(x);
            }
            (State::ShowingResult, Token::Decimal) => {
                let mut x = Numeral::empty();
                x.push_decimal();
                self = Self::fresh(x);
            }
            (State::ShowingResult, Token::Operator(op)) => {
                if let Some(Ok(value)) = self.slots.result {
                    self.chain(value, op);
                }
            }
            (State::ShowingResult, Token::Equals | Token::Negate | Token::Delete) => {}
        }

        tracing::trace!(%token, from = %before, to = %self.state, "token handled");

        Step {
            machine: self,
            completed,
            cleared,
        }
    }

    fn fresh(x: Numeral) -> Self {
        Self {
            state: State::EnteringX,
            slots: Slots::starting_with(x),
        }
    }

    /// Starts a new computation on top of a finished one
    fn chain(&mut self, value: f64, op: Operation) {
        self.slots = Slots {
            x: Numeral::from_value(value),
            operand: Some(op),
            y: Numeral::empty(),
            result: None,
        };
        self.state = State::EnteringY;
    }

    /// Computes X operand Y into the result slot and returns the log record.
    ///
    /// Moves to `ShowingResult`, or to `Error` on a zero divisor.
    fn evaluate(&mut self) -> Option<HistoryEntry> {
        let op = self.slots.operand?;
        let x = self.slots.x.value();
        let y = self.slots.y.value();
        let outcome = op.apply(x, y);
        self.slots.result = Some(outcome);

        let result_text = self.slots.result_text().unwrap_or_default();
        let entry = HistoryEntry::new(format_number(x), op, format_number(y), result_text);

        match outcome {
            Ok(_) => {
                self.state = State::ShowingResult;
                tracing::debug!(entry = %entry, "computation completed");
            }
            Err(err) => {
                self.slots.operand = None;
                self.state = State::Error;
                tracing::warn!(error = %err, entry = %entry, "computation failed");
            }
        }
        Some(entry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Feeds a script through the machine, collecting completed records
    fn run(script: &str) -> (Machine, Vec<HistoryEntry>) {
        let mut machine = Machine::new();
        let mut log = Vec::new();
        for token in Token::tokenize(script).unwrap() {
            let step = machine.step(token);
            if step.cleared {
                log.clear();
            }
            log.extend(step.completed);
            machine = step.machine;
        }
        (machine, log)
    }

    fn lines(log: &[HistoryEntry]) -> Vec<String> {
        log.iter().map(HistoryEntry::display).collect()
    }

    // ===== Initial state tests =====

    #[test]
    fn test_new_machine() {
        let m = Machine::new();
        assert_eq!(m.state(), State::EnteringX);
        assert_eq!(m.slots().x.as_str(), "0");
        assert!(m.slots().operand.is_none());
        assert!(m.slots().y.is_empty());
        assert!(m.slots().result.is_none());
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_joined_keeps_separators() {
        assert_eq!(Machine::new().slots().joined(), "0   ");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::HaveOperand.to_string(), "HaveOperand");
        assert_eq!(State::Error.to_string(), "Error");
    }

    // ===== Worked scenarios =====

    #[test]
    fn test_simple_addition() {
        let (m, log) = run("12+3=");
        assert_eq!(m.display(), "15");
        assert_eq!(m.state(), State::ShowingResult);
        assert_eq!(lines(&log), vec!["12 + 3 = 15"]);
    }

    #[test]
    fn test_divide_by_zero() {
        let (m, log) = run("5/0=");
        assert_eq!(m.display(), "Cannot Divide By 0!");
        assert_eq!(m.state(), State::Error);
        assert!(m.is_error());
        assert_eq!(lines(&log), vec!["5 / 0 = Cannot Divide By 0!"]);
    }

    #[test]
    fn test_error_reset_consumes_token() {
        let (m, _) = run("5/0=7");
        assert_eq!(m.state(), State::EnteringX);
        assert_eq!(m.slots().x.as_str(), "0");
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_error_reset_by_operator_and_decimal() {
        let (m, _) = run("5/0=+");
        assert_eq!(m.state(), State::EnteringX);
        assert!(m.slots().operand.is_none());

        let (m, _) = run("5/0=.");
        assert_eq!(m.slots().x.as_str(), "0");
    }

    #[test]
    fn test_error_ignores_equals_negate_delete() {
        for tail in ["=", "-/+", "del"] {
            let (m, _) = run(&format!("5/0={tail}"));
            assert_eq!(m.state(), State::Error, "after {tail}");
            assert_eq!(m.display(), "Cannot Divide By 0!");
        }
    }

    #[test]
    fn test_negate_toggles_x() {
        let (m, _) = run("9-/+");
        assert_eq!(m.slots().x.as_str(), "-9");
        let (m, _) = run("9-/+-/+");
        assert_eq!(m.slots().x.as_str(), "9");
    }

    #[test]
    fn test_second_decimal_ignored() {
        let (m, _) = run("1..5");
        assert_eq!(m.slots().x.as_str(), "1.5");
    }

    #[test]
    fn test_operator_chaining() {
        let (m, log) = run("2+3*4=");
        assert_eq!(m.display(), "20");
        assert_eq!(lines(&log), vec!["2 + 3 = 5", "5 * 4 = 20"]);
    }

    #[test]
    fn test_chaining_matches_equals_then_operator() {
        let (direct, _) = run("5+3*2=");
        let (stepped, _) = run("5+3=*2=");
        assert_eq!(direct.display(), "16");
        assert_eq!(stepped.display(), "16");
    }

    // ===== EnteringX tests =====

    #[test]
    fn test_entering_x_equals_is_noop() {
        let (m, log) = run("42=");
        assert_eq!(m.state(), State::EnteringX);
        assert_eq!(m.display(), "42");
        assert!(log.is_empty());
    }

    #[test]
    fn test_entering_x_delete() {
        let (m, _) = run("123del");
        assert_eq!(m.slots().x.as_str(), "12");
        let (m, _) = run("1del");
        assert_eq!(m.slots().x.as_str(), "0");
    }

    #[test]
    fn test_entering_x_leading_decimal() {
        let (m, _) = run(".5");
        assert_eq!(m.slots().x.as_str(), "0.5");
    }

    #[test]
    fn test_operator_moves_to_have_operand() {
        let (m, _) = run("5+");
        assert_eq!(m.state(), State::HaveOperand);
        assert_eq!(m.slots().operand, Some(Operation::Add));
        assert_eq!(m.display(), "5 +");
    }

    // ===== HaveOperand tests =====

    #[test]
    fn test_have_operand_replaces_operator() {
        let (m, _) = run("5+-*");
        assert_eq!(m.state(), State::HaveOperand);
        assert_eq!(m.slots().operand, Some(Operation::Multiply));
    }

    #[test]
    fn test_have_operand_decimal_starts_y() {
        let (m, _) = run("5+.");
        assert_eq!(m.state(), State::EnteringY);
        assert_eq!(m.slots().y.as_str(), "0.");
        assert_eq!(m.display(), "5 + 0.");
    }

    #[test]
    fn test_have_operand_delete_drops_operator() {
        let (m, _) = run("5+del");
        assert_eq!(m.state(), State::EnteringX);
        assert!(m.slots().operand.is_none());
        assert_eq!(m.display(), "5");
    }

    #[test]
    fn test_have_operand_ignores_equals_and_negate() {
        let (m, log) = run("5+=-/+");
        assert_eq!(m.state(), State::HaveOperand);
        assert!(log.is_empty());
    }

    // ===== EnteringY tests =====

    #[test]
    fn test_entering_y_edits() {
        let (m, _) = run("5+12-/+");
        assert_eq!(m.slots().y.as_str(), "-12");
        let (m, _) = run("5+12del");
        assert_eq!(m.slots().y.as_str(), "1");
        assert_eq!(m.display(), "5 + 1");
    }

    #[test]
    fn test_chain_after_divide_by_zero_drops_operator() {
        let (m, log) = run("5/0+");
        assert_eq!(m.state(), State::Error);
        assert!(m.slots().operand.is_none());
        assert_eq!(m.display(), "Cannot Divide By 0!");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_operator_after_chain_with_empty_y_uses_zero() {
        let (m, log) = run("8*+");
        assert_eq!(m.state(), State::HaveOperand);
        assert!(log.is_empty());

        let (m, log) = run("2+3=*=");
        assert_eq!(m.display(), "0");
        assert_eq!(lines(&log).last().unwrap(), "5 * 0 = 0");
    }

    #[test]
    fn test_division_rounding_in_display() {
        let (m, _) = run("2/3=");
        assert_eq!(m.display(), "0.66666667");
    }

    #[test]
    fn test_log_normalizes_operands() {
        let (_, log) = run("1.50+0.=");
        assert_eq!(lines(&log), vec!["1.5 + 0 = 1.5"]);
    }

    // ===== ShowingResult tests =====

    #[test]
    fn test_showing_result_digit_starts_fresh() {
        let (m, _) = run("2+3=7");
        assert_eq!(m.state(), State::EnteringX);
        assert_eq!(m.display(), "7");
        assert!(m.slots().operand.is_none());
    }

    #[test]
    fn test_showing_result_decimal_starts_fresh() {
        let (m, _) = run("2+3=.");
        assert_eq!(m.state(), State::EnteringX);
        assert_eq!(m.slots().x.as_str(), "0.");
    }

    #[test]
    fn test_showing_result_operator_chains() {
        let (m, _) = run("2+3=-");
        assert_eq!(m.state(), State::EnteringY);
        assert_eq!(m.slots().x.as_str(), "5");
        assert_eq!(m.slots().operand, Some(Operation::Subtract));
        assert!(m.slots().y.is_empty());
        assert_eq!(m.display(), "5 -");
    }

    #[test]
    fn test_showing_result_ignores_other_tokens() {
        let (m, log) = run("2+3==del-/+");
        assert_eq!(m.state(), State::ShowingResult);
        assert_eq!(m.display(), "5");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_chain_from_negative_result() {
        let (m, _) = run("3-5=*2=");
        assert_eq!(m.display(), "-4");
    }

    #[test]
    fn test_overflowing_result_stays_well_formed() {
        let (m, log) = run(&format!("{}*9=-", "9".repeat(400)));
        assert_eq!(m.state(), State::EnteringY);
        assert!(Numeral::is_well_formed(m.slots().x.as_str()));
        assert_eq!(m.slots().x.value(), f64::MAX);
        assert_eq!(log.len(), 1);
        for line in lines(&log) {
            assert!(!line.contains("inf"), "non-finite text in {line}");
        }
    }

    // ===== Clear tests =====

    #[test]
    fn test_clear_reports_cleared() {
        let step = Machine::new().step(Token::Digit(4)).machine.step(Token::Clear);
        assert!(step.cleared);
        assert_eq!(step.machine, Machine::new());
    }

    #[test]
    fn test_clear_from_every_state() {
        for script in ["12", "12+", "12+3", "12+3=", "5/0="] {
            let (m, log) = run(&format!("{script}clr"));
            assert_eq!(m, Machine::new(), "clear after {script}");
            assert!(log.is_empty());
        }
    }

    // ===== Property-based tests =====

    fn token_strategy() -> impl Strategy<Value = Token> {
        prop::sample::select(Token::ALL.to_vec())
    }

    fn check_invariants(m: &Machine) -> Result<(), TestCaseError> {
        let slots = m.slots();
        prop_assert!(Numeral::is_well_formed(slots.x.as_str()));
        prop_assert!(Numeral::is_well_formed(slots.y.as_str()));
        let operand_allowed = matches!(
            m.state(),
            State::HaveOperand | State::EnteringY | State::ShowingResult
        );
        prop_assert!(slots.operand.is_none() || operand_allowed);
        let result_allowed = matches!(m.state(), State::ShowingResult | State::Error);
        prop_assert_eq!(slots.result.is_some(), result_allowed);
        prop_assert_eq!(
            m.state() == State::Error,
            slots.result == Some(Err(CalcError::DivideByZero))
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(tokens in prop::collection::vec(token_strategy(), 0..60)) {
            let mut m = Machine::new();
            for token in tokens {
                m = m.step(token).machine;
                check_invariants(&m)?;
            }
        }

        #[test]
        fn prop_clear_always_resets(tokens in prop::collection::vec(token_strategy(), 0..40)) {
            let mut m = Machine::new();
            for token in tokens {
                m = m.step(token).machine;
            }
            let step = m.step(Token::Clear);
            prop_assert!(step.cleared);
            prop_assert!(step.completed.is_none());
            prop_assert_eq!(step.machine, Machine::new());
        }

        #[test]
        fn prop_error_only_from_zero_divisor(tokens in prop::collection::vec(token_strategy(), 0..60)) {
            let mut m = Machine::new();
            for token in tokens {
                let was_error = m.is_error();
                let step = m.step(token);
                if step.machine.is_error() && !was_error {
                    let entry = step.completed.clone().unwrap();
                    prop_assert_eq!(entry.operand, Operation::Divide);
                    prop_assert_eq!(entry.y.as_str(), "0");
                }
                m = step.machine;
            }
        }

        #[test]
        fn prop_chain_equals_stepwise(a in 0u32..1000, b in 0u32..1000, c in 1u32..1000, op_idx in 0usize..4) {
            let op = Operation::ALL[op_idx].symbol();
            let (direct, _) = run(&format!("{a}+{b}{op}{c}="));
            let (stepped, _) = run(&format!("{a}+{b}={op}{c}="));
            prop_assert_eq!(direct.display(), stepped.display());
        }
    }
}
