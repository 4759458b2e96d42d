//! The four binary operations behind the operator keys

use serde::{Deserialize, Serialize};

use crate::core::numeral::saturate;
use crate::core::{CalcError, CalcResult};

/// Maximum number of fractional digits kept by a division
pub const DECIMAL_PLACE_MAX: usize = 8;

/// Display text for a division by zero
pub const DIVIDE_BY_ZERO_TEXT: &str = "Cannot Divide By 0!";

/// Operator held in the operand slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol used on the wire and on the display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Looks up an operation by its symbol
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Applies the operation to `x` and `y`
    ///
    /// Results past `f64` range saturate at the largest finite value.
    pub fn apply(self, x: f64, y: f64) -> CalcResult<f64> {
        let outcome = match self {
            Self::Add => Ok(x + y),
            Self::Subtract => Ok(x - y),
            Self::Multiply => Ok(x * y),
            Self::Divide => divide(x, y),
        };
        outcome.map(saturate)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Division rounded to [`DECIMAL_PLACE_MAX`] fractional digits.
///
/// The quotient is rendered at fixed precision and parsed back, so
/// trailing zeros disappear (`6 / 4` is `1.5`, not `1.50000000`).
fn divide(x: f64, y: f64) -> CalcResult<f64> {
    if y == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    let quotient = x / y;
    let fixed = format!("{quotient:.prec$}", prec = DECIMAL_PLACE_MAX);
    Ok(fixed.parse().unwrap_or(quotient))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== Operation enum tests =====

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "-");
        assert_eq!(Operation::Multiply.symbol(), "*");
        assert_eq!(Operation::Divide.symbol(), "/");
    }

    #[test]
    fn test_operation_from_symbol() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol("%"), None);
        assert_eq!(Operation::from_symbol("x"), None);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", Operation::Multiply), "*");
    }

    // ===== Arithmetic tests =====

    #[test]
    fn test_add() {
        assert_eq!(Operation::Add.apply(12.0, 3.0), Ok(15.0));
        assert_eq!(Operation::Add.apply(-2.0, 5.0), Ok(3.0));
    }

    #[test]
    fn test_add_keeps_float_representation() {
        let sum = Operation::Add.apply(0.1, 0.2).unwrap();
        assert_eq!(sum, 0.1 + 0.2);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(Operation::Subtract.apply(3.0, 5.0), Ok(-2.0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Operation::Multiply.apply(5.0, 4.0), Ok(20.0));
        assert_eq!(Operation::Multiply.apply(-2.0, 3.0), Ok(-6.0));
    }

    #[test]
    fn test_divide_exact() {
        assert_eq!(Operation::Divide.apply(6.0, 4.0), Ok(1.5));
    }

    #[test]
    fn test_divide_rounds_to_eight_places() {
        assert_eq!(Operation::Divide.apply(1.0, 3.0), Ok(0.33333333));
        assert_eq!(Operation::Divide.apply(2.0, 3.0), Ok(0.66666667));
    }

    #[test]
    fn test_divide_tiny_quotient_rounds_to_zero() {
        assert_eq!(Operation::Divide.apply(1.0, 1e9), Ok(0.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, 0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_divide_by_negative_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, -0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(Operation::Multiply.apply(f64::MAX, 9.0), Ok(f64::MAX));
        assert_eq!(Operation::Subtract.apply(f64::MIN, f64::MAX), Ok(f64::MIN));
        assert_eq!(Operation::Divide.apply(f64::MAX, 0.5), Ok(f64::MAX));
    }

    // ===== Property-based tests =====

    proptest! {
        #[test]
        fn prop_only_division_by_zero_fails(x in -1e9f64..1e9f64, op_idx in 0usize..4) {
            let op = Operation::ALL[op_idx];
            let result = op.apply(x, 0.0);
            prop_assert_eq!(result.is_err(), op == Operation::Divide);
        }

        #[test]
        fn prop_division_has_at_most_eight_decimals(x in -1e6f64..1e6f64, y in 1.0f64..1e6f64) {
            let q = Operation::Divide.apply(x, y).unwrap();
            let text = crate::core::format_number(q);
            let decimals = text.split('.').nth(1).map_or(0, str::len);
            prop_assert!(decimals <= DECIMAL_PLACE_MAX, "{} has too many decimals", text);
        }
    }
}
