//! Numeral slot text and its editing rules
//!
//! A numeral is kept as the text the user typed, not as a float, so that
//! partial input like `0.` or `1.50` survives until it is evaluated.
//! Every edit keeps the text inside `-?\d*\.?\d*`.

use serde::{Deserialize, Serialize};

/// Text of a numeral slot (X or Y)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeral(String);

impl Numeral {
    /// The empty slot
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// The reset value of the X slot
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// A numeral holding a computed value in shortest form
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self(format_number(value))
    }

    /// Parses numeral text, rejecting anything outside `-?\d*\.?\d*`
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::is_well_formed(text).then(|| Self(text.to_string()))
    }

    /// Returns true if `text` matches `-?\d*\.?\d*`
    #[must_use]
    pub fn is_well_formed(text: &str) -> bool {
        let unsigned = text.strip_prefix('-').unwrap_or(text);
        let mut parts = unsigned.splitn(2, '.');
        let int_ok = parts
            .next()
            .is_some_and(|p| p.bytes().all(|b| b.is_ascii_digit()));
        let frac_ok = parts
            .next()
            .map_or(true, |p| p.bytes().all(|b| b.is_ascii_digit()));
        int_ok && frac_ok
    }

    /// Returns the slot text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True while the slot still shows its placeholder (`0` or nothing)
    fn is_blank(&self) -> bool {
        self.0.is_empty() || self.0 == "0"
    }

    /// Numeric value of the text; an empty slot counts as zero.
    ///
    /// Text beyond `f64` range saturates to the largest finite value.
    #[must_use]
    pub fn value(&self) -> f64 {
        saturate(self.0.parse().unwrap_or(0.0))
    }

    /// Appends a digit, replacing a blank slot
    pub fn push_digit(&mut self, digit: u8) {
        let ch = char::from(b'0' + digit.min(9));
        if self.is_blank() {
            self.0.clear();
        }
        self.0.push(ch);
    }

    /// Appends a decimal point; a blank slot becomes `0.`.
    ///
    /// Ignored when the text already has a decimal point.
    pub fn push_decimal(&mut self) {
        if self.0.contains('.') {
            return;
        }
        if self.is_blank() {
            self.0 = "0.".to_string();
        } else {
            self.0.push('.');
        }
    }

    /// Drops the last character.
    ///
    /// Single characters and negative numerals reset to `0`; an empty slot
    /// stays empty.
    pub fn delete_last(&mut self) {
        if self.0.is_empty() {
            return;
        }
        if self.0.len() > 1 && !self.0.starts_with('-') {
            self.0.pop();
        } else {
            self.0 = "0".to_string();
        }
    }

    /// Toggles the sign. Zero-valued text (`0`, `0.`, `0.00`) is left alone.
    pub fn negate(&mut self) {
        if self.0.is_empty() {
            return;
        }
        let value = self.value();
        if value > 0.0 {
            self.0.insert(0, '-');
        } else if value < 0.0 {
            self.0.remove(0);
        }
    }
}

impl std::fmt::Display for Numeral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats a value in its shortest numeral form.
///
/// No exponent and no trailing zeros; negative zero prints as `0`.
/// Infinities print as the largest finite value of their sign.
#[must_use]
pub fn format_number(value: f64) -> String {
    let value = saturate(value);
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Clamps to the finite range so every value has a numeral form
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numeral(text: &str) -> Numeral {
        Numeral::parse(text).unwrap()
    }

    // ===== Construction tests =====

    #[test]
    fn test_zero_and_empty() {
        assert_eq!(Numeral::zero().as_str(), "0");
        assert!(Numeral::empty().is_empty());
        assert_eq!(Numeral::default(), Numeral::empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Numeral::parse("1.2.3").is_none());
        assert!(Numeral::parse("--1").is_none());
        assert!(Numeral::parse("1-").is_none());
        assert!(Numeral::parse("1e5").is_none());
        assert!(Numeral::parse("-").is_some());
        assert!(Numeral::parse("").is_some());
        assert!(Numeral::parse("-0.50").is_some());
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Numeral::from_value(15.0).as_str(), "15");
        assert_eq!(Numeral::from_value(-0.5).as_str(), "-0.5");
    }

    // ===== Digit and decimal tests =====

    #[test]
    fn test_push_digit_replaces_zero() {
        let mut n = Numeral::zero();
        n.push_digit(7);
        assert_eq!(n.as_str(), "7");
    }

    #[test]
    fn test_push_digit_replaces_empty() {
        let mut n = Numeral::empty();
        n.push_digit(3);
        assert_eq!(n.as_str(), "3");
    }

    #[test]
    fn test_push_digit_appends() {
        let mut n = numeral("1");
        n.push_digit(2);
        assert_eq!(n.as_str(), "12");
    }

    #[test]
    fn test_push_zero_onto_zero() {
        let mut n = Numeral::zero();
        n.push_digit(0);
        n.push_digit(0);
        assert_eq!(n.as_str(), "0");
    }

    #[test]
    fn test_push_decimal_on_blank() {
        let mut n = Numeral::zero();
        n.push_decimal();
        assert_eq!(n.as_str(), "0.");

        let mut n = Numeral::empty();
        n.push_decimal();
        assert_eq!(n.as_str(), "0.");
    }

    #[test]
    fn test_push_decimal_ignored_twice() {
        let mut n = numeral("1");
        n.push_decimal();
        n.push_decimal();
        n.push_digit(5);
        assert_eq!(n.as_str(), "1.5");
    }

    #[test]
    fn test_digit_after_leading_decimal() {
        let mut n = Numeral::zero();
        n.push_decimal();
        n.push_digit(0);
        n.push_digit(5);
        assert_eq!(n.as_str(), "0.05");
    }

    // ===== Delete tests =====

    #[test]
    fn test_delete_last() {
        let mut n = numeral("123");
        n.delete_last();
        assert_eq!(n.as_str(), "12");
    }

    #[test]
    fn test_delete_single_char_resets() {
        let mut n = numeral("7");
        n.delete_last();
        assert_eq!(n.as_str(), "0");
    }

    #[test]
    fn test_delete_negative_resets() {
        let mut n = numeral("-95");
        n.delete_last();
        assert_eq!(n.as_str(), "0");
    }

    #[test]
    fn test_delete_empty_is_noop() {
        let mut n = Numeral::empty();
        n.delete_last();
        assert!(n.is_empty());
    }

    #[test]
    fn test_delete_decimal_point() {
        let mut n = numeral("4.");
        n.delete_last();
        assert_eq!(n.as_str(), "4");
    }

    // ===== Negate tests =====

    #[test]
    fn test_negate_toggles() {
        let mut n = numeral("9");
        n.negate();
        assert_eq!(n.as_str(), "-9");
        n.negate();
        assert_eq!(n.as_str(), "9");
    }

    #[test]
    fn test_negate_zero_is_noop() {
        for text in ["0", "0.", "0.00"] {
            let mut n = numeral(text);
            n.negate();
            assert_eq!(n.as_str(), text);
        }
    }

    #[test]
    fn test_negate_fraction() {
        let mut n = numeral("0.5");
        n.negate();
        assert_eq!(n.as_str(), "-0.5");
    }

    #[test]
    fn test_negate_empty_is_noop() {
        let mut n = Numeral::empty();
        n.negate();
        assert!(n.is_empty());
    }

    // ===== Value and formatting tests =====

    #[test]
    fn test_value() {
        assert_eq!(numeral("12").value(), 12.0);
        assert_eq!(numeral("0.").value(), 0.0);
        assert_eq!(numeral("-1.50").value(), -1.5);
        assert_eq!(Numeral::empty().value(), 0.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.33333333), "0.33333333");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_value_saturates_past_f64_range() {
        let huge = numeral(&"9".repeat(400));
        assert_eq!(huge.value(), f64::MAX);
        assert_eq!(numeral(&format!("-{}", "9".repeat(400))).value(), f64::MIN);
    }

    #[test]
    fn test_format_number_non_finite_is_well_formed() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let text = format_number(value);
            assert!(Numeral::is_well_formed(&text), "malformed {text}");
        }
        assert_eq!(format_number(f64::NAN), "0");
        assert!(format_number(f64::NEG_INFINITY).starts_with("-1797"));
    }

    // ===== Property-based tests =====

    #[derive(Debug, Clone, Copy)]
    enum Edit {
        Digit(u8),
        Decimal,
        Delete,
        Negate,
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0u8..=9).prop_map(Edit::Digit),
            Just(Edit::Decimal),
            Just(Edit::Delete),
            Just(Edit::Negate),
        ]
    }

    proptest! {
        #[test]
        fn prop_edits_keep_numeral_well_formed(edits in prop::collection::vec(edit_strategy(), 0..40)) {
            let mut n = Numeral::zero();
            for edit in edits {
                match edit {
                    Edit::Digit(d) => n.push_digit(d),
                    Edit::Decimal => n.push_decimal(),
                    Edit::Delete => n.delete_last(),
                    Edit::Negate => n.negate(),
                }
                prop_assert!(Numeral::is_well_formed(n.as_str()), "malformed: {}", n);
                prop_assert!(n.as_str().matches('.').count() <= 1);
            }
        }

        #[test]
        fn prop_format_number_is_well_formed(v in -1e12f64..1e12f64) {
            prop_assert!(Numeral::is_well_formed(&format_number(v)));
        }
    }
}
