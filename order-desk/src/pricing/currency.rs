//! Currency formatting
//!
//! The default format is Vietnamese đồng (no fractional unit, `.` for
//! thousands, trailing `₫`). Missing or non-finite amounts format as zero.

use rust_decimal::prelude::*;

use super::item_calculator::{finite_or_zero, to_decimal};

/// Display rules for money amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    /// Digits after the decimal separator
    pub fraction_digits: u32,
    /// `95.000 ₫` when true, `₫95.000` when false
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::vnd()
    }
}

impl CurrencyFormat {
    pub fn vnd() -> Self {
        Self {
            symbol: "₫".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            fraction_digits: 0,
            symbol_after: true,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Format an amount, rounding half away from zero
    pub fn format(&self, amount: Option<f64>) -> String {
        let amount = finite_or_zero(amount.unwrap_or_default());
        let (negative, digits) = match to_decimal(amount) {
            Some(value) => self.decimal_digits(value),
            None => self.f64_digits(amount),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut number = group_thousands(int_part, self.thousands_separator);
        if let Some(frac) = frac_part {
            number.push(self.decimal_separator);
            number.push_str(frac);
        }

        let sign = if negative { "-" } else { "" };
        if self.symbol_after {
            format!("{}{} {}", sign, number, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }

    fn decimal_digits(&self, value: Decimal) -> (bool, String) {
        let value = value
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = value.is_sign_negative() && !value.is_zero();

        let mut abs = value.abs();
        abs.rescale(self.fraction_digits);
        (negative, abs.to_string())
    }

    /// Amounts too large for Decimal are whole numbers in f64 anyway
    fn f64_digits(&self, value: f64) -> (bool, String) {
        let digits = format!("{:.*}", self.fraction_digits as usize, value.abs());
        (value < 0.0, digits)
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Format with the default currency format
pub fn format_currency(amount: Option<f64>) -> String {
    CurrencyFormat::default().format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_currency(Some(95_000.0)), "95.000 ₫");
        assert_eq!(format_currency(Some(1_234_567.0)), "1.234.567 ₫");
        assert_eq!(format_currency(Some(500.0)), "500 ₫");
    }

    #[test]
    fn test_missing_amount_formats_as_zero() {
        assert_eq!(format_currency(None), "0 ₫");
        assert_eq!(format_currency(Some(f64::NAN)), "0 ₫");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_currency(Some(-20_000.0)), "-20.000 ₫");
        // Rounds to zero, no "-0"
        assert_eq!(format_currency(Some(-0.4)), "0 ₫");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Some(1_499.5)), "1.500 ₫");
        assert_eq!(format_currency(Some(-1_499.5)), "-1.500 ₫");
    }

    #[test]
    fn test_custom_format_with_fraction_digits() {
        let euro = CurrencyFormat {
            symbol: "€".to_string(),
            thousands_separator: ',',
            decimal_separator: '.',
            fraction_digits: 2,
            symbol_after: false,
        };
        assert_eq!(euro.format(Some(1_234.5)), "€1,234.50");
        assert_eq!(euro.format(None), "€0.00");
    }

    #[test]
    fn test_with_symbol() {
        let fmt = CurrencyFormat::vnd().with_symbol("VND");
        assert_eq!(fmt.format(Some(15_000.0)), "15.000 VND");
    }

    #[test]
    fn test_amount_beyond_decimal_range() {
        // 2^97, exactly representable
        let huge = 2f64.powi(97);
        assert_eq!(
            format_currency(Some(huge)),
            "158.456.325.028.528.675.187.087.900.672 ₫"
        );
        assert_eq!(
            format_currency(Some(-huge)),
            "-158.456.325.028.528.675.187.087.900.672 ₫"
        );
    }
}
