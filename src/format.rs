use crate::config::CalculatorConfig;
use crate::decimal::Money;

/// renders amounts for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    grouping_separator: char,
    decimal_separator: char,
    fraction_digits: u32,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::from_config(&CalculatorConfig::en_gb())
    }
}

impl CurrencyFormatter {
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self {
            symbol: config.currency.symbol.clone(),
            grouping_separator: config.number_format.grouping_separator,
            decimal_separator: config.number_format.decimal_separator,
            fraction_digits: config.currency.fraction_digits,
        }
    }

    /// `£1,234.50`: symbol, grouped integer part, fixed fraction digits
    pub fn format(&self, amount: Money) -> String {
        let rounded = amount.round_to_minor(self.fraction_digits).as_decimal();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let plain = format!("{:.*}", self.fraction_digits as usize, rounded.abs());
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut out = String::with_capacity(plain.len() + self.symbol.len() + 8);
        out.push_str(sign);
        out.push_str(&self.symbol);
        out.push_str(&group_digits(integer, self.grouping_separator));
        if !fraction.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// reformat a whole-number field as it is typed
    ///
    /// Non-digits are dropped and leading zeros collapse, so `"0200000x"`
    /// becomes `"200,000"`. An input with no digits becomes empty.
    pub fn format_grouped_integer(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return String::new();
        }

        let significant = digits.trim_start_matches('0');
        let significant = if significant.is_empty() { "0" } else { significant };
        group_digits(significant, self.grouping_separator)
    }
}

/// format with the default en-GB pounds formatter
pub fn format_currency(amount: Money) -> String {
    CurrencyFormatter::default().format(amount)
}

/// reformat an amount field with the default en-GB grouping
pub fn format_grouped_integer(raw: &str) -> String {
    CurrencyFormatter::default().format_grouped_integer(raw)
}

fn group_digits(digits: &str, separator: char) -> String {
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
