use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{CalculatorError, Result};

/// calculator display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub currency: CurrencyConfig,
    pub number_format: NumberFormat,
}

/// currency rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub fraction_digits: u32,
}

/// separators used both when parsing input and when rendering amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "£".to_string(),
            fraction_digits: 2,
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
            decimal_separator: '.',
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::en_gb()
    }
}

impl CalculatorConfig {
    /// pounds sterling, comma grouping, two decimals
    pub fn en_gb() -> Self {
        Self {
            currency: CurrencyConfig::default(),
            number_format: NumberFormat::default(),
        }
    }

    /// load from a JSON document; missing keys fall back to en-GB
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let NumberFormat {
            grouping_separator,
            decimal_separator,
        } = self.number_format;

        if grouping_separator == decimal_separator {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("grouping and decimal separator are both '{grouping_separator}'"),
            });
        }

        for separator in [grouping_separator, decimal_separator] {
            if separator.is_ascii_digit() || matches!(separator, '-' | '+' | 'e' | 'E') {
                return Err(CalculatorError::InvalidConfiguration {
                    message: format!("'{separator}' cannot be used as a separator"),
                });
            }
        }

        if self.currency.fraction_digits > 8 {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!(
                    "fraction digits must be at most 8, got {}",
                    self.currency.fraction_digits
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_en_gb() {
        let config = CalculatorConfig::default();
        assert_eq!(config.currency.symbol, "£");
        assert_eq!(config.currency.fraction_digits, 2);
        assert_eq!(config.number_format.grouping_separator, ',');
        assert_eq!(config.number_format.decimal_separator, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CalculatorConfig::from_json(r#"{"currency": {"symbol": "€"}}"#).unwrap();
        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.currency.fraction_digits, 2);
        assert_eq!(config.number_format, NumberFormat::default());
    }

    #[test]
    fn test_rejects_clashing_separators() {
        let json = r#"{"number_format": {"grouping_separator": ".", "decimal_separator": "."}}"#;
        assert!(matches!(
            CalculatorConfig::from_json(json),
            Err(CalculatorError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_digit_separator() {
        let json = r#"{"number_format": {"grouping_separator": "1"}}"#;
        assert!(CalculatorConfig::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CalculatorConfig::from_json("{not json"),
            Err(CalculatorError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CalculatorConfig::from_file("/nonexistent/mortgage-calc.json"),
            Err(CalculatorError::Io(_))
        ));
    }
}
