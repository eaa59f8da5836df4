use thiserror::Error;

use crate::types::Field;

/// reason a single form field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("this field is required")]
    Empty,

    #[error("not a number: {value}")]
    NotANumber {
        value: String,
    },

    #[error("must be greater than zero: {value}")]
    NotPositive {
        value: String,
    },

    #[error("select a mortgage type")]
    NoSelection,
}

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("invalid {field}: {source}")]
    InvalidField {
        field: Field,
        #[source]
        source: FieldError,
    },

    #[error("form has {count} invalid field(s)")]
    InvalidForm {
        count: usize,
    },

    #[error("invalid loan: {message}")]
    InvalidLoan {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
