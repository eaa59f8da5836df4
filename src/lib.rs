pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod form;
pub mod format;
pub mod types;
pub mod validation;

// re-export key types
pub use amortization::{calculate, AmortizationCalculator};
pub use config::{CalculatorConfig, CurrencyConfig, NumberFormat};
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, FieldError, Result};
pub use form::{FieldErrors, FormState, MortgageForm, ResultsPanel, Submission};
pub use format::{format_currency, format_grouped_integer, CurrencyFormatter};
pub use types::{Field, InputField, LoanInput, PaymentResult, RepaymentType};
pub use validation::{
    check_field, check_selection, validate_field, validate_form, validate_selection,
    ValidationReport, Validator,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
