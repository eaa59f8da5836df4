//! Event-driven state of the mortgage form.
//!
//! The form owns the raw field text, the chosen repayment type, one error
//! flag per field and the results panel. A UI binding forwards user actions
//! (edit, select, submit, clear) and renders whatever state results.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::amortization;
use crate::config::CalculatorConfig;
use crate::errors::Result;
use crate::format::CurrencyFormatter;
use crate::types::{Field, InputField, PaymentResult, RepaymentType};
use crate::validation::{check_selection, ValidationReport, Validator};

/// error flags shown next to each field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldErrors {
    pub amount: bool,
    pub term: bool,
    pub rate: bool,
    pub repayment_type: bool,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Amount => self.amount,
            Field::Term => self.term,
            Field::Rate => self.rate,
            Field::RepaymentType => self.repayment_type,
        }
    }

    pub fn set(&mut self, field: Field, flagged: bool) {
        match field {
            Field::Amount => self.amount = flagged,
            Field::Term => self.term = flagged,
            Field::Rate => self.rate = flagged,
            Field::RepaymentType => self.repayment_type = flagged,
        }
    }

    pub fn any(&self) -> bool {
        Field::ALL.iter().any(|field| self.get(*field))
    }
}

/// the results side of the form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsPanel {
    /// nothing calculated yet
    #[default]
    Empty,
    Complete {
        monthly_payment: String,
        total_payment: String,
    },
}

/// outcome of a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Calculated(PaymentResult),
    Rejected(ValidationReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub amount: String,
    pub term: String,
    pub rate: String,
    pub repayment_type: Option<RepaymentType>,
    pub errors: FieldErrors,
    pub results: ResultsPanel,
}

/// mortgage form bound to a validator and formatter
#[derive(Debug, Clone)]
pub struct MortgageForm {
    state: FormState,
    validator: Validator,
    formatter: CurrencyFormatter,
}

impl Default for MortgageForm {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl MortgageForm {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            state: FormState::default(),
            validator: Validator::from_config(config),
            formatter: CurrencyFormatter::from_config(config),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// user typed into a field
    ///
    /// The amount field is regrouped as it is typed. Only the edited field's
    /// error flag is cleared; the rest of the form is not revalidated.
    pub fn edit(&mut self, field: InputField, text: &str) {
        match field {
            InputField::Amount => self.state.amount = self.formatter.format_grouped_integer(text),
            InputField::Term => self.state.term = text.to_string(),
            InputField::Rate => self.state.rate = text.to_string(),
        }
        self.state.errors.set(field.into(), false);
    }

    /// user picked a repayment type; the type group is revalidated
    pub fn select(&mut self, repayment_type: RepaymentType) {
        self.state.repayment_type = Some(repayment_type);
        let valid = check_selection(self.state.repayment_type).is_ok();
        self.state.errors.set(Field::RepaymentType, !valid);
    }

    /// validate everything and calculate when the form is valid
    ///
    /// Every field's error flag is updated, not just the first failure. On
    /// success the results panel switches to the formatted amounts; on
    /// failure the panel is left as it was.
    pub fn submit(&mut self) -> Result<Submission> {
        let report = self.validator.validate_form(
            &self.state.amount,
            &self.state.term,
            &self.state.rate,
            self.state.repayment_type,
        );

        for field in Field::ALL {
            self.state.errors.set(field, !report.is_field_valid(field));
        }

        if !report.is_valid() {
            debug!(errors = report.errors().len(), "form has errors, not calculating");
            return Ok(Submission::Rejected(report));
        }

        let loan = report.into_loan_input()?;
        let result = amortization::calculate(&loan)?;

        let monthly_payment = self.formatter.format(result.monthly_payment);
        let total_payment = self.formatter.format(result.total_payment);
        info!(%monthly_payment, %total_payment, "displaying results");

        self.state.results = ResultsPanel::Complete {
            monthly_payment,
            total_payment,
        };

        Ok(Submission::Calculated(result))
    }

    /// reset fields, selection, error flags and results
    pub fn clear(&mut self) {
        self.state = FormState::default();
        debug!("form cleared");
    }
}
