use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use mortgage_calc::{
    CalculatorConfig, CalculatorError, InputField, MortgageForm, RepaymentType, ResultsPanel,
    Submission,
};

/// Mortgage repayment calculator
#[derive(Parser)]
#[command(name = "mortgage-calc", version, about = "Mortgage repayment calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    output: OutputFormat,

    /// JSON file with currency and number format settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the inputs and calculate monthly and total repayments
    Calculate(CalculateArgs),
}

#[derive(clap::Args)]
struct CalculateArgs {
    /// Mortgage amount, grouping separators allowed (e.g. 200,000)
    #[arg(long, default_value = "")]
    amount: String,

    /// Mortgage term in years
    #[arg(long, default_value = "")]
    term: String,

    /// Annual interest rate in percent
    #[arg(long, default_value = "")]
    rate: String,

    /// Mortgage type
    #[arg(long = "type", value_enum)]
    repayment_type: Option<TypeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Repayment,
    InterestOnly,
}

impl From<TypeArg> for RepaymentType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Repayment => RepaymentType::Repayment,
            TypeArg::InterestOnly => RepaymentType::InterestOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// what the command prints and its exit status
#[derive(Debug, Default)]
struct Outcome {
    code: i32,
    stdout: Vec<String>,
    stderr: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mortgage_calc=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(outcome) => {
            for line in &outcome.stdout {
                println!("{line}");
            }
            for line in &outcome.stderr {
                eprintln!("{line}");
            }
            outcome.code
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    process::exit(code);
}

fn run(cli: &Cli) -> Result<Outcome, CalculatorError> {
    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };

    match &cli.command {
        Commands::Calculate(args) => run_calculate(args, &config, cli.output),
    }
}

fn run_calculate(
    args: &CalculateArgs,
    config: &CalculatorConfig,
    output: OutputFormat,
) -> Result<Outcome, CalculatorError> {
    let mut form = MortgageForm::new(config);
    form.edit(InputField::Amount, &args.amount);
    form.edit(InputField::Term, &args.term);
    form.edit(InputField::Rate, &args.rate);
    if let Some(repayment_type) = args.repayment_type {
        form.select(repayment_type.into());
    }

    let mut outcome = Outcome::default();

    match form.submit()? {
        Submission::Calculated(result) => {
            let ResultsPanel::Complete {
                monthly_payment,
                total_payment,
            } = &form.state().results
            else {
                return Err(CalculatorError::CalculationError {
                    message: "results were not rendered".to_string(),
                });
            };

            match output {
                OutputFormat::Json => {
                    let digits = config.currency.fraction_digits;
                    let value = json!({
                        "valid": true,
                        "monthly_payment": result.monthly_payment.round_to_minor(digits),
                        "total_payment": result.total_payment.round_to_minor(digits),
                        "display": {
                            "monthly_payment": monthly_payment,
                            "total_payment": total_payment,
                        },
                    });
                    outcome.stdout.push(serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Text => {
                    outcome.stdout.push(format!("Your monthly repayments: {monthly_payment}"));
                    outcome.stdout.push(format!("Total you'll repay over the term: {total_payment}"));
                }
            }
        }
        Submission::Rejected(report) => {
            outcome.code = 1;
            match output {
                OutputFormat::Json => {
                    let errors: Vec<_> = report
                        .errors()
                        .into_iter()
                        .map(|(field, error)| json!({ "field": field, "message": error.to_string() }))
                        .collect();
                    let value = json!({ "valid": false, "errors": errors });
                    outcome.stdout.push(serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Text => {
                    for error in report.into_errors() {
                        outcome.stderr.push(format!("error: {error}"));
                    }
                }
            }
        }
    }

    Ok(outcome)
}
