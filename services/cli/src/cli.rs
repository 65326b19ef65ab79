use crate::commands::{run_evaluate, run_rules, EvaluateArgs, RulesArgs};
use clap::{Parser, Subcommand};
use loan_policy::config::AppConfig;
use loan_policy::error::AppError;
use loan_policy::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "loan-policy",
    about = "Underwrite personal-loan applications against the credit policy",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one application against its bureau report
    Evaluate(EvaluateArgs),
    /// Print the thresholds and tables of the active policy version
    Rules(RulesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args, &config),
        Command::Rules(args) => run_rules(args, &config),
    }
}
