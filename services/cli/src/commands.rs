use chrono::{Local, NaiveDate};
use clap::Args;
use loan_policy::config::{load_policy_file, AppConfig};
use loan_policy::error::AppError;
use loan_policy::{Application, BureauReport, PolicyConfig, PolicyEngine, PolicyResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Loan application JSON
    #[arg(long)]
    pub(crate) application: PathBuf,
    /// Credit bureau report JSON
    #[arg(long)]
    pub(crate) bureau: PathBuf,
    /// Alternate policy version (overrides LOAN_POLICY_PATH)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Evaluation date for recency windows (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Emit single-line JSON
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Alternate policy version (overrides LOAN_POLICY_PATH)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Emit single-line JSON
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let result = evaluate(&args, config)?;
    println!("{}", render(&result, args.compact)?);
    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs, config: &AppConfig) -> Result<(), AppError> {
    let policy = resolve_policy(args.policy.as_deref(), config)?;
    let rules = PolicyEngine::new(policy).rules();
    println!("{}", render(&rules, args.compact)?);
    Ok(())
}

fn evaluate(args: &EvaluateArgs, config: &AppConfig) -> Result<PolicyResult, AppError> {
    let application: Application = read_json(&args.application)?;
    let bureau: BureauReport = read_json(&args.bureau)?;
    let engine = PolicyEngine::new(resolve_policy(args.policy.as_deref(), config)?);
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let result = engine.evaluate_as_of(&application, &bureau, as_of);
    info!(
        application = %args.application.display(),
        version = %engine.config().version,
        approved_amount = result.decision.approved_amount(),
        summary = %result.decision.summary(),
        "evaluation rendered"
    );
    Ok(result)
}

fn resolve_policy(path: Option<&Path>, config: &AppConfig) -> Result<PolicyConfig, AppError> {
    match path {
        Some(path) => Ok(load_policy_file(path)?),
        None => Ok(config.policy()?),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_json(&raw, path)
}

fn parse_json<T: DeserializeOwned>(raw: &str, path: &Path) -> Result<T, AppError> {
    serde_json::from_str(raw).map_err(|source| AppError::input(path, source))
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, AppError> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.map_err(AppError::Output)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
