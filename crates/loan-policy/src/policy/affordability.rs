use serde::{Deserialize, Serialize};

use super::amortization;
use super::config::PolicyConfig;
use super::decision::{amount, PolicyFault};
use super::domain::{AccountStatus, Application, BureauReport};
use super::predicates::ratio;

/// Ratio reported when there is no usable income, so the ceiling always trips.
const NO_INCOME_FOIR: f64 = 1.0;

/// Inputs and result of the FOIR computation, reused by the term solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilitySnapshot {
    pub adjusted_income: f64,
    pub existing_obligations: f64,
    pub base_rate: f64,
    pub proposed_emi: f64,
    pub foir: f64,
}

impl AffordabilitySnapshot {
    pub fn exceeds(&self, max_foir: f64) -> bool {
        self.foir > max_foir
    }
}

/// Monthly income after source weighting and the employment haircut.
pub fn adjusted_income(
    application: &Application,
    config: &PolicyConfig,
) -> Result<f64, PolicyFault> {
    let multiplier = config
        .employment_policy(application.employment_type)
        .income_multiplier;

    if application.income_sources.is_empty() {
        let income = amount("monthly_income", application.monthly_income)?;
        return Ok(income * multiplier);
    }

    let mut weighted = 0.0;
    for source in &application.income_sources {
        let value = amount("income_sources.amount", source.amount)?;
        weighted += value * config.income_weight(source.source_type);
    }

    Ok(weighted * multiplier)
}

/// Sum of instalments on accounts still being serviced.
pub fn existing_obligations(bureau: &BureauReport) -> Result<f64, PolicyFault> {
    let mut total = 0.0;
    for account in &bureau.accounts {
        if account.status == AccountStatus::Active {
            total += amount("accounts.emi_amount", account.emi_amount)?;
        }
    }
    Ok(total)
}

pub fn assess(
    application: &Application,
    bureau: &BureauReport,
    config: &PolicyConfig,
) -> Result<AffordabilitySnapshot, PolicyFault> {
    let adjusted_income = adjusted_income(application, config)?;
    let existing_obligations = existing_obligations(bureau)?;

    let base_rate = config.base_rate(application.preferred_tenure);
    let requested = amount("requested_amount", application.requested_amount)?;
    let proposed_emi = amortization::emi(requested, base_rate, application.preferred_tenure)?;

    let foir =
        ratio(existing_obligations + proposed_emi, adjusted_income).unwrap_or(NO_INCOME_FOIR);

    Ok(AffordabilitySnapshot {
        adjusted_income,
        existing_obligations,
        base_rate,
        proposed_emi,
        foir,
    })
}
