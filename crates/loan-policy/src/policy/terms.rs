use serde::{Deserialize, Serialize};

use super::affordability::AffordabilitySnapshot;
use super::amortization;
use super::config::PolicyConfig;
use super::decision::{amount, format_rupees, PolicyFault};
use super::domain::Application;

/// Offer produced by the term solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
    pub conditions: Vec<String>,
}

/// Caps the requested principal by what the FOIR headroom can service.
pub fn solve(
    application: &Application,
    affordability: &AffordabilitySnapshot,
    risk_scale_factor: f64,
    config: &PolicyConfig,
) -> Result<LoanTerms, PolicyFault> {
    let requested = amount("requested_amount", application.requested_amount)?;
    let tenure = application.preferred_tenure;

    let ceiling_emi = affordability.adjusted_income * config.max_foir;
    let available_emi = (ceiling_emi - affordability.existing_obligations).max(0.0);

    let interest_rate = config.base_rate(tenure) * risk_scale_factor;
    let max_principal = amortization::max_principal(available_emi, interest_rate, tenure)?;

    let approved = requested.min(max_principal).min(config.max_loan_amount);
    if approved < config.min_loan_amount {
        return Err(PolicyFault::BelowMinimumLoan {
            amount: approved,
            minimum: config.min_loan_amount,
        });
    }

    let mut conditions = Vec::new();
    if approved < requested {
        conditions.push(format!(
            "Approved amount reduced from requested {} to {} based on affordability",
            format_rupees(requested),
            format_rupees(approved)
        ));
    }

    Ok(LoanTerms {
        amount: approved,
        interest_rate,
        tenure_months: tenure,
        conditions,
    })
}
