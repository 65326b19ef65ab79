use serde::{Deserialize, Serialize};

use super::config::PolicyConfig;
use super::domain::EmploymentType;
use super::profile::CreditAssessment;

/// Multiplier applied to the tenure base rate, with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScale {
    pub base: f64,
    pub adjustment: f64,
    pub factor: f64,
}

pub fn resolve(
    assessment: &CreditAssessment,
    employment_type: EmploymentType,
    config: &PolicyConfig,
) -> RiskScale {
    let policy = &config.risk;
    let base = config.band_factor(assessment.band);

    let mut adjustment = 0.0;

    if assessment.credit_utilization > policy.high_utilization {
        adjustment += policy.high_utilization_adjustment;
    } else if assessment.credit_utilization < policy.low_utilization {
        adjustment += policy.low_utilization_adjustment;
    }

    match employment_type {
        EmploymentType::Government => adjustment += policy.government_adjustment,
        EmploymentType::SelfEmployed | EmploymentType::Business => {
            adjustment += policy.self_employed_adjustment
        }
        _ => {}
    }

    RiskScale {
        base,
        adjustment,
        factor: (base + adjustment).min(policy.ceiling).max(policy.floor),
    }
}
