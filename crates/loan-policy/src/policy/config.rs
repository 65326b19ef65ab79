use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EmploymentType, IncomeSourceType};
use super::profile::CreditBand;

/// Minimum tenure in the job and the haircut applied to declared income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmploymentPolicy {
    pub min_years: f64,
    pub income_multiplier: f64,
}

/// Score cut-offs for the credit bands; anything below `fair` is POOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub excellent: u16,
    pub good: u16,
    pub fair: u16,
}

/// Inputs to the risk-scale factor applied on top of the base rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScalePolicy {
    pub band_factors: BTreeMap<CreditBand, f64>,
    pub high_utilization: f64,
    pub high_utilization_adjustment: f64,
    pub low_utilization: f64,
    pub low_utilization_adjustment: f64,
    pub government_adjustment: f64,
    pub self_employed_adjustment: f64,
    pub floor: f64,
    pub ceiling: f64,
}

/// Immutable credit policy tables handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub version: String,
    pub min_monthly_income: f64,
    pub min_credit_score: u16,
    pub min_age: u8,
    pub max_age: u8,
    pub max_foir: f64,
    pub min_loan_amount: f64,
    pub max_loan_amount: f64,
    pub default_lookback_days: i64,
    pub enquiry_window_days: i64,
    pub max_recent_enquiries: usize,
    pub max_debt_velocity: f64,
    pub employment: BTreeMap<EmploymentType, EmploymentPolicy>,
    pub fallback_employment: EmploymentPolicy,
    pub income_weights: BTreeMap<IncomeSourceType, f64>,
    pub fallback_income_weight: f64,
    pub base_rates: BTreeMap<u32, f64>,
    pub fallback_base_rate: f64,
    pub bands: BandThresholds,
    pub risk: RiskScalePolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let employment = BTreeMap::from([
            (EmploymentType::Government, employment_rule(1.0, 1.0)),
            (EmploymentType::PrivateMnc, employment_rule(2.0, 0.95)),
            (EmploymentType::PrivateDomestic, employment_rule(2.0, 0.9)),
            (EmploymentType::SelfEmployed, employment_rule(3.0, 0.8)),
            (EmploymentType::Business, employment_rule(3.0, 0.75)),
        ]);

        let income_weights = BTreeMap::from([
            (IncomeSourceType::Salary, 1.0),
            (IncomeSourceType::Pension, 0.9),
            (IncomeSourceType::Rental, 0.8),
            (IncomeSourceType::Business, 0.7),
            (IncomeSourceType::Other, 0.6),
        ]);

        let base_rates = BTreeMap::from([(12, 11.5), (24, 12.0), (36, 12.5), (48, 13.0), (60, 13.5)]);

        let band_factors = BTreeMap::from([
            (CreditBand::Excellent, 0.8),
            (CreditBand::Good, 0.9),
            (CreditBand::Fair, 1.0),
            (CreditBand::Poor, 1.1),
        ]);

        Self {
            version: "1.0".to_string(),
            min_monthly_income: 25_000.0,
            min_credit_score: 650,
            min_age: 21,
            max_age: 65,
            max_foir: 0.55,
            min_loan_amount: 50_000.0,
            max_loan_amount: 2_000_000.0,
            default_lookback_days: 730,
            enquiry_window_days: 90,
            max_recent_enquiries: 5,
            max_debt_velocity: 2.0,
            employment,
            fallback_employment: employment_rule(2.0, 0.9),
            income_weights,
            fallback_income_weight: 0.6,
            base_rates,
            fallback_base_rate: 12.0,
            bands: BandThresholds {
                excellent: 750,
                good: 700,
                fair: 650,
            },
            risk: RiskScalePolicy {
                band_factors,
                high_utilization: 0.8,
                high_utilization_adjustment: 0.1,
                low_utilization: 0.3,
                low_utilization_adjustment: -0.05,
                government_adjustment: -0.05,
                self_employed_adjustment: 0.05,
                floor: 0.7,
                ceiling: 1.2,
            },
        }
    }
}

fn employment_rule(min_years: f64, income_multiplier: f64) -> EmploymentPolicy {
    EmploymentPolicy {
        min_years,
        income_multiplier,
    }
}

impl PolicyConfig {
    pub fn employment_policy(&self, employment_type: EmploymentType) -> EmploymentPolicy {
        self.employment
            .get(&employment_type)
            .copied()
            .unwrap_or(self.fallback_employment)
    }

    pub fn income_weight(&self, source_type: IncomeSourceType) -> f64 {
        self.income_weights
            .get(&source_type)
            .copied()
            .unwrap_or(self.fallback_income_weight)
    }

    /// Annual base rate in percent for a tenure in months.
    pub fn base_rate(&self, tenure_months: u32) -> f64 {
        self.base_rates
            .get(&tenure_months)
            .copied()
            .unwrap_or(self.fallback_base_rate)
    }

    pub fn band_factor(&self, band: CreditBand) -> f64 {
        self.risk
            .band_factors
            .get(&band)
            .copied()
            .unwrap_or(self.risk.ceiling)
    }

    /// Snapshot of the thresholds and tables, shaped for rule disclosure.
    pub fn rules_summary(&self) -> PolicyRules {
        let employment_stability = self
            .employment
            .iter()
            .map(|(kind, policy)| (*kind, policy.min_years))
            .collect();
        let employment_multipliers = self
            .employment
            .iter()
            .map(|(kind, policy)| (*kind, policy.income_multiplier))
            .collect();

        PolicyRules {
            version: self.version.clone(),
            hard_reject_rules: HardRejectThresholds {
                minimum_income: self.min_monthly_income,
                minimum_credit_score: self.min_credit_score,
                age_range: RangeView {
                    min: f64::from(self.min_age),
                    max: f64::from(self.max_age),
                },
                employment_stability,
                default_lookback_days: self.default_lookback_days,
                enquiry_window_days: self.enquiry_window_days,
                max_recent_enquiries: self.max_recent_enquiries,
                max_debt_velocity: self.max_debt_velocity,
            },
            waterfall_policy: WaterfallTables {
                max_foir: self.max_foir,
                loan_amount_range: RangeView {
                    min: self.min_loan_amount,
                    max: self.max_loan_amount,
                },
                risk_scale_factors: self.risk.band_factors.clone(),
                risk_scale_bounds: RangeView {
                    min: self.risk.floor,
                    max: self.risk.ceiling,
                },
                base_interest_rates: self.base_rates.clone(),
                employment_multipliers,
                income_priority_multipliers: self.income_weights.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeView {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardRejectThresholds {
    pub minimum_income: f64,
    pub minimum_credit_score: u16,
    pub age_range: RangeView,
    pub employment_stability: BTreeMap<EmploymentType, f64>,
    pub default_lookback_days: i64,
    pub enquiry_window_days: i64,
    pub max_recent_enquiries: usize,
    pub max_debt_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallTables {
    pub max_foir: f64,
    pub loan_amount_range: RangeView,
    pub risk_scale_factors: BTreeMap<CreditBand, f64>,
    pub risk_scale_bounds: RangeView,
    pub base_interest_rates: BTreeMap<u32, f64>,
    pub employment_multipliers: BTreeMap<EmploymentType, f64>,
    pub income_priority_multipliers: BTreeMap<IncomeSourceType, f64>,
}

/// Published view of the active policy version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRules {
    pub version: String,
    pub hard_reject_rules: HardRejectThresholds,
    pub waterfall_policy: WaterfallTables,
}
