use chrono::NaiveDate;

use super::config::PolicyConfig;
use super::decision::RejectReason;
use super::domain::{Application, BureauReport};
use super::predicates::{count_recent, exceeds, meets_minimum, recency, within_inclusive, Recency};

/// Everything a gate may look at.
pub struct RuleContext<'a> {
    pub application: &'a Application,
    pub bureau: &'a BureauReport,
    pub config: &'a PolicyConfig,
    pub as_of: NaiveDate,
}

/// An eligibility gate. An empty result means the gate passed.
pub trait HardRejectRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason>;
}

/// Fixed, ordered list of gates. Every gate runs; findings keep gate order.
pub struct HardRejectChain {
    rules: Vec<Box<dyn HardRejectRule>>,
}

impl HardRejectChain {
    pub fn new(rules: Vec<Box<dyn HardRejectRule>>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MinimumIncome),
            Box::new(MinimumCreditScore),
            Box::new(AgeEligibility),
            Box::new(EmploymentStability),
            Box::new(BureauDefaults),
            Box::new(EnquiryVelocity),
            Box::new(DebtVelocity),
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let failed = rule.evaluate(ctx);
            if !failed.is_empty() {
                tracing::debug!(rule = rule.name(), count = failed.len(), "hard-reject gate failed");
            }
            findings.extend(failed);
        }
        findings
    }
}

impl Default for HardRejectChain {
    fn default() -> Self {
        Self::standard()
    }
}

pub struct MinimumIncome;

impl HardRejectRule for MinimumIncome {
    fn name(&self) -> &'static str {
        "minimum_income"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let income = ctx.application.monthly_income;
        let threshold = ctx.config.min_monthly_income;
        if meets_minimum(income, threshold) {
            return Vec::new();
        }
        vec![RejectReason::IncomeBelowThreshold { income, threshold }]
    }
}

pub struct MinimumCreditScore;

impl HardRejectRule for MinimumCreditScore {
    fn name(&self) -> &'static str {
        "minimum_credit_score"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let score = ctx.bureau.credit_score;
        let minimum = ctx.config.min_credit_score;
        if score >= minimum {
            return Vec::new();
        }
        vec![RejectReason::CreditScoreBelowMinimum { score, minimum }]
    }
}

pub struct AgeEligibility;

impl HardRejectRule for AgeEligibility {
    fn name(&self) -> &'static str {
        "age_eligibility"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let age = ctx.application.age;
        let (min, max) = (ctx.config.min_age, ctx.config.max_age);
        if within_inclusive(age, min, max) {
            return Vec::new();
        }
        vec![RejectReason::AgeOutsideRange { age, min, max }]
    }
}

pub struct EmploymentStability;

impl HardRejectRule for EmploymentStability {
    fn name(&self) -> &'static str {
        "employment_stability"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let employment_type = ctx.application.employment_type;
        let years = ctx.application.employment_years;
        let required = ctx.config.employment_policy(employment_type).min_years;
        if meets_minimum(years, required) {
            return Vec::new();
        }
        vec![RejectReason::InsufficientEmployment {
            years,
            required,
            employment_type,
        }]
    }
}

/// Derogatory accounts with a payment inside the lookback window.
pub struct BureauDefaults;

impl HardRejectRule for BureauDefaults {
    fn name(&self) -> &'static str {
        "bureau_defaults"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let window = ctx.config.default_lookback_days;
        ctx.bureau
            .accounts
            .iter()
            .filter(|account| account.status.is_derogatory())
            .filter_map(|account| {
                let raw = account.last_payment_date.as_deref()?;
                let account_type = account.account_type;
                match recency(raw, ctx.as_of, window) {
                    Recency::Recent => Some(RejectReason::RecentDefault { account_type }),
                    // Unreadable dates count against the applicant.
                    Recency::Unparsable => Some(RejectReason::UndatedDefault { account_type }),
                    Recency::Stale => None,
                }
            })
            .collect()
    }
}

pub struct EnquiryVelocity;

impl HardRejectRule for EnquiryVelocity {
    fn name(&self) -> &'static str {
        "enquiry_velocity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let window_days = ctx.config.enquiry_window_days;
        let count = count_recent(
            ctx.bureau.enquiries.iter().map(|enquiry| enquiry.date.as_str()),
            ctx.as_of,
            window_days,
        );
        if count <= ctx.config.max_recent_enquiries {
            return Vec::new();
        }
        vec![RejectReason::EnquiryVelocity { count, window_days }]
    }
}

pub struct DebtVelocity;

impl HardRejectRule for DebtVelocity {
    fn name(&self) -> &'static str {
        "debt_velocity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        let velocity = ctx.bureau.platform_data.debt_velocity_12m;
        if !exceeds(velocity, ctx.config.max_debt_velocity) {
            return Vec::new();
        }
        vec![RejectReason::DebtVelocity { velocity }]
    }
}
