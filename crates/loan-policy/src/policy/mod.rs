//! Credit policy engine: hard-reject gates followed by the affordability,
//! credit-profile, risk-scale and term-solving waterfall.
//!
//! The engine is a pure function of an [`Application`] and a [`BureauReport`]
//! (plus the evaluation date). It always returns a [`PolicyResult`]; faults in
//! any stage become `MANUAL_REVIEW`.

pub mod affordability;
pub mod amortization;
mod config;
mod decision;
pub mod domain;
pub mod predicates;
pub mod profile;
pub mod risk;
pub mod rules;
pub mod terms;

#[cfg(test)]
mod tests;

pub use affordability::AffordabilitySnapshot;
pub use config::{
    BandThresholds, EmploymentPolicy, HardRejectThresholds, PolicyConfig, PolicyRules, RangeView,
    RiskScalePolicy, WaterfallTables,
};
pub use decision::{Decision, PolicyFault, PolicyResult, RejectReason};
pub use domain::{
    Account, AccountStatus, AccountType, Application, BureauReport, EmploymentType,
    EmploymentVerification, Enquiry, IncomeSource, IncomeSourceType, PlatformData,
};
pub use profile::{CreditAssessment, CreditBand};
pub use risk::RiskScale;
pub use rules::{HardRejectChain, HardRejectRule, RuleContext};
pub use terms::LoanTerms;

use std::fmt;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

/// Waterfall stage, used to label faults and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStage {
    HardRejectCheck,
    FoirCheck,
    CreditAssess,
    RiskScale,
    TermSolve,
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvaluationStage::HardRejectCheck => "hard-reject check",
            EvaluationStage::FoirCheck => "FOIR check",
            EvaluationStage::CreditAssess => "credit assessment",
            EvaluationStage::RiskScale => "risk scaling",
            EvaluationStage::TermSolve => "term solving",
        };
        f.write_str(label)
    }
}

/// Values accumulated while walking the waterfall, kept for the final result.
#[derive(Default)]
struct Trail {
    foir: Option<f64>,
    risk_scale_factor: Option<f64>,
    assessment: Option<CreditAssessment>,
}

/// Stateless underwriting engine over an immutable policy version.
pub struct PolicyEngine {
    config: PolicyConfig,
    chain: HardRejectChain,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self::with_chain(config, HardRejectChain::standard())
    }

    pub fn with_chain(config: PolicyConfig, chain: HardRejectChain) -> Self {
        Self { config, chain }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn rules(&self) -> PolicyRules {
        self.config.rules_summary()
    }

    /// Evaluates against today's local date.
    pub fn evaluate(&self, application: &Application, bureau: &BureauReport) -> PolicyResult {
        self.evaluate_as_of(application, bureau, Local::now().date_naive())
    }

    /// Evaluates with an explicit "today" for recency windows.
    pub fn evaluate_as_of(
        &self,
        application: &Application,
        bureau: &BureauReport,
        as_of: NaiveDate,
    ) -> PolicyResult {
        let application_id = application.log_id();
        info!(application_id, %as_of, version = %self.config.version, "starting policy evaluation");

        let mut trail = Trail::default();
        let decision = match self.run(application, bureau, as_of, &mut trail) {
            Ok(decision) => decision,
            Err((stage, fault)) => {
                warn!(application_id, %stage, %fault, "policy evaluation fault, routing to manual review");
                Decision::ManualReview {
                    reasons: vec![format!("Policy evaluation error during {stage}: {fault}")],
                }
            }
        };

        info!(
            application_id,
            decision = decision.label(),
            foir = trail.foir,
            risk_scale_factor = trail.risk_scale_factor,
            "policy evaluation complete"
        );

        PolicyResult {
            decision,
            foir: trail.foir,
            risk_scale_factor: trail.risk_scale_factor,
            policy_version: self.config.version.clone(),
            assessment: trail.assessment,
        }
    }

    fn run(
        &self,
        application: &Application,
        bureau: &BureauReport,
        as_of: NaiveDate,
        trail: &mut Trail,
    ) -> Result<Decision, (EvaluationStage, PolicyFault)> {
        let config = &self.config;

        let ctx = RuleContext {
            application,
            bureau,
            config,
            as_of,
        };
        let findings = self.chain.evaluate(&ctx);
        if !findings.is_empty() {
            debug!(stage = %EvaluationStage::HardRejectCheck, count = findings.len(), "hard reject");
            return Ok(Decision::Rejected {
                reasons: findings.iter().map(RejectReason::summary).collect(),
            });
        }

        let snapshot = affordability::assess(application, bureau, config)
            .map_err(|fault| (EvaluationStage::FoirCheck, fault))?;
        trail.foir = Some(snapshot.foir);
        debug!(
            stage = %EvaluationStage::FoirCheck,
            adjusted_income = snapshot.adjusted_income,
            existing_obligations = snapshot.existing_obligations,
            proposed_emi = snapshot.proposed_emi,
            foir = snapshot.foir,
            "affordability computed"
        );
        if snapshot.exceeds(config.max_foir) {
            let reason = RejectReason::FoirExceeded {
                foir: snapshot.foir,
                max_foir: config.max_foir,
            };
            return Ok(Decision::Rejected {
                reasons: vec![reason.summary()],
            });
        }

        let assessment = profile::assess(bureau, &config.bands);
        debug!(
            stage = %EvaluationStage::CreditAssess,
            band = ?assessment.band,
            account_mix = assessment.account_mix_score,
            payment_history = assessment.payment_history_score,
            utilization = assessment.credit_utilization,
            "credit profile assessed"
        );

        let scale = risk::resolve(&assessment, application.employment_type, config);
        trail.assessment = Some(assessment);
        trail.risk_scale_factor = Some(scale.factor);
        debug!(
            stage = %EvaluationStage::RiskScale,
            base = scale.base,
            adjustment = scale.adjustment,
            factor = scale.factor,
            "risk scale resolved"
        );

        let offer = terms::solve(application, &snapshot, scale.factor, config)
            .map_err(|fault| (EvaluationStage::TermSolve, fault))?;

        Ok(Decision::Approved {
            approved_amount: offer.amount,
            interest_rate: offer.interest_rate,
            tenure_months: offer.tenure_months,
            conditions: offer.conditions,
        })
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
