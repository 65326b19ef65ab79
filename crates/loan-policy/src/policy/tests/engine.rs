use std::sync::Arc;

use super::common::*;
use crate::policy::decision::RejectReason;
use crate::policy::domain::{AccountStatus, EmploymentType};
use crate::policy::rules::{HardRejectChain, HardRejectRule, MinimumCreditScore, RuleContext};
use crate::policy::{CreditBand, Decision, PolicyConfig, PolicyEngine};

#[test]
fn hard_reject_stops_before_affordability() {
    let mut application = application();
    application.monthly_income = 20_000.0;

    let result = engine().evaluate_as_of(&application, &bureau(), as_of());

    match &result.decision {
        Decision::Rejected { reasons } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("minimum threshold ₹25,000"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(result.foir, None);
    assert_eq!(result.risk_scale_factor, None);
    assert!(result.assessment.is_none());
    assert_eq!(result.decision.approved_amount(), None);
    assert!(result.decision.conditions().is_empty());
}

#[test]
fn approval_carries_trail_and_terms() {
    let result = engine().evaluate_as_of(&application(), &bureau(), as_of());

    match &result.decision {
        Decision::Approved {
            approved_amount,
            interest_rate,
            tenure_months,
            conditions,
        } => {
            assert_eq!(*approved_amount, 500_000.0);
            assert!((interest_rate - 9.0).abs() < 1e-9);
            assert_eq!(*tenure_months, 24);
            assert!(conditions.is_empty());
        }
        other => panic!("expected approval, got {other:?}"),
    }
    assert_eq!(result.decision.approved_amount(), Some(500_000.0));
    assert_eq!(result.policy_version, "1.0");
    assert!((result.risk_scale_factor.expect("factor") - 0.75).abs() < 1e-9);
    let assessment = result.assessment.expect("assessment recorded");
    assert_eq!(assessment.band, CreditBand::Excellent);
}

#[test]
fn requests_above_policy_maximum_are_capped_with_condition() {
    let mut application = application();
    application.monthly_income = 400_000.0;
    application.requested_amount = 2_500_000.0;

    let engine = engine();
    let result = engine.evaluate_as_of(&application, &bureau(), as_of());

    assert_eq!(
        result.decision.approved_amount(),
        Some(engine.config().max_loan_amount)
    );
    assert_eq!(
        result.decision.conditions().to_vec(),
        vec![
            "Approved amount reduced from requested ₹2,500,000 to ₹2,000,000 based on affordability"
                .to_string()
        ]
    );
}

#[test]
fn foir_rejection_keeps_ratio_and_skips_risk() {
    let mut bureau = bureau();
    bureau.accounts = vec![loan(30_000.0, AccountStatus::Active, Some(days_ago(3)))];

    let result = engine().evaluate_as_of(&application(), &bureau, as_of());

    let foir = result.foir.expect("foir recorded");
    assert!(foir > 0.55);
    match &result.decision {
        Decision::Rejected { reasons } => {
            assert!(reasons[0].starts_with("FOIR "));
            assert!(reasons[0].ends_with("exceeds maximum allowed 55.00%"));
        }
        other => panic!("expected FOIR rejection, got {other:?}"),
    }
    assert_eq!(result.risk_scale_factor, None);
}

#[test]
fn term_fault_routes_to_manual_review_with_trail() {
    let mut application = application();
    application.requested_amount = 40_000.0;

    let result = engine().evaluate_as_of(&application, &bureau(), as_of());

    match &result.decision {
        Decision::ManualReview { reasons } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("term solving"));
            assert!(reasons[0].contains("below minimum 50000"));
        }
        other => panic!("expected manual review, got {other:?}"),
    }
    assert!(result.foir.is_some());
    assert!(result.risk_scale_factor.is_some());
}

#[test]
fn foir_stage_fault_routes_to_manual_review() {
    let mut application = application();
    application.preferred_tenure = 0;

    let result = engine().evaluate_as_of(&application, &bureau(), as_of());

    match &result.decision {
        Decision::ManualReview { reasons } => {
            assert_eq!(
                reasons[0],
                "Policy evaluation error during FOIR check: \
                 tenure must be between 1 and 2147483647 months, got 0"
            );
        }
        other => panic!("expected manual review, got {other:?}"),
    }
    assert_eq!(result.foir, None);
}

#[test]
fn alternate_policy_versions_change_outcomes() {
    let mut strict = PolicyConfig::default();
    strict.version = "strict".to_string();
    strict.max_foir = 0.40;

    let result = PolicyEngine::new(strict).evaluate_as_of(&application(), &bureau(), as_of());

    assert_eq!(result.policy_version, "strict");
    assert_eq!(result.decision.label(), "REJECTED");
    assert!(result.decision.reasons()[0].ends_with("exceeds maximum allowed 40.00%"));
}

struct BlockGovernment;

impl HardRejectRule for BlockGovernment {
    fn name(&self) -> &'static str {
        "block_government"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RejectReason> {
        if ctx.application.employment_type == EmploymentType::Government {
            vec![RejectReason::AgeOutsideRange {
                age: ctx.application.age,
                min: 0,
                max: 0,
            }]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn custom_chains_are_honoured() {
    let chain = HardRejectChain::new(vec![Box::new(MinimumCreditScore), Box::new(BlockGovernment)]);
    let engine = PolicyEngine::with_chain(policy(), chain);

    let mut application = application();
    application.monthly_income = 10_000.0;
    application.employment_type = EmploymentType::Government;
    let mut bureau = bureau();
    bureau.credit_score = 600;

    let result = engine.evaluate_as_of(&application, &bureau, as_of());
    let reasons = result.decision.reasons();
    assert_eq!(reasons.len(), 2);
    assert!(reasons[0].starts_with("Credit score 600"));
}

#[test]
fn repeated_evaluations_are_identical() {
    let engine = engine();
    let mut bureau = bureau();
    bureau.accounts = vec![
        credit_card(200_000.0, 150_000.0, &["0", "0", "1"]),
        loan(9_000.0, AccountStatus::Active, Some(days_ago(20))),
    ];

    let first = engine.evaluate_as_of(&application(), &bureau, as_of());
    let second = engine.evaluate_as_of(&application(), &bureau, as_of());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(engine());
    let expected = engine.evaluate_as_of(&application(), &bureau(), as_of());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.evaluate_as_of(&application(), &bureau(), as_of()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), expected);
    }
}
