use super::common::*;
use crate::policy::affordability::{adjusted_income, assess, existing_obligations};
use crate::policy::amortization;
use crate::policy::decision::PolicyFault;
use crate::policy::domain::{AccountStatus, EmploymentType, IncomeSource, IncomeSourceType};

#[test]
fn declared_income_gets_employment_haircut() {
    let mut application = application();
    application.employment_type = EmploymentType::SelfEmployed;
    application.monthly_income = 100_000.0;

    let income = adjusted_income(&application, &policy()).expect("income computes");
    assert!((income - 80_000.0).abs() < 1e-9);
}

#[test]
fn income_sources_are_weighted_before_haircut() {
    let mut application = application();
    application.employment_type = EmploymentType::Government;
    application.monthly_income = 1.0;
    application.income_sources = vec![
        salary(50_000.0),
        IncomeSource {
            amount: 20_000.0,
            source_type: IncomeSourceType::Rental,
        },
        IncomeSource {
            amount: 10_000.0,
            source_type: IncomeSourceType::Other,
        },
    ];

    let income = adjusted_income(&application, &policy()).expect("income computes");
    // 50,000 + 16,000 + 6,000 at the government multiplier of 1.0
    assert!((income - 72_000.0).abs() < 1e-9, "got {income}");
}

#[test]
fn unknown_employment_uses_fallback_multiplier() {
    let mut application = application();
    application.employment_type = EmploymentType::Unknown;
    application.monthly_income = 50_000.0;

    let income = adjusted_income(&application, &policy()).expect("income computes");
    assert!((income - 45_000.0).abs() < 1e-9);
}

#[test]
fn only_active_accounts_count_as_obligations() {
    let mut bureau = bureau();
    bureau.accounts = vec![
        loan(12_000.0, AccountStatus::Active, None),
        loan(8_000.0, AccountStatus::Closed, None),
        loan(5_000.0, AccountStatus::Settled, None),
        credit_card(100_000.0, 10_000.0, &["0"]),
    ];

    assert_eq!(existing_obligations(&bureau).expect("sums"), 12_000.0);
}

#[test]
fn foir_combines_existing_and_proposed_instalments() {
    let application = application();
    let mut bureau = bureau();
    bureau.accounts = vec![loan(10_000.0, AccountStatus::Active, None)];

    let snapshot = assess(&application, &bureau, &policy()).expect("snapshot computes");

    let expected_emi = amortization::emi(500_000.0, 12.0, 24).expect("emi");
    assert_eq!(snapshot.base_rate, 12.0);
    assert!((snapshot.proposed_emi - expected_emi).abs() < 1e-9);
    assert!((snapshot.adjusted_income - 57_000.0).abs() < 1e-9);
    let expected_foir = (10_000.0 + expected_emi) / 57_000.0;
    assert!((snapshot.foir - expected_foir).abs() < 1e-12);
}

#[test]
fn unlisted_tenure_falls_back_to_default_rate() {
    let mut application = application();
    application.preferred_tenure = 18;

    let snapshot = assess(&application, &bureau(), &policy()).expect("snapshot computes");
    assert_eq!(snapshot.base_rate, 12.0);
}

#[test]
fn zero_income_forces_foir_to_one() {
    let mut application = application();
    application.monthly_income = 0.0;

    let snapshot = assess(&application, &bureau(), &policy()).expect("snapshot computes");
    assert_eq!(snapshot.foir, 1.0);
    assert!(snapshot.exceeds(policy().max_foir));
}

#[test]
fn zero_tenure_is_a_fault() {
    let mut application = application();
    application.preferred_tenure = 0;

    assert_eq!(
        assess(&application, &bureau(), &policy()),
        Err(PolicyFault::InvalidTenure(0))
    );
}

#[test]
fn tenure_outside_exponent_range_is_a_fault() {
    let mut application = application();
    application.preferred_tenure = u32::MAX - 9;

    assert_eq!(
        assess(&application, &bureau(), &policy()),
        Err(PolicyFault::InvalidTenure(u32::MAX - 9))
    );

    let result = engine().evaluate_as_of(&application, &bureau(), as_of());
    assert_eq!(result.decision.label(), "MANUAL_REVIEW");
    assert_eq!(result.foir, None);
}

#[test]
fn negative_instalments_are_faults() {
    let mut bureau = bureau();
    bureau.accounts = vec![loan(-500.0, AccountStatus::Active, None)];

    match existing_obligations(&bureau) {
        Err(PolicyFault::Negative { field, value }) => {
            assert_eq!(field, "accounts.emi_amount");
            assert_eq!(value, -500.0);
        }
        other => panic!("expected negative fault, got {other:?}"),
    }
}
