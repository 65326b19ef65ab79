use chrono::NaiveDate;

use crate::policy::domain::{
    Account, AccountStatus, AccountType, Application, BureauReport, EmploymentType, Enquiry,
    IncomeSource, IncomeSourceType, PlatformData,
};
use crate::policy::rules::RuleContext;
use crate::policy::{PolicyConfig, PolicyEngine};

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date")
}

/// `days` before the evaluation date, formatted the way bureaus send it.
pub(super) fn days_ago(days: i64) -> String {
    (as_of() - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub(super) fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn engine() -> PolicyEngine {
    PolicyEngine::new(policy())
}

pub(super) fn application() -> Application {
    Application {
        id: Some("app-test".to_string()),
        requested_amount: 500_000.0,
        purpose: "home renovation".to_string(),
        monthly_income: 60_000.0,
        employment_type: EmploymentType::PrivateMnc,
        employment_years: 5.0,
        age: 30,
        preferred_tenure: 24,
        income_sources: Vec::new(),
    }
}

pub(super) fn salary(amount: f64) -> IncomeSource {
    IncomeSource {
        amount,
        source_type: IncomeSourceType::Salary,
    }
}

pub(super) fn bureau() -> BureauReport {
    BureauReport {
        credit_score: 780,
        accounts: Vec::new(),
        enquiries: Vec::new(),
        platform_data: PlatformData {
            debt_velocity_12m: 0.15,
            payment_regularity: 0.98,
            account_diversity: 0.85,
            credit_utilization_trend: "stable".to_string(),
        },
        employment_verification: None,
    }
}

pub(super) fn credit_card(limit: f64, balance: f64, history: &[&str]) -> Account {
    Account {
        account_id: Some("CC001".to_string()),
        account_type: AccountType::CreditCard,
        issuer: Some("HDFC Bank".to_string()),
        status: AccountStatus::Active,
        credit_limit: limit,
        sanctioned_amount: None,
        current_balance: balance,
        emi_amount: 0.0,
        opening_date: Some("2019-08-20".to_string()),
        last_payment_date: Some(days_ago(10)),
        payment_history: history.iter().map(|code| code.to_string()).collect(),
    }
}

pub(super) fn loan(emi: f64, status: AccountStatus, last_payment: Option<String>) -> Account {
    Account {
        account_id: Some("PL001".to_string()),
        account_type: AccountType::Loan,
        issuer: Some("ICICI Bank".to_string()),
        status,
        credit_limit: 0.0,
        sanctioned_amount: Some(800_000.0),
        current_balance: 400_000.0,
        emi_amount: emi,
        opening_date: Some("2022-11-01".to_string()),
        last_payment_date: last_payment,
        payment_history: vec!["0".to_string(); 24],
    }
}

pub(super) fn enquiry(days: i64) -> Enquiry {
    Enquiry {
        date: days_ago(days),
        enquiry_type: "personal_loan".to_string(),
        issuer: "SBI".to_string(),
    }
}

pub(super) fn context<'a>(
    application: &'a Application,
    bureau: &'a BureauReport,
    config: &'a PolicyConfig,
) -> RuleContext<'a> {
    RuleContext {
        application,
        bureau,
        config,
        as_of: as_of(),
    }
}
