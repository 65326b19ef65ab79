use serde::{Deserialize, Serialize};

/// Employment category declared on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Government,
    PrivateMnc,
    PrivateDomestic,
    SelfEmployed,
    Business,
    #[serde(other)]
    Unknown,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Government => "government",
            EmploymentType::PrivateMnc => "private_mnc",
            EmploymentType::PrivateDomestic => "private_domestic",
            EmploymentType::SelfEmployed => "self_employed",
            EmploymentType::Business => "business",
            EmploymentType::Unknown => "unknown",
        }
    }
}

/// Kind of declared income stream, used to weight its contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSourceType {
    Salary,
    Rental,
    Business,
    Pension,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub amount: f64,
    #[serde(rename = "type")]
    pub source_type: IncomeSourceType,
}

fn default_tenure() -> u32 {
    24
}

/// Loan application as captured by the intake service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub requested_amount: f64,
    #[serde(default)]
    pub purpose: String,
    pub monthly_income: f64,
    pub employment_type: EmploymentType,
    pub employment_years: f64,
    pub age: u8,
    #[serde(default = "default_tenure")]
    pub preferred_tenure: u32,
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
}

impl Application {
    pub(crate) fn log_id(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CreditCard,
    Loan,
    #[serde(other)]
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::CreditCard => "credit_card",
            AccountType::Loan => "loan",
            AccountType::Other => "account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Default,
    WriteOff,
    Settled,
    #[serde(other)]
    Closed,
}

impl AccountStatus {
    /// Statuses that signal a past credit event the lender wrote down.
    pub fn is_derogatory(&self) -> bool {
        matches!(
            self,
            AccountStatus::Default | AccountStatus::WriteOff | AccountStatus::Settled
        )
    }
}

/// Tradeline reported by the bureau.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub account_type: AccountType,
    #[serde(default, alias = "bank", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    pub status: AccountStatus,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanctioned_amount: Option<f64>,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub emi_amount: f64,
    #[serde(default)]
    pub opening_date: Option<String>,
    #[serde(default)]
    pub last_payment_date: Option<String>,
    /// Per-period codes, oldest first: "0" on time, "1".."3" days-past-due buckets, "X" written off.
    #[serde(default)]
    pub payment_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    pub date: String,
    #[serde(rename = "type", default)]
    pub enquiry_type: String,
    #[serde(default, alias = "bank")]
    pub issuer: String,
}

/// Aggregate behaviour metrics computed by the bureau platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlatformData {
    #[serde(default)]
    pub debt_velocity_12m: f64,
    #[serde(default)]
    pub payment_regularity: f64,
    #[serde(default)]
    pub account_diversity: f64,
    #[serde(default)]
    pub credit_utilization_trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentVerification {
    pub verified: bool,
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub monthly_salary: f64,
    #[serde(default)]
    pub verification_date: Option<String>,
}

/// Credit bureau pull for the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauReport {
    pub credit_score: u16,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub enquiries: Vec<Enquiry>,
    #[serde(default)]
    pub platform_data: PlatformData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_verification: Option<EmploymentVerification>,
}

impl BureauReport {
    pub(crate) fn accounts_of(&self, account_type: AccountType) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |account| account.account_type == account_type)
    }
}
