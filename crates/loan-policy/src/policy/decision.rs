use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{AccountType, EmploymentType};
use super::profile::CreditAssessment;

/// Underwriting outcome; loan terms only exist on approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved {
        approved_amount: f64,
        interest_rate: f64,
        tenure_months: u32,
        conditions: Vec<String>,
    },
    Rejected {
        reasons: Vec<String>,
    },
    ManualReview {
        reasons: Vec<String>,
    },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved { .. } => "APPROVED",
            Decision::Rejected { .. } => "REJECTED",
            Decision::ManualReview { .. } => "MANUAL_REVIEW",
        }
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Decision::Approved { .. } => &[],
            Decision::Rejected { reasons } | Decision::ManualReview { reasons } => reasons,
        }
    }

    pub fn conditions(&self) -> &[String] {
        match self {
            Decision::Approved { conditions, .. } => conditions,
            _ => &[],
        }
    }

    pub fn approved_amount(&self) -> Option<f64> {
        match self {
            Decision::Approved {
                approved_amount, ..
            } => Some(*approved_amount),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Decision::Approved {
                approved_amount,
                interest_rate,
                tenure_months,
                conditions,
            } => {
                let terms = format!(
                    "approved {} at {:.2}% for {} months",
                    format_rupees(*approved_amount),
                    interest_rate,
                    tenure_months
                );
                if conditions.is_empty() {
                    terms
                } else {
                    format!("{terms} (conditions: {})", conditions.join("; "))
                }
            }
            Decision::Rejected { reasons } => format!("rejected: {}", reasons.join("; ")),
            Decision::ManualReview { reasons } => {
                format!("manual review required: {}", reasons.join("; "))
            }
        }
    }
}

/// Engine output for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    #[serde(flatten)]
    pub decision: Decision,
    pub foir: Option<f64>,
    pub risk_scale_factor: Option<f64>,
    pub policy_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<CreditAssessment>,
}

impl PolicyResult {
    pub fn is_approved(&self) -> bool {
        matches!(self.decision, Decision::Approved { .. })
    }
}

/// Gate failures that end an evaluation with REJECTED.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    IncomeBelowThreshold {
        income: f64,
        threshold: f64,
    },
    CreditScoreBelowMinimum {
        score: u16,
        minimum: u16,
    },
    AgeOutsideRange {
        age: u8,
        min: u8,
        max: u8,
    },
    InsufficientEmployment {
        years: f64,
        required: f64,
        employment_type: EmploymentType,
    },
    RecentDefault {
        account_type: AccountType,
    },
    UndatedDefault {
        account_type: AccountType,
    },
    EnquiryVelocity {
        count: usize,
        window_days: i64,
    },
    DebtVelocity {
        velocity: f64,
    },
    FoirExceeded {
        foir: f64,
        max_foir: f64,
    },
}

impl RejectReason {
    pub fn summary(&self) -> String {
        match self {
            RejectReason::IncomeBelowThreshold { income, threshold } => format!(
                "Monthly income {} is below minimum threshold {}",
                format_rupees(*income),
                format_rupees(*threshold)
            ),
            RejectReason::CreditScoreBelowMinimum { score, minimum } => {
                format!("Credit score {score} is below minimum threshold {minimum}")
            }
            RejectReason::AgeOutsideRange { age, min, max } => {
                format!("Age {age} is outside eligible range ({min}-{max} years)")
            }
            RejectReason::InsufficientEmployment {
                years,
                required,
                employment_type,
            } => format!(
                "Employment duration {years} years is below required {required} years for {}",
                employment_type.as_str()
            ),
            RejectReason::RecentDefault { account_type } => format!(
                "Recent default/write-off found in {}",
                account_type.as_str()
            ),
            RejectReason::UndatedDefault { account_type } => format!(
                "Default/write-off found in {} with unreadable payment date",
                account_type.as_str()
            ),
            RejectReason::EnquiryVelocity { count, window_days } => {
                format!("Too many credit enquiries ({count}) in last {window_days} days")
            }
            RejectReason::DebtVelocity { velocity } => format!(
                "High debt velocity: {:.1}% increase in last 12 months",
                velocity * 100.0
            ),
            RejectReason::FoirExceeded { foir, max_foir } => format!(
                "FOIR {:.2}% exceeds maximum allowed {:.2}%",
                foir * 100.0,
                max_foir * 100.0
            ),
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// A stage could not produce a usable number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyFault {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("tenure must be between 1 and 2147483647 months, got {0}")]
    InvalidTenure(u32),
    #[error("calculated loan amount {amount:.2} is below minimum {minimum:.0}")]
    BelowMinimumLoan { amount: f64, minimum: f64 },
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, PolicyFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PolicyFault::NonFinite { field, value })
    }
}

/// Finite and not negative; money amounts on the inputs must satisfy this.
pub(crate) fn amount(field: &'static str, value: f64) -> Result<f64, PolicyFault> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(PolicyFault::Negative { field, value });
    }
    Ok(value)
}

/// Whole-rupee amount with thousands separators, e.g. `₹500,000`.
pub(crate) fn format_rupees(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupees_are_grouped_in_thousands() {
        assert_eq!(format_rupees(500_000.0), "₹500,000");
        assert_eq!(format_rupees(999.4), "₹999");
        assert_eq!(format_rupees(1_234_567.8), "₹1,234,568");
        assert_eq!(format_rupees(-25_000.0), "-₹25,000");
    }

    #[test]
    fn decision_serializes_with_flat_tag() {
        let result = PolicyResult {
            decision: Decision::Rejected {
                reasons: vec!["Credit score 600 is below minimum threshold 650".to_string()],
            },
            foir: None,
            risk_scale_factor: None,
            policy_version: "1.0".to_string(),
            assessment: None,
        };

        let value = serde_json::to_value(&result).expect("serializes");
        assert_eq!(value["decision"], "REJECTED");
        assert_eq!(value["reasons"][0], "Credit score 600 is below minimum threshold 650");
        assert!(value.get("approved_amount").is_none());
        assert!(value["foir"].is_null());

        let back: PolicyResult = serde_json::from_value(value).expect("deserializes");
        assert_eq!(back, result);
    }

    #[test]
    fn foir_reason_shows_both_percentages() {
        let reason = RejectReason::FoirExceeded {
            foir: 0.6123,
            max_foir: 0.55,
        };
        assert_eq!(reason.summary(), "FOIR 61.23% exceeds maximum allowed 55.00%");
    }
}
