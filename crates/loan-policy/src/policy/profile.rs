use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::BandThresholds;
use super::domain::{AccountType, BureauReport};
use super::predicates::ratio;

const ON_TIME: &str = "0";
const NO_HISTORY_SCORE: f64 = 0.5;

/// Credit quality band derived from the bureau score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditBand {
    pub fn from_score(score: u16, thresholds: &BandThresholds) -> Self {
        if score >= thresholds.excellent {
            CreditBand::Excellent
        } else if score >= thresholds.good {
            CreditBand::Good
        } else if score >= thresholds.fair {
            CreditBand::Fair
        } else {
            CreditBand::Poor
        }
    }
}

/// Audit record of the bureau profile behind the risk-scale factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAssessment {
    pub band: CreditBand,
    pub credit_score: u16,
    pub account_mix_score: f64,
    pub payment_history_score: f64,
    pub credit_utilization: f64,
}

pub fn assess(bureau: &BureauReport, thresholds: &BandThresholds) -> CreditAssessment {
    CreditAssessment {
        band: CreditBand::from_score(bureau.credit_score, thresholds),
        credit_score: bureau.credit_score,
        account_mix_score: account_mix_score(bureau),
        payment_history_score: payment_history_score(bureau),
        credit_utilization: credit_utilization(bureau),
    }
}

pub fn account_mix_score(bureau: &BureauReport) -> f64 {
    let kinds: BTreeSet<AccountType> = bureau
        .accounts
        .iter()
        .map(|account| account.account_type)
        .collect();

    if kinds.contains(&AccountType::CreditCard) && kinds.contains(&AccountType::Loan) {
        1.0
    } else if kinds.len() > 1 {
        0.8
    } else {
        0.6
    }
}

/// Mean on-time share across accounts that report any history.
pub fn payment_history_score(bureau: &BureauReport) -> f64 {
    let shares: Vec<f64> = bureau
        .accounts
        .iter()
        .filter(|account| !account.payment_history.is_empty())
        .map(|account| {
            let on_time = account
                .payment_history
                .iter()
                .filter(|code| code.trim() == ON_TIME)
                .count();
            on_time as f64 / account.payment_history.len() as f64
        })
        .collect();

    if shares.is_empty() {
        return NO_HISTORY_SCORE;
    }

    shares.iter().sum::<f64>() / shares.len() as f64
}

/// Revolving balance over revolving limit; zero without card limits.
pub fn credit_utilization(bureau: &BureauReport) -> f64 {
    let (balance, limit) = bureau
        .accounts_of(AccountType::CreditCard)
        .fold((0.0, 0.0), |(balance, limit), card| {
            (balance + card.current_balance, limit + card.credit_limit)
        });

    ratio(balance, limit).unwrap_or(0.0)
}
