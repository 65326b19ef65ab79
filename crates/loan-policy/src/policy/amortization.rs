//! Reducing-balance annuity maths.
//!
//! Rates are annual percentages (`12.5` means 12.5% p.a.), compounded monthly.

use super::decision::{finite, PolicyFault};

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// `(1 + r)^n` for a monthly rate and a tenure in months.
fn growth(rate: f64, tenure_months: u32) -> Result<f64, PolicyFault> {
    let exponent =
        i32::try_from(tenure_months).map_err(|_| PolicyFault::InvalidTenure(tenure_months))?;
    Ok((1.0 + rate).powi(exponent))
}

/// Equated monthly instalment for `principal` over `tenure_months`.
///
/// `EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)`; a zero rate spreads the
/// principal evenly.
pub fn emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Result<f64, PolicyFault> {
    let principal = finite("principal", principal)?;
    let rate = monthly_rate(finite("interest_rate", annual_rate_percent)?);
    if tenure_months == 0 {
        return Err(PolicyFault::InvalidTenure(tenure_months));
    }

    if rate == 0.0 {
        return Ok(principal / f64::from(tenure_months));
    }

    let factor = growth(rate, tenure_months)?;
    finite("emi", principal * rate * factor / (factor - 1.0))
}

/// Largest principal an instalment of `emi` can service.
///
/// Inverse of [`emi`]: `P = EMI × ((1 + r)^n − 1) / (r × (1 + r)^n)`.
pub fn max_principal(
    emi: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Result<f64, PolicyFault> {
    let emi = finite("emi", emi)?;
    let rate = monthly_rate(finite("interest_rate", annual_rate_percent)?);
    if tenure_months == 0 {
        return Err(PolicyFault::InvalidTenure(tenure_months));
    }

    if rate == 0.0 {
        return Ok(emi * f64::from(tenure_months));
    }

    let factor = growth(rate, tenure_months)?;
    finite("max_principal", emi * (factor - 1.0) / (rate * factor))
}
