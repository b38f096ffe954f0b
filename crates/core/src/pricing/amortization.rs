//! Fixed-rate loan amortization.

use serde::Serialize;

use crate::error::PricingError;

/// Fixed monthly payment for a fully amortizing loan.
///
/// With `r = annual_rate_percent / 100 / 12` and `n = term_years * 12`:
/// `principal * r(1+r)^n / ((1+r)^n - 1)`, or `principal / n` when the rate
/// is zero.
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] if `principal` is not a finite
/// positive number, `term_years` is zero, `annual_rate_percent` is
/// negative or not finite, or the payment overflows.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<f64, PricingError> {
    validate(principal, annual_rate_percent, term_years)?;
    let payment = payment_unchecked(principal, annual_rate_percent, payment_count(term_years));
    if !payment.is_finite() {
        return Err(PricingError::invalid(
            "principal",
            "payment is too large to represent",
        ));
    }
    Ok(payment)
}

fn validate(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<(), PricingError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(PricingError::invalid(
            "principal",
            "must be a finite number greater than zero",
        ));
    }
    if term_years == 0 {
        return Err(PricingError::invalid("termYears", "must be at least one year"));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(PricingError::invalid(
            "annualRatePercent",
            "must be zero or a positive percentage",
        ));
    }
    Ok(())
}

const fn payment_count(term_years: u32) -> u32 {
    term_years.saturating_mul(12)
}

const fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

fn payment_unchecked(principal: f64, annual_rate_percent: f64, payments: u32) -> f64 {
    let n = f64::from(payments);
    let straight_line = principal / n;
    if annual_rate_percent == 0.0 {
        return straight_line;
    }

    let r = monthly_rate(annual_rate_percent);
    // (1+r)^n - 1, computed without cancellation at small rates.
    let growth_minus_one = (n * r.ln_1p()).exp_m1();
    let payment = if growth_minus_one.is_infinite() {
        principal * r
    } else if growth_minus_one > 0.0 {
        principal * r * (growth_minus_one + 1.0) / growth_minus_one
    } else {
        straight_line
    };

    // A positive rate always costs more than straight-line, even when the
    // difference is below f64 resolution.
    if payment > straight_line {
        payment
    } else {
        next_above(straight_line)
    }
}

/// Smallest `f64` above a positive finite `value`.
const fn next_above(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1)
}

/// A priced loan: payment and the totals derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amortization {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub monthly_payment: f64,
}

impl Amortization {
    /// Price a loan.
    ///
    /// # Errors
    ///
    /// See [`monthly_payment`].
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<Self, PricingError> {
        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
            monthly_payment: monthly_payment(principal, annual_rate_percent, term_years)?,
        })
    }

    /// Number of monthly payments.
    #[must_use]
    pub const fn payment_count(&self) -> u32 {
        payment_count(self.term_years)
    }

    /// Sum of all payments.
    #[must_use]
    pub fn total_paid(&self) -> f64 {
        self.monthly_payment * f64::from(self.payment_count())
    }

    /// Interest paid over the life of the loan.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.total_paid() - self.principal
    }

    /// Payment-by-payment breakdown of the loan.
    ///
    /// The last row absorbs floating-point drift so its balance is exactly
    /// zero.
    #[must_use]
    pub fn schedule(&self) -> Vec<ScheduledPayment> {
        let r = monthly_rate(self.annual_rate_percent);
        let count = self.payment_count();
        let mut balance = self.principal;
        let mut rows = Vec::with_capacity(usize::try_from(count).unwrap_or_default());

        for number in 1..=count {
            let interest = balance * r;
            let (principal, payment) = if number == count {
                (balance, balance + interest)
            } else {
                (self.monthly_payment - interest, self.monthly_payment)
            };
            balance = if number == count { 0.0 } else { balance - principal };

            rows.push(ScheduledPayment {
                number,
                payment,
                interest,
                principal,
                balance,
            });
        }

        rows
    }
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    /// 1-based payment number.
    pub number: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance remaining after this payment.
    pub balance: f64,
}
