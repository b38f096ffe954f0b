//! Standalone loan payment calculator.
//!
//! # Usage
//!
//! ```bash
//! rq-cli payment --principal 12500 --rate 5.99 --years 10
//! rq-cli payment --principal 12500 --rate 5.99 --years 10 --schedule
//! ```

use std::io::{self, Write};

use roofquote_core::pricing::{Amortization, format_currency_with_cents};
use serde::Serialize;

use super::write_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentReport {
    #[serde(flatten)]
    amortization: Amortization,
    total_paid: f64,
    total_interest: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<roofquote_core::pricing::ScheduledPayment>>,
}

/// Print the monthly payment and totals for a loan.
///
/// # Errors
///
/// Returns an error if the principal is not positive, the term is zero or
/// the rate is negative.
pub fn run(
    principal: f64,
    rate: f64,
    years: u32,
    schedule: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let loan = Amortization::new(principal, rate, years)?;

    if json {
        return write_json(&PaymentReport {
            amortization: loan,
            total_paid: loan.total_paid(),
            total_interest: loan.total_interest(),
            schedule: schedule.then(|| loan.schedule()),
        });
    }

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} over {} years at {}%",
        format_currency_with_cents(principal),
        years,
        rate
    )?;
    writeln!(out, "Monthly payment: {}", format_currency_with_cents(loan.monthly_payment))?;
    writeln!(out, "Payments:        {}", loan.payment_count())?;
    writeln!(out, "Total paid:      {}", format_currency_with_cents(loan.total_paid()))?;
    writeln!(out, "Total interest:  {}", format_currency_with_cents(loan.total_interest()))?;

    if schedule {
        writeln!(out)?;
        writeln!(out, "{:>4}  {:>12}  {:>12}  {:>12}  {:>14}", "#", "Payment", "Interest", "Principal", "Balance")?;
        for row in loan.schedule() {
            writeln!(
                out,
                "{:>4}  {:>12}  {:>12}  {:>12}  {:>14}",
                row.number,
                format_currency_with_cents(row.payment),
                format_currency_with_cents(row.interest),
                format_currency_with_cents(row.principal),
                format_currency_with_cents(row.balance),
            )?;
        }
    }
    Ok(())
}
