//! The pricing and financing engine.
//!
//! Every surface that shows a price (admin preview, proposal creation, the
//! customer-facing proposal view) goes through these functions, so the same
//! job size and tier always produce the same figures.
//!
//! - [`resolve_price`] picks the per-square price for a tier and job size.
//! - [`monthly_payment`] and [`Amortization`] price a loan against a total.
//! - [`format_currency`] and [`format_currency_with_cents`] render amounts.
//!
//! All functions are pure and synchronous.

pub mod amortization;
pub mod currency;
pub mod resolver;

pub use amortization::{Amortization, ScheduledPayment, monthly_payment};
pub use currency::{format_currency, format_currency_with_cents};
pub use resolver::{PriceResolution, PriceSource, SMALL_JOB_BREAKPOINT, is_small_job, resolve_price};
