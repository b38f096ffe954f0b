//! Reference pricing and financing figures.
//!
//! These are the numbers sales staff see on every proposal; a change here is
//! a change to what customers are quoted.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use roofquote_core::pricing::{
    Amortization, PriceSource, format_currency, format_currency_with_cents, monthly_payment,
    resolve_price,
};
use roofquote_core::{PricingError, Tier, TierKind};

fn good_tier() -> Tier {
    Tier::new(TierKind::Good).with_prices(Some(625.0), Some(725.0))
}

#[test]
fn test_small_job_scenario() {
    let resolution = resolve_price(&good_tier(), 10.0).unwrap();
    assert_eq!(resolution.price_per_square, 725.0);
    assert_eq!(resolution.total_price, 7_250.0);
    assert_eq!(format_currency(resolution.total_price), "$7,250");
}

#[test]
fn test_large_job_scenario() {
    let resolution = resolve_price(&good_tier(), 20.0).unwrap();
    assert_eq!(resolution.price_per_square, 625.0);
    assert_eq!(resolution.total_price, 12_500.0);
    assert_eq!(format_currency(resolution.total_price), "$12,500");
}

#[test]
fn test_breakpoint_uses_standard_price() {
    let at = resolve_price(&good_tier(), 16.0).unwrap();
    assert_eq!(at.price_per_square, 625.0);
    assert_eq!(at.source, PriceSource::Standard);

    let below = resolve_price(&good_tier(), 15.99).unwrap();
    assert_eq!(below.price_per_square, 725.0);
    assert_eq!(below.source, PriceSource::SmallJob);
}

#[test]
fn test_small_job_without_small_price_uses_standard() {
    let tier = Tier::new(TierKind::Better).with_prices(Some(770.0), None);
    for squares in [0.5, 1.0, 8.25, 15.999] {
        let resolution = resolve_price(&tier, squares).unwrap();
        assert_eq!(resolution.price_per_square, 770.0);
        assert_eq!(resolution.total_price, 770.0 * squares);
    }
}

#[test]
fn test_financed_large_job() {
    let total = resolve_price(&good_tier(), 20.0).unwrap().total_price;
    let loan = Amortization::new(total, 5.99, 10).unwrap();

    assert!((loan.monthly_payment - 138.712_863_594_200_34).abs() < 1e-9);
    assert_eq!(format_currency_with_cents(loan.monthly_payment), "$138.71");
    assert_eq!(format_currency_with_cents(loan.total_paid()), "$16,645.54");
    assert_eq!(format_currency_with_cents(loan.total_interest()), "$4,145.54");
}

#[test]
fn test_interest_free_loan() {
    let payment = monthly_payment(10_000.0, 0.0, 5).unwrap();
    assert_eq!(payment, 10_000.0 / 60.0);
    assert_eq!(format_currency_with_cents(payment), "$166.67");
}

#[test]
fn test_fallback_prices() {
    let expected = [(TierKind::Good, 625.0), (TierKind::Better, 770.0), (TierKind::Best, 850.0)];
    for (kind, price) in expected {
        let resolution = resolve_price(&Tier::new(kind), 20.0).unwrap();
        assert_eq!(resolution.price_per_square, price);
        assert!(resolution.used_fallback());
    }
}

#[test]
fn test_rejects_invalid_job_sizes() {
    for squares in [0.0, -4.0, f64::NAN, f64::INFINITY] {
        let err = resolve_price(&good_tier(), squares).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "squares", .. }));
    }
}
