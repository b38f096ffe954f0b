//! Per-square price selection for a tier and job size.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PricingError;
use crate::types::Tier;

/// Jobs strictly below this many squares use the small-job price.
pub const SMALL_JOB_BREAKPOINT: f64 = 16.0;

/// Which price a resolution used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// The tier's standard price.
    Standard,
    /// The tier's small-job price.
    SmallJob,
    /// The hard-coded per-kind price; the tier has no usable price.
    Fallback,
}

/// Result of pricing one tier for one job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResolution {
    pub price_per_square: f64,
    /// `price_per_square * squares`, unrounded.
    pub total_price: f64,
    pub source: PriceSource,
}

impl PriceResolution {
    /// Whether the price came from the hard-coded table instead of admin data.
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        matches!(self.source, PriceSource::Fallback)
    }
}

/// Whether a job of this size is priced as a small job.
#[must_use]
pub fn is_small_job(squares: f64) -> bool {
    squares < SMALL_JOB_BREAKPOINT
}

/// Price a tier for a job of `squares`.
///
/// Below the breakpoint the small-job price is used when the tier has one,
/// otherwise the standard price. At or above the breakpoint the standard
/// price is always used. A tier with neither usable price falls back to
/// [`TierKind::fallback_price_per_square`](crate::TierKind::fallback_price_per_square)
/// and the result is marked [`PriceSource::Fallback`].
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] on `squares` unless it is a finite
/// number greater than zero whose total price is also finite.
pub fn resolve_price(tier: &Tier, squares: f64) -> Result<PriceResolution, PricingError> {
    check_squares(squares)?;

    let standard = usable(tier.price_per_square_standard);
    let small_job = usable(tier.price_per_square_small_job);

    let (price_per_square, source) = match (is_small_job(squares), small_job, standard) {
        (true, Some(price), _) => (price, PriceSource::SmallJob),
        (_, _, Some(price)) => (price, PriceSource::Standard),
        _ => {
            let price = tier.kind.fallback_price_per_square();
            warn!(
                tier = %tier.kind,
                squares,
                price_per_square = price,
                "tier has no usable price; using fallback price"
            );
            (price, PriceSource::Fallback)
        }
    };

    let total_price = price_per_square * squares;
    if !total_price.is_finite() {
        return Err(PricingError::invalid("squares", "job is too large to price"));
    }

    debug!(tier = %tier.kind, squares, price_per_square, ?source, "resolved tier price");

    Ok(PriceResolution {
        price_per_square,
        total_price,
        source,
    })
}

pub(crate) fn check_squares(squares: f64) -> Result<(), PricingError> {
    if !squares.is_finite() {
        return Err(PricingError::invalid("squares", "must be a finite number"));
    }
    if squares <= 0.0 {
        return Err(PricingError::invalid("squares", "must be greater than zero"));
    }
    Ok(())
}

/// Stored prices of zero or below count as unset.
fn usable(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p > 0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::TierKind;

    fn good(standard: Option<f64>, small_job: Option<f64>) -> Tier {
        Tier::new(TierKind::Good).with_prices(standard, small_job)
    }

    #[test]
    fn test_small_job_uses_small_job_price() {
        let r = resolve_price(&good(Some(625.0), Some(725.0)), 10.0).unwrap();
        assert_eq!(r.price_per_square, 725.0);
        assert_eq!(r.total_price, 7250.0);
        assert_eq!(r.source, PriceSource::SmallJob);
    }

    #[test]
    fn test_large_job_uses_standard_price() {
        let r = resolve_price(&good(Some(625.0), Some(725.0)), 20.0).unwrap();
        assert_eq!(r.price_per_square, 625.0);
        assert_eq!(r.total_price, 12_500.0);
        assert_eq!(r.source, PriceSource::Standard);
    }

    #[test]
    fn test_breakpoint_is_exclusive() {
        let tier = good(Some(625.0), Some(725.0));
        assert_eq!(resolve_price(&tier, 16.0).unwrap().price_per_square, 625.0);
        assert_eq!(resolve_price(&tier, 15.99).unwrap().price_per_square, 725.0);
    }

    #[test]
    fn test_small_job_without_small_price_uses_standard() {
        let r = resolve_price(&good(Some(625.0), None), 8.0).unwrap();
        assert_eq!(r.price_per_square, 625.0);
        assert_eq!(r.source, PriceSource::Standard);
    }

    #[test]
    fn test_missing_prices_fall_back_per_kind() {
        for kind in TierKind::ALL {
            let r = resolve_price(&Tier::new(kind), 20.0).unwrap();
            assert_eq!(r.price_per_square, kind.fallback_price_per_square());
            assert!(r.used_fallback());
        }
    }

    #[test]
    fn test_small_price_only_large_job_falls_back() {
        let r = resolve_price(&good(None, Some(725.0)), 30.0).unwrap();
        assert_eq!(r.price_per_square, 625.0);
        assert_eq!(r.source, PriceSource::Fallback);

        let small = resolve_price(&good(None, Some(725.0)), 12.0).unwrap();
        assert_eq!(small.source, PriceSource::SmallJob);
    }

    #[test]
    fn test_zero_prices_count_as_unset() {
        let r = resolve_price(&good(Some(0.0), Some(0.0)), 10.0).unwrap();
        assert_eq!(r.source, PriceSource::Fallback);
    }

    #[test]
    fn test_invalid_squares() {
        let tier = good(Some(625.0), None);
        for squares in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = resolve_price(&tier, squares).unwrap_err();
            assert!(
                matches!(err, PricingError::InvalidInput { field: "squares", .. }),
                "{squares} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let tier = good(Some(625.0), Some(725.0));
        let err = resolve_price(&tier, 1e307).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "squares", .. }));

        // Huge sizes price as long as the total stays finite.
        let r = resolve_price(&tier, 1e300).unwrap();
        assert!(r.total_price.is_finite());
    }

    #[test]
    fn test_total_is_exact_product() {
        let tier = good(Some(612.37), Some(701.13));
        for squares in [0.5, 3.3, 15.999, 16.0, 27.25, 180.0] {
            let r = resolve_price(&tier, squares).unwrap();
            assert_eq!(r.total_price, r.price_per_square * squares);
        }
    }

    #[test]
    fn test_standard_price_ignores_small_job_price_at_or_above_breakpoint() {
        for small_job in [None, Some(700.0), Some(10_000.0)] {
            let tier = good(Some(625.0), small_job);
            for squares in [16.0, 16.01, 40.0, 1_000.0] {
                assert_eq!(resolve_price(&tier, squares).unwrap().price_per_square, 625.0);
            }
        }
    }
}
