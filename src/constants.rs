//! Process-wide cache for `e` and `ln(10)` at a monotonically growing scale
//! (spec.md §3, §5, §9).
//!
//! Policy: a read-optimized, copy-on-write container with no lock on the
//! hot path. A cache miss (scale exceeds what's cached) computes a fresh
//! decimal and swaps the reference in; it is never mutated in place. Two
//! concurrent misses may race — both compute independently and the last
//! store wins — which is fine because recomputation is idempotent and a
//! reader that observes a stale-but-valid value simply triggers another
//! recompute on its next call.

use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::OnceCell;

use crate::decimal::{round_half_even, Decimal};
use crate::exp::exp_series;
use crate::log::ln;

const GUARD: i64 = 6;

struct Cached {
    scale: i64,
    value: Decimal,
}

static E: OnceCell<ArcSwap<Cached>> = OnceCell::new();
static LN10: OnceCell<ArcSwap<Cached>> = OnceCell::new();

/// `e`, rounded half-even to at least `scale` fractional digits.
///
/// Computed from the same Taylor series [`crate::exp::exp`] uses for its
/// fractional remainder (`f = 1`), so the cache has no dependency on
/// itself: `exp`'s integer-part path is the only consumer that needs `e`
/// before it can be computed.
pub(crate) fn e(scale: i64) -> Decimal {
    cached(&E, scale, |s| exp_series(&Decimal::from(1), s + GUARD))
}

/// `ln(10)`, rounded half-even to at least `scale` fractional digits.
pub(crate) fn ln10(scale: i64) -> Decimal {
    cached(&LN10, scale, |s| {
        ln(&Decimal::from(10), s).expect("ln(10) is always defined")
    })
}

fn cached(cell: &OnceCell<ArcSwap<Cached>>, scale: i64, compute: impl Fn(i64) -> Decimal) -> Decimal {
    let slot = cell.get_or_init(|| {
        let value = compute(scale);
        ArcSwap::from_pointee(Cached { scale, value })
    });

    let current = slot.load();
    if current.scale >= scale {
        return round_half_even(&current.value, scale);
    }

    let fresh = Arc::new(Cached {
        scale,
        value: compute(scale),
    });
    slot.store(fresh);
    round_half_even(&slot.load().value, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_e_matches_known_digits() {
        assert_eq!(e(16), Decimal::from_str("2.7182818284590452").unwrap());
    }

    #[test]
    fn test_ln10_matches_known_digits() {
        assert_eq!(ln10(16), Decimal::from_str("2.3025850929940457").unwrap());
    }

    #[test]
    fn test_recompute_at_larger_scale_is_more_precise() {
        let coarse = e(8);
        let fine = e(16);
        assert_eq!(round_half_even(&fine, 8), coarse);
    }
}
