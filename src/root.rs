//! Integer-root kernel: square root and cube root (spec.md §4.3).
//!
//! Both use Newton iteration at an adaptive working scale, seeded from an
//! integer root of the decimal's (suitably shifted) unscaled integer via
//! `RootRem` (see `base/src/ring/root.rs`, copied from `dashu-base`'s own
//! ring traits) whenever the significand fits a `u128`/`u64`.

use bigdecimal_math_base::{Error, RootRem};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::decimal::{div_scale, integer_digit_count, round_half_even, Decimal};

/// Extra digits of working precision carried past the requested scale.
const GUARD: i64 = 6;
/// Generous bound on Newton iterations; quadratic convergence means any
/// realistic working scale converges in a small fraction of this.
const MAX_ITERS: u32 = 512;

fn zero() -> Decimal {
    Decimal::from(0)
}

/// `sqrt(x)` rounded half-even to `scale` digits.
///
/// # Errors
/// Returns [`Error::negative_arg`] if `x < 0`.
pub fn sqrt(x: &Decimal, scale: i64) -> Result<Decimal, Error> {
    if *x < zero() {
        return Err(Error::negative_arg());
    }
    if *x == zero() {
        return Ok(round_half_even(&zero(), scale));
    }

    let working_scale = scale + GUARD;
    let seed = seed_sqrt(x);
    let root = newton(
        working_scale,
        seed,
        |z, ws| {
            let inv = div_scale(x, z, ws + GUARD);
            div_scale(&(z + inv), &Decimal::from(2), ws)
        },
        scale,
    );
    Ok(round_half_even(&root, scale))
}

/// `cbrt(x)` rounded half-even to `scale` digits. Defined for all `x`,
/// including negative values: `cbrt(-x) = -cbrt(x)`.
pub fn cbrt(x: &Decimal, scale: i64) -> Decimal {
    if *x == zero() {
        return round_half_even(&zero(), scale);
    }
    let negative = *x < zero();
    let abs_x = if negative { -x } else { x.clone() };

    let working_scale = scale + GUARD;
    let seed = seed_cbrt(&abs_x);
    let three = Decimal::from(3);
    let root = newton(
        working_scale,
        seed,
        |z, ws| {
            let z_sq = z * z;
            let inv = div_scale(&abs_x, &z_sq, ws + GUARD);
            div_scale(&(&(z * Decimal::from(2)) + &inv), &three, ws)
        },
        scale,
    );
    let root = round_half_even(&root, scale);
    if negative {
        -root
    } else {
        root
    }
}

/// Shared Newton loop: `step(current, working_scale)` produces the next
/// iterate. Stops when two consecutive iterates agree at `result_scale`, or
/// when they differ by less than `10^-working_scale`, whichever comes
/// first, matching the termination rule spec.md §4.3 describes for both
/// `Sqrt` and `Cbrt`.
fn newton(
    working_scale: i64,
    seed: Decimal,
    step: impl Fn(&Decimal, i64) -> Decimal,
    result_scale: i64,
) -> Decimal {
    let epsilon = Decimal::new(BigInt::from(1), working_scale);
    let mut z = seed;
    for _ in 0..MAX_ITERS {
        let next = step(&z, working_scale);
        let diff = if next > z { &next - &z } else { &z - &next };
        let converged_at_result_scale =
            round_half_even(&next, result_scale) == round_half_even(&z, result_scale);
        z = next;
        if diff < epsilon || converged_at_result_scale {
            break;
        }
    }
    z
}

/// Seed Newton's iteration for `sqrt(x)`, `x > 0`, by normalizing the
/// decimal's exponent to even parity and taking the integer square root of
/// the (possibly truncated) significand.
fn seed_sqrt(x: &Decimal) -> Decimal {
    let (digits, exponent) = x.as_bigint_and_exponent();
    let (digits, exponent) = if exponent.rem_euclid(2) != 0 {
        (digits * BigInt::from(10), exponent + 1)
    } else {
        (digits, exponent)
    };

    match digits.to_u128() {
        Some(u) => {
            let (root, _) = u.sqrt_rem();
            Decimal::new(BigInt::from(root), exponent / 2)
        }
        None => magnitude_seed(x),
    }
}

/// Seed Newton's iteration for `cbrt(x)`, `x > 0`, analogously with
/// exponent normalized to a multiple of three.
fn seed_cbrt(x: &Decimal) -> Decimal {
    let (digits, exponent) = x.as_bigint_and_exponent();
    let adjust = match exponent.rem_euclid(3) {
        0 => 0,
        r => 3 - r,
    };
    let (digits, exponent) = if adjust == 0 {
        (digits, exponent)
    } else {
        (digits * BigInt::from(10i64.pow(adjust as u32)), exponent + adjust)
    };

    match digits.to_u64() {
        Some(u) => {
            let (root, _) = u.cbrt_rem();
            Decimal::new(BigInt::from(root), exponent / 3)
        }
        None => magnitude_seed(x),
    }
}

/// Magnitude-only fallback seed for operands whose significand doesn't fit
/// the fast integer-root path. Any positive value of roughly the right
/// order of magnitude works: Newton converges to the same fixed point, just
/// in a few more iterations.
fn magnitude_seed(x: &Decimal) -> Decimal {
    let half_digits = (integer_digit_count(x) / 2).max(1);
    Decimal::new(BigInt::from(1), -half_digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sqrt_fixtures() {
        assert_eq!(sqrt(&d("100"), 16).unwrap(), d("10.0000000000000000"));
        assert_eq!(
            sqrt(&d("2454495034"), 16).unwrap(),
            d("49542.8605754653613946")
        );
    }

    #[test]
    fn test_sqrt_negative_errors() {
        assert!(sqrt(&d("-1"), 16).is_err());
    }

    #[test]
    fn test_cbrt_fixture() {
        assert_eq!(cbrt(&d("-567"), 16), d("-8.2767725291433620"));
    }

    #[test]
    fn test_cbrt_sign_symmetry() {
        let x = d("1234.5678");
        assert_eq!(cbrt(&(-&x), 16), -cbrt(&x, 16));
    }

    #[test]
    fn test_sqrt_correctness_property() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n: u32 = rng.gen_range(1..1_000_000_000);
            let x = Decimal::from(n);
            let root = sqrt(&x, 16).unwrap();
            let err = (&root * &root - &x).abs();
            let bound = Decimal::new(BigInt::from(1), 16) * (Decimal::from(1) + &x);
            assert!(err <= bound, "sqrt({n}) too imprecise: err={err}");
        }
    }
}
