//! Natural, base-10, and arbitrary-base logarithm kernel (spec.md §4.4).
//!
//! Grounded on `dashu_float::Context::ln`/`iacoth` (`float/src/log.rs`):
//! the same shape — reduce the argument toward 1, then sum an odd-power
//! series in `z = (x-1)/(x+1)` — but reducing by repeated square roots
//! instead of dividing out powers of two, since this kernel has no binary
//! exponent to peel off, only the decimal value itself.

use bigdecimal_math_base::Error;
use num_bigint::BigInt;

use crate::constants;
use crate::decimal::{div_scale, round_half_even, Decimal};
use crate::root::sqrt;

const GUARD: i64 = 6;
/// How close `|x - 1|` must get before the series (step 3) is trusted to
/// converge quickly; spec.md §4.4 leaves the exact value free.
const REDUCTION_DELTA_EXPONENT: i64 = 2;
const MAX_HALVINGS: u32 = 4096;
const MAX_SERIES_TERMS: i64 = 100_000;

fn zero() -> Decimal {
    Decimal::from(0)
}
fn one() -> Decimal {
    Decimal::from(1)
}

/// Natural logarithm of `x`, rounded half-even to `scale` digits.
///
/// # Errors
/// Returns [`Error::non_positive_log`] if `x <= 0`.
pub fn ln(x: &Decimal, scale: i64) -> Result<Decimal, Error> {
    if *x <= zero() {
        return Err(Error::non_positive_log());
    }
    if *x == one() {
        return Ok(round_half_even(&zero(), scale));
    }

    let working_scale = scale + GUARD;
    let (reduced, halvings) = reduce_by_halving(x, working_scale);
    let sum = atanh_series(&reduced, working_scale);

    // ln(x) = 2^(halvings+1) * sum, undoing each sqrt-halving step.
    let mut result = sum;
    for _ in 0..=halvings {
        result = &result + &result;
    }
    Ok(round_half_even(&result, scale))
}

/// Base-10 logarithm of `x`: `ln(x) / ln(10)`, rounded half-even to `scale`.
///
/// # Errors
/// Returns [`Error::non_positive_log`] if `x <= 0`.
pub fn log10(x: &Decimal, scale: i64) -> Result<Decimal, Error> {
    let working_scale = scale + GUARD;
    let numerator = ln(x, working_scale)?;
    let denominator = constants::ln10(working_scale);
    Ok(round_half_even(
        &div_scale(&numerator, &denominator, working_scale),
        scale,
    ))
}

/// Logarithm of `x` in an arbitrary `base`: `ln(x) / ln(base)`.
///
/// When `base` is (within tolerance) the cached value of `e`, short-circuits
/// to [`ln`] directly, as spec.md §4.4 describes for the symbolic `strE`
/// sentinel: this crate's equivalent is simply passing [`crate::e`] (or any
/// decimal close enough to it) as `base`.
///
/// # Errors
/// Returns [`Error::invalid_base`] if `base <= 0` or `base == 1`, or
/// [`Error::non_positive_log`] if `x <= 0`.
pub fn log_n(x: &Decimal, base: &Decimal, scale: i64) -> Result<Decimal, Error> {
    if *base <= zero() || *base == one() {
        return Err(Error::invalid_base());
    }
    let working_scale = scale + GUARD;
    if is_e(base, working_scale) {
        return ln(x, scale);
    }
    let numerator = ln(x, working_scale)?;
    let denominator = ln(base, working_scale)?;
    Ok(round_half_even(
        &div_scale(&numerator, &denominator, working_scale),
        scale,
    ))
}

/// Whether `base` is close enough to the cached `e` to route through the
/// faster natural-log path. A tolerant comparison rather than exact
/// equality, since callers may pass their own decimal approximation of `e`
/// rather than the one this crate would compute at `working_scale`.
fn is_e(base: &Decimal, working_scale: i64) -> bool {
    let e = constants::e(working_scale);
    let tolerance = Decimal::new(BigInt::from(1), (working_scale - 2).max(0));
    (base - &e).abs() < tolerance
}

/// Repeatedly replace `x` with `sqrt(x)` until it is within
/// `10^-REDUCTION_DELTA_EXPONENT` of 1, returning the reduced value and the
/// number of halvings performed.
fn reduce_by_halving(x: &Decimal, working_scale: i64) -> (Decimal, u32) {
    let delta = Decimal::new(BigInt::from(1), REDUCTION_DELTA_EXPONENT);
    let mut current = x.clone();
    let mut halvings = 0u32;
    while (&current - &one()).abs() >= delta && halvings < MAX_HALVINGS {
        current = sqrt(&current, working_scale).expect("reduction operand stays positive");
        halvings += 1;
    }
    (current, halvings)
}

/// `2 * atanh((x-1)/(x+1))`, summed as `2 * Σ z^(2n+1)/(2n+1)` until the
/// next term's magnitude drops below `10^-working_scale`.
fn atanh_series(x: &Decimal, working_scale: i64) -> Decimal {
    let epsilon = Decimal::new(BigInt::from(1), working_scale);
    let z = div_scale(&(x - &one()), &(x + &one()), working_scale);
    let z_squared = round_half_even(&(&z * &z), working_scale);

    let mut power = z.clone();
    let mut sum = z;
    let mut n = 3i64;
    loop {
        power = round_half_even(&(&power * &z_squared), working_scale);
        let term = div_scale(&power, &Decimal::from(n), working_scale);
        if term.abs() < epsilon || n > MAX_SERIES_TERMS {
            break;
        }
        sum = &sum + &term;
        n += 2;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ln_fixtures() {
        assert_eq!(ln(&d("1"), 16).unwrap(), d("0.0000000000000000"));
        assert_eq!(ln(&d("2"), 16).unwrap(), d("0.6931471805599453"));
    }

    #[test]
    fn test_log10_fixture() {
        assert_eq!(log10(&d("1000"), 16).unwrap(), d("3.0000000000000000"));
    }

    #[test]
    fn test_non_positive_errors() {
        assert!(ln(&d("0"), 16).is_err());
        assert!(ln(&d("-1"), 16).is_err());
        assert!(log10(&d("-5"), 16).is_err());
    }

    #[test]
    fn test_invalid_base_errors() {
        assert!(log_n(&d("8"), &d("0"), 16).is_err());
        assert!(log_n(&d("8"), &d("1"), 16).is_err());
        assert!(log_n(&d("8"), &d("-2"), 16).is_err());
    }

    #[test]
    fn test_log_n_matches_ln_for_base_e() {
        let e = constants::e(20);
        let via_log_n = log_n(&d("5"), &e, 16).unwrap();
        let via_ln = ln(&d("5"), 16).unwrap();
        assert_eq!(via_log_n, via_ln);
    }

    #[test]
    fn test_log_n_change_of_base() {
        // log_2(8) = 3 exactly, regardless of which path is used to get there.
        let result = log_n(&d("8"), &d("2"), 16).unwrap();
        let diff = (&result - &d("3")).abs();
        assert!(diff < d("0.0000000000001"));
    }

    #[test]
    fn test_multiplicativity_property() {
        let cases = [("3", "7"), ("1.5", "200"), ("0.01", "99")];
        for (a, b) in cases {
            let (a, b) = (d(a), d(b));
            let lhs = ln(&(&a * &b), 16).unwrap();
            let rhs = &ln(&a, 16).unwrap() + &ln(&b, 16).unwrap();
            let diff = (&lhs - &rhs).abs();
            assert!(diff <= d("0.0000000000001"), "ln(ab) != ln a + ln b for {a} {b}: {diff}");
        }
    }
}
