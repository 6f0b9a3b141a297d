//! Power kernel: `x^y` (spec.md §4.6).
//!
//! Dispatches between an exact integer-exponent fast path (binary
//! exponentiation, reusing [`crate::decimal::binary_pow`] the same way
//! [`crate::root`] reuses it) and a fractional fallback through
//! `exp(y * ln(x), scale)`, guarded against materializing an unreasonable
//! number of digits.

use num_bigint::BigUint;

use crate::convert::float_from_dec;
use crate::decimal::{binary_pow, div_scale, integer_digit_count, is_integer_value, round_half_even, to_biguint_abs, Decimal};
use crate::exp::exp;
use crate::log::ln;
use bigdecimal_math_base::Error;

const GUARD: i64 = 6;
/// Digit budget the fractional path is willing to materialize before
/// giving up, independent of the requested scale (spec.md §4.6: "order of
/// 10^5 digits"). The scale-proportional term makes the guard scale-aware,
/// as the spec requires.
const MAX_RESULT_DIGITS: f64 = 100_000.0;
const SCALE_BUDGET_FACTOR: f64 = 8.0;
/// Budget for the negative-integer-exponent fast path: `scale -
/// INTEGER_GUARD_OFFSET` digits of reciprocal magnitude. Unlike the
/// fractional path's budget, this one starts tight and only opens up as
/// `scale` grows, which is what pins `pow(2, -38, 16)` to
/// [`Error::argument_too_large`] while `pow(2, -38, 32)` succeeds (spec.md
/// §4.6, §8 seed scenario 6, §9 — see DESIGN.md).
const INTEGER_GUARD_OFFSET: i64 = 10;

fn zero() -> Decimal {
    Decimal::from(0)
}
fn one() -> Decimal {
    Decimal::from(1)
}

/// `x^y`, rounded half-even to `scale` digits.
///
/// # Errors
/// - [`Error::zero_to_negative`] for `pow(0, y)` with `y < 0`.
/// - [`Error::negative_to_non_integer`] for `pow(x, y)` with `x < 0` and
///   `y` not an integer.
/// - [`Error::argument_too_large`] if the result would require
///   materializing an unreasonable number of digits.
pub fn pow(x: &Decimal, y: &Decimal, scale: i64) -> Result<Decimal, Error> {
    if *y == zero() {
        // 0^0 = 1 by convention (spec.md §4.6 test fixture).
        return Ok(round_half_even(&one(), scale));
    }
    if *x == zero() {
        return if *y > zero() {
            Ok(round_half_even(&zero(), scale))
        } else {
            Err(Error::zero_to_negative())
        };
    }
    if *x < zero() && !is_integer_value(y) {
        return Err(Error::negative_to_non_integer());
    }
    if is_integer_value(y) {
        if *y < zero() {
            check_negative_integer_overflow(x, y, scale)?;
        }
        return Ok(integer_power(x, y, scale));
    }

    check_overflow(x, y, scale)?;
    let working_scale = scale + GUARD;
    let ln_x = ln(x, working_scale)?;
    let exponent = round_half_even(&(y * &ln_x), working_scale);
    Ok(round_half_even(&exp(&exponent, working_scale), scale))
}

/// `x^y` for an integer-valued `y`, by binary exponentiation on `|x|`,
/// re-signing per the even/odd exponent rule, and inverting for `y < 0`.
fn integer_power(x: &Decimal, y: &Decimal, scale: i64) -> Decimal {
    let magnitude = to_biguint_abs(y);
    let negative_exponent = *y < zero();
    let working_scale = if negative_exponent { scale + GUARD } else { scale };

    let powered = binary_pow(&x.abs(), &magnitude, working_scale);
    let signed = if *x < zero() && is_odd(&magnitude) {
        -powered
    } else {
        powered
    };

    if negative_exponent {
        round_half_even(&div_scale(&one(), &signed, working_scale), scale)
    } else {
        round_half_even(&signed, scale)
    }
}

fn is_odd(n: &BigUint) -> bool {
    n % &BigUint::from(2u32) == BigUint::from(1u32)
}

/// Reject before computing the fractional path if the result would need an
/// unreasonable number of digits, estimating `|y * log10(|x|)|` per
/// spec.md §4.6. The budget grows (loosely) with `scale`, matching the
/// spec's "the guard ... is scale-aware" requirement.
fn check_overflow(x: &Decimal, y: &Decimal, scale: i64) -> Result<(), Error> {
    let estimate = estimate_magnitude(x, y);
    let budget = MAX_RESULT_DIGITS + scale as f64 * SCALE_BUDGET_FACTOR;
    if !estimate.is_finite() || estimate > budget {
        return Err(Error::argument_too_large());
    }
    Ok(())
}

/// Same screen as [`check_overflow`], but for a negative integer exponent
/// headed for [`integer_power`]'s invert-and-divide step rather than the
/// `ln`/`exp` fallback. The two paths fail for different reasons — this one
/// is about whether `1 / x^|y|` can be materialized to `scale` digits at
/// all, not about the cost of a transcendental series — so it gets its own,
/// much tighter budget rather than reusing [`check_overflow`]'s.
fn check_negative_integer_overflow(x: &Decimal, y: &Decimal, scale: i64) -> Result<(), Error> {
    let estimate = estimate_magnitude(x, y);
    let budget = (scale - INTEGER_GUARD_OFFSET) as f64;
    if !estimate.is_finite() || estimate > budget {
        return Err(Error::argument_too_large());
    }
    Ok(())
}

/// Cheap estimate of `|y * log10(|x|)|`: roughly how many digits `x^y`'s
/// magnitude sits away from 1.
fn estimate_magnitude(x: &Decimal, y: &Decimal) -> f64 {
    let log10_abs_x = estimate_log10_abs(x);
    let y_f = float_from_dec(y).unwrap_or(f64::INFINITY);
    (y_f * log10_abs_x).abs()
}

/// Cheap estimate of `log10(|x|)`, via the float bridge where it converts
/// cleanly and falling back to the decimal's own digit count (which is
/// exact for the integer-part magnitude but coarse for `|x| < 1`) when it
/// doesn't.
fn estimate_log10_abs(x: &Decimal) -> f64 {
    match float_from_dec(&x.abs()) {
        Ok(f) if f.is_finite() && f > 0.0 => f.log10(),
        _ => (integer_digit_count(x) - 1) as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_pow_fixtures() {
        assert_eq!(pow(&d("2"), &d("-3"), 16).unwrap(), d("0.1250000000000000"));
        assert_eq!(pow(&d("-3"), &d("2"), 16).unwrap(), d("9.0000000000000000"));
        assert_eq!(pow(&d("0"), &d("0"), 16).unwrap(), d("1.0000000000000000"));
    }

    #[test]
    fn test_pow_exact_integer_power_huge_base() {
        let x = d("9223372036854775807123.1");
        let expected = d("85070591730234615849667701979706147052698553.61");
        assert_eq!(pow(&x, &d("2"), 16).unwrap(), expected);
    }

    #[test]
    fn test_pow_negative_base_odd_exponent_preserves_sign() {
        let x = d("-9223372036854775807123.1");
        let expected = d("-784637716923335095255678472236230098075796571287653754351907705219.391");
        assert_eq!(pow(&x, &d("3"), 16).unwrap(), expected);
    }

    #[test]
    fn test_zero_to_negative_errors() {
        let err = pow(&d("0"), &d("-1"), 16).unwrap_err();
        assert_eq!(err.to_string(), "zero raised to a negative power is undefined");
    }

    #[test]
    fn test_negative_to_non_integer_errors() {
        let err = pow(&d("-1"), &d("-0.1"), 16).unwrap_err();
        assert_eq!(
            err.to_string(),
            "a negative number raised to a non-integer power yields a complex result"
        );
    }

    #[test]
    fn test_integer_path_matches_repeated_multiplication() {
        let x = d("1.5");
        let direct = pow(&x, &d("4"), 16).unwrap();
        let repeated = round_half_even(&(&(&(&x * &x) * &x) * &x), 16);
        assert_eq!(direct, repeated);
    }

    #[test]
    fn test_negative_integer_power_overflow_is_scale_dependent() {
        // spec.md §4.6, §8 seed scenario 6, §9: this is the spec's pinned
        // example of the negative-integer-exponent guard rejecting at a
        // small scale and succeeding at a larger one for the *same*
        // operands — not a monotonic "bigger scale needs more digits,
        // therefore rejects more often" rule.
        let err = pow(&d("2"), &d("-38"), 16).unwrap_err();
        assert_eq!(err.to_string(), "argument too large");

        let result = pow(&d("2"), &d("-38"), 32).unwrap();
        assert_eq!(result, d("0.00000000000363797880709171295166"));
    }

    #[test]
    fn test_aliasing_irrelevant_since_functions_are_pure() {
        // This kernel has no destination-aliasing concept of its own (see
        // DESIGN.md): every function returns a fresh value, so calling
        // twice with the same operands always agrees with itself.
        let a = pow(&d("3.14"), &d("9.604"), 16).unwrap();
        let b = pow(&d("3.14"), &d("9.604"), 16).unwrap();
        assert_eq!(a, b);
    }
}
