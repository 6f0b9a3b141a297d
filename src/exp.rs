//! Exponential kernel: `e^x` (spec.md §4.5).
//!
//! Grounded on the fuller (non-stub) `dashu_float` exponential
//! (`float/src/exp.rs`'s documented `exp_internal` shape): split the
//! argument, Taylor-expand the small remainder, recompose by
//! exponentiating the reduction unit. spec.md's split is simpler than
//! dashu's — integer part / sub-one fractional remainder, recomposed by
//! multiplying cached powers of `e` rather than by repeated squaring of the
//! series result — and that's the specified algorithm implemented here; the
//! dashu file is grounding for structure (guard-digit budgeting, a
//! termination test on successive partial sums), not for the exact
//! decomposition.

use num_bigint::BigInt;

use crate::constants;
use crate::decimal::{binary_pow, div_scale, round_half_even, to_biguint_abs, trunc_toward_zero, Decimal};

const GUARD: i64 = 6;

fn zero() -> Decimal {
    Decimal::from(0)
}
fn one() -> Decimal {
    Decimal::from(1)
}

/// `e^x`, rounded half-even to `scale` digits. Defined for every finite
/// `x`; this kernel has no notion of "too large" by itself — [`crate::pow`]
/// is the caller that screens extreme magnitudes before reaching here.
pub fn exp(x: &Decimal, scale: i64) -> Decimal {
    if *x == zero() {
        return round_half_even(&one(), scale);
    }

    let k = trunc_toward_zero(x);
    let f = x - &k;
    let working_scale = scale + GUARD + magnitude_guard(&k);

    let e_to_f = exp_series(&f, working_scale);
    let result = if k == zero() {
        e_to_f
    } else {
        let e_to_k = exp_integer_part(&k, working_scale);
        round_half_even(&(&e_to_f * &e_to_k), working_scale)
    };
    round_half_even(&result, scale)
}

/// `e^k` for an integer-valued `k`, via binary exponentiation of the cached
/// `e` (spec.md §4.5 step 4), inverting when `k < 0`.
fn exp_integer_part(k: &Decimal, working_scale: i64) -> Decimal {
    let base = constants::e(working_scale);
    let magnitude = to_biguint_abs(k);
    let powered = binary_pow(&base, &magnitude, working_scale);
    if *k < zero() {
        div_scale(&one(), &powered, working_scale)
    } else {
        powered
    }
}

/// Extra guard digits proportional to `|k|`: splitting off a large integer
/// part means `e^k` (or its reciprocal) carries roughly that many digits of
/// magnitude that the final rounding to `scale` must not eat into.
fn magnitude_guard(k: &Decimal) -> i64 {
    crate::decimal::integer_digit_count(k).max(0)
}

/// `e^f = Σ f^n / n!`, summed until the next term's magnitude drops below
/// `10^-working_scale`. Used both for `exp`'s fractional remainder (where
/// `|f| < 1`, so convergence is fast) and, with `f = 1`, to seed the cached
/// value of `e` itself (spec.md §3, §9) without depending on that cache.
pub(crate) fn exp_series(f: &Decimal, working_scale: i64) -> Decimal {
    let epsilon = Decimal::new(BigInt::from(1), working_scale);
    let mut term = one();
    let mut sum = one();
    let mut n: i64 = 1;
    loop {
        term = div_scale(&(&term * f), &Decimal::from(n), working_scale);
        if term.abs() < epsilon {
            break;
        }
        sum = &sum + &term;
        n += 1;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::ln;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exp_fixtures() {
        assert_eq!(exp(&d("1"), 16), d("2.7182818284590452"));
        assert_eq!(exp(&d("0.0001"), 16), d("1.0001000050001667"));
    }

    #[test]
    fn test_exp_zero() {
        assert_eq!(exp(&d("0"), 16), d("1.0000000000000000"));
    }

    #[test]
    fn test_exp_negative() {
        let positive = exp(&d("2"), 16);
        let negative = exp(&d("-2"), 16);
        let product = round_half_even(&(&positive * &negative), 10);
        assert_eq!(product, d("1.0000000000"));
    }

    #[test]
    fn test_log_exp_inverse_property() {
        for x in ["1", "2", "0.5", "100", "0.001"] {
            let x = d(x);
            let round_trip = exp(&ln(&x, 20).unwrap(), 20);
            let diff = (&round_trip - &x).abs();
            let bound = d("0.00000000000000001") * (&x.abs() + &d("1"));
            assert!(diff <= bound, "exp(ln({x})) too imprecise: {diff}");
        }
    }
}
