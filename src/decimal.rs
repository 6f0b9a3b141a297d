//! Thin adapter over the external arbitrary-precision decimal primitive.
//!
//! The rest of the kernel speaks in terms of scale and half-even rounding;
//! this module is the only place that reaches into [`BigDecimal`]'s own
//! vocabulary, so the boundary between "the numeric kernel" and "the
//! decimal primitive it consumes" (spec's external collaborator split) is
//! an actual module boundary.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, BigUint, ToBigUint};
use num_traits::Zero;

/// The signed decimal type the whole kernel operates on.
pub type Decimal = BigDecimal;

/// Number of decimal digits in the integer part of `x`, counting a lone
/// leading zero as one digit. Used to size initial guesses and working
/// scales; never used to round a result, so approximate behavior for
/// exact powers of ten is fine.
pub(crate) fn integer_digit_count(x: &Decimal) -> i64 {
    let (digits, exponent) = x.as_bigint_and_exponent();
    (digit_count(&digits) - exponent).max(1)
}

fn digit_count(n: &BigInt) -> i64 {
    if n.is_zero() {
        1
    } else {
        n.abs().to_string().len() as i64
    }
}

/// `x / y` rounded half-even to `scale` fractional digits.
pub(crate) fn div_scale(x: &Decimal, y: &Decimal, scale: i64) -> Decimal {
    (x / y).with_scale_round(scale, RoundingMode::HalfEven)
}

/// Round `x` to `scale` fractional digits, half-even.
pub(crate) fn round_half_even(x: &Decimal, scale: i64) -> Decimal {
    x.with_scale_round(scale, RoundingMode::HalfEven)
}

/// Integer quotient and remainder of `x / y`, truncated toward zero, i.e.
/// `x == trunc * y + rem` with `rem` taking the sign of `x` (or zero).
pub(crate) fn trunc_div_rem(x: &Decimal, y: &Decimal) -> (Decimal, Decimal) {
    let trunc = (x / y).with_scale_round(0, RoundingMode::Down);
    let rem = x - &trunc * y;
    (trunc, rem)
}

/// Whether `x` represents an integer value, regardless of its stored scale.
pub(crate) fn is_integer_value(x: &Decimal) -> bool {
    x.is_integer()
}

/// Truncate `x` toward zero to an integer-valued decimal at scale 0.
pub(crate) fn trunc_toward_zero(x: &Decimal) -> Decimal {
    x.with_scale_round(0, RoundingMode::Down)
}

/// `base ^ exponent` by repeated squaring, rounding to `scale` after every
/// multiplication so the working value never grows past what the target
/// scale needs. `exponent` is an unsigned magnitude; callers handle sign
/// (negative exponents invert the result, see `root/pow`) separately.
pub(crate) fn binary_pow(base: &Decimal, exponent: &BigUint, scale: i64) -> Decimal {
    let mut result = Decimal::from(1);
    let mut b = round_half_even(base, scale);
    let mut e = exponent.clone();
    let two = BigUint::from(2u32);
    while e > BigUint::from(0u32) {
        if &e % &two == BigUint::from(1u32) {
            result = round_half_even(&(&result * &b), scale);
        }
        e /= &two;
        if e > BigUint::from(0u32) {
            b = round_half_even(&(&b * &b), scale);
        }
    }
    result
}

/// The unsigned magnitude of `x`, which must already be integer-valued
/// (callers check [`is_integer_value`] first). Used to turn an exponent
/// decimal into the `BigUint` that [`binary_pow`] consumes.
pub(crate) fn to_biguint_abs(x: &Decimal) -> BigUint {
    let truncated = trunc_toward_zero(x);
    let (digits, _exponent) = truncated.as_bigint_and_exponent();
    digits
        .abs()
        .to_biguint()
        .expect("magnitude of an absolute value is never negative")
}
