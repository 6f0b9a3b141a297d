//! Arbitrary-precision decimal transcendental and power functions.
//!
//! Extends [`bigdecimal::BigDecimal`] — which already provides addition,
//! subtraction, multiplication, integer division, comparison, and string
//! parsing/formatting — with:
//!
//! - conversions between binary floating-point and decimals ([`new_from_float`],
//!   [`set_from_float`], [`float_from_dec`]);
//! - signed [`modulo`];
//! - integer roots ([`sqrt`], [`cbrt`]);
//! - natural, base-10, and arbitrary-base logarithms ([`ln`], [`log10`],
//!   [`log_n`]);
//! - the exponential and general power functions ([`exp`], [`pow`]).
//!
//! Mirrors the split `dashu-base`/`dashu-float` use: the small trait and
//! error crate lives in [`bigdecimal_math_base`], and this crate is the
//! numeric kernel that consumes it, the same way `dashu_float` consumes
//! `dashu_base`.
//!
//! Every function is pure and deterministic: the same operands and scale
//! always produce the same result (and, for fallible functions, the same
//! error). The only process-wide state is the lock-free cache behind [`e`]
//! and [`ln10`] (spec.md §3, §5, §9).

mod constants;
mod convert;
mod decimal;
mod exp;
mod log;
mod modulo;
mod pow;
mod root;

pub use bigdecimal::BigDecimal as Decimal;
pub use bigdecimal_math_base::{Error, ErrorKind};

pub use convert::{float_from_dec, new_from_float, set_from_float};
pub use exp::exp;
pub use log::{ln, log10, log_n};
pub use modulo::modulo;
pub use pow::pow;
pub use root::{cbrt, sqrt};

/// `e`, the base of the natural logarithm, to at least `scale` fractional
/// digits (the cached constant described in spec.md §3/§9). Exposed so
/// callers can pass it as [`log_n`]'s `base` argument to select the
/// natural-log fast path explicitly, matching the "base = e" sentinel
/// spec.md §9 describes as an open convention.
pub fn e(scale: i64) -> Decimal {
    constants::e(scale)
}

/// `ln(10)`, to at least `scale` fractional digits. Exposed for the same
/// reason as [`e`]: callers composing their own base-conversion logarithms
/// can reuse the same cache [`log10`] does internally.
pub fn ln10(scale: i64) -> Decimal {
    constants::ln10(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_public_surface_smoke() {
        assert_eq!(modulo(&d("3"), &d("2")), d("1"));
        assert_eq!(sqrt(&d("100"), 16).unwrap(), d("10.0000000000000000"));
        assert_eq!(cbrt(&d("-567"), 16), d("-8.2767725291433620"));
        assert_eq!(ln(&d("2"), 16).unwrap(), d("0.6931471805599453"));
        assert_eq!(log10(&d("1000"), 16).unwrap(), d("3.0000000000000000"));
        assert_eq!(exp(&d("1"), 16), d("2.7182818284590452"));
        assert_eq!(pow(&d("2"), &d("-3"), 16).unwrap(), d("0.1250000000000000"));
    }

    #[test]
    fn test_log_n_with_e_constant() {
        let base_e = e(20);
        let via_log_n = log_n(&d("10"), &base_e, 16).unwrap();
        let via_ln = ln(&d("10"), 16).unwrap();
        assert_eq!(via_log_n, via_ln);
    }
}
