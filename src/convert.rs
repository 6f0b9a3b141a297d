//! Float <-> decimal bridge (spec.md §4.1).
//!
//! Both directions go through text: [`f64`]'s `Display` implementation
//! already produces the shortest round-trip decimal representation, so
//! converting a float to a decimal is "format, then parse" with no extra
//! formatting layer, and converting back is "format the decimal, then
//! parse as `f64`".

use bigdecimal_math_base::Error;
use std::str::FromStr;

use crate::decimal::Decimal;

/// Convert a binary double to the decimal with the same shortest
/// round-trip textual value.
///
/// `f` must be finite; for NaN or infinity the result is unspecified (the
/// zero decimal is returned without error, since the public signature has
/// no room for one — callers that might pass non-finite values must
/// screen them first, as spec.md §4.1 requires).
pub fn new_from_float(f: f64) -> Decimal {
    if !f.is_finite() {
        return Decimal::from(0);
    }
    Decimal::from_str(&format!("{f}")).unwrap_or_else(|_| Decimal::from(0))
}

/// Overwrite `dst` with the decimal equivalent of `f`. See
/// [`new_from_float`] for the non-finite-input caveat.
pub fn set_from_float(dst: &mut Decimal, f: f64) {
    *dst = new_from_float(f);
}

/// Convert a decimal to the nearest binary double, by printing it and
/// parsing the text as an `f64`.
///
/// Fails with [`ErrorKind::Parse`][bigdecimal_math_base::ErrorKind::Parse]
/// only if the textual form cannot be scanned as a double, which does not
/// happen for any finite decimal value produced by this crate's own
/// formatting.
pub fn float_from_dec(d: &Decimal) -> Result<f64, Error> {
    d.to_string()
        .parse::<f64>()
        .map_err(|e| Error::parse(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_round_trip_fixtures() {
        for f in [0.0_f64, -0.0, 1.0, 0.1, 123.456, -7.25, 1e300, 1e-300, f64::MIN_POSITIVE, f64::MAX] {
            let d = new_from_float(f);
            let back = float_from_dec(&d).unwrap();
            assert_eq!(back, f, "round trip failed for {f}");
        }
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let bits: u64 = rng.gen();
            let f = f64::from_bits(bits);
            if !f.is_finite() {
                continue;
            }
            let d = new_from_float(f);
            let back = float_from_dec(&d).unwrap();
            assert_eq!(back.to_bits(), f.to_bits(), "round trip failed for {f:e}");
        }
    }

    #[test]
    fn test_non_finite_is_screened_not_propagated() {
        let d = new_from_float(f64::NAN);
        assert_eq!(d, Decimal::from(0));
        let d = new_from_float(f64::INFINITY);
        assert_eq!(d, Decimal::from(0));
    }
}
