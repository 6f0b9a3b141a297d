//! Trait definitions for operations related to rings (integer/polynomial/etc.)

/// Compute quotient and remainder at the same time.
///
/// # Example
/// ```
/// use bigdecimal_math_base::DivRem;
/// assert_eq!(23.div_rem(10), (2, 3));
/// ```
pub trait DivRem<Rhs = Self> {
    type OutputDiv;
    type OutputRem;

    fn div_rem(self, rhs: Rhs) -> (Self::OutputDiv, Self::OutputRem);
}

/// Compute the roots (square root, cubic root and arbitrary n-th roots)
pub trait RootRem {
    type Output;

    fn nth_root_rem(self, n: usize) -> (Self::Output, Self::Output);
    fn sqrt_rem(self) -> (Self::Output, Self::Output);
    fn cbrt_rem(self) -> (Self::Output, Self::Output);
}

mod div_rem;
mod root;
