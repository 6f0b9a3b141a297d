use super::DivRem;

macro_rules! impl_div_rem_prim {
    ($($T:ty)*) => {$(
        impl DivRem for $T {
            type OutputDiv = $T;
            type OutputRem = $T;

            #[inline]
            fn div_rem(self, rhs: $T) -> ($T, $T) {
                (self / rhs, self % rhs)
            }
        }
    )*}
}
impl_div_rem_prim!(u8 u16 u32 u64 u128 usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_rem() {
        assert_eq!(23u32.div_rem(10), (2, 3));
        assert_eq!(0u64.div_rem(7), (0, 0));
    }
}
