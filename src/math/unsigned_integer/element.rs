use num_bigint::BigUint;
use num_traits::Zero;

use super::traits::IsUnsignedInteger;

macro_rules! impl_unsigned_integer_for_primitive {
    ($($t:ty),*) => {$(
        impl IsUnsignedInteger for $t {
            fn zero() -> Self {
                0
            }

            fn from_u64(value: u64) -> Self {
                value as $t
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn bits(&self) -> usize {
                (<$t>::BITS - self.leading_zeros()) as usize
            }

            fn bit(&self, pos: usize) -> bool {
                pos < <$t>::BITS as usize && (self >> pos) & 1 == 1
            }

            fn sub_smaller(&mut self, other: &Self) {
                assert!(*other <= *self, "exponent subtraction underflow");
                *self -= *other;
            }

            fn window(&self, offset: usize, width: usize) -> usize {
                debug_assert!(width < usize::BITS as usize);
                if offset >= <$t>::BITS as usize {
                    return 0;
                }
                let mask: $t = if width >= <$t>::BITS as usize {
                    <$t>::MAX
                } else {
                    (1 << width) - 1
                };
                ((self >> offset) & mask) as usize
            }
        }
    )*};
}

impl_unsigned_integer_for_primitive!(u64, u128);

impl IsUnsignedInteger for BigUint {
    fn zero() -> Self {
        <BigUint as Zero>::zero()
    }

    fn from_u64(value: u64) -> Self {
        BigUint::from(value)
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn bits(&self) -> usize {
        BigUint::bits(self) as usize
    }

    fn bit(&self, pos: usize) -> bool {
        BigUint::bit(self, pos as u64)
    }

    fn sub_smaller(&mut self, other: &Self) {
        // `BigUint` subtraction panics on underflow.
        *self -= other;
    }
}
