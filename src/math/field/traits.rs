use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;

use super::errors::FieldError;
use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// A scalar that can be paired with a group element in a multi-scalar multiplication.
///
/// `as_bigint` must return the canonical non-negative representative of the
/// scalar, losslessly.
pub trait IsScalar {
    type BigInt: IsUnsignedInteger;

    fn as_bigint(&self) -> Self::BigInt;
}

macro_rules! impl_scalar_for_integer {
    ($($t:ty),*) => {$(
        impl IsScalar for $t {
            type BigInt = $t;

            fn as_bigint(&self) -> Self::BigInt {
                self.clone()
            }
        }
    )*};
}

impl_scalar_for_integer!(u64, u128, BigUint);

/// Arithmetic a base field must provide for elliptic curve points built over it.
pub trait IsFieldElement:
    Copy
    + Debug
    + Eq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;

    fn one() -> Self;

    fn from_u64(value: u64) -> Self;

    fn square(&self) -> Self {
        *self * *self
    }

    fn inv(&self) -> Result<Self, FieldError>;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
