use core::ops::{Add, Mul, Neg, Sub};

use rand::Rng;

use crate::math::cyclic_group::IsGroup;
use crate::math::field::errors::FieldError;
use crate::math::field::traits::{IsFieldElement, IsScalar};

/// The Mersenne prime `2^61 - 1`.
pub const MERSENNE_61: u64 = (1 << 61) - 1;

/// Element of the prime field of order `MODULUS`, stored as its canonical
/// representative in `[0, MODULUS)`.
///
/// `MODULUS` must be a prime smaller than `2^63`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct U64FieldElement<const MODULUS: u64> {
    value: u64,
}

impl<const MODULUS: u64> U64FieldElement<MODULUS> {
    pub const fn new(value: u64) -> Self {
        Self {
            value: value % MODULUS,
        }
    }

    /// Returns the canonical representative.
    pub const fn representative(&self) -> u64 {
        self.value
    }

    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut result = Self::new(1);
        let mut base = *self;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exponent >>= 1;
        }
        result
    }

    /// Samples a uniformly random element.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            value: rng.gen_range(0..MODULUS),
        }
    }
}

impl<const MODULUS: u64> From<u64> for U64FieldElement<MODULUS> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const MODULUS: u64> Add for U64FieldElement<MODULUS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let sum = self.value + rhs.value;
        Self {
            value: if sum >= MODULUS { sum - MODULUS } else { sum },
        }
    }
}

impl<const MODULUS: u64> Sub for U64FieldElement<MODULUS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            value: if self.value >= rhs.value {
                self.value - rhs.value
            } else {
                self.value + MODULUS - rhs.value
            },
        }
    }
}

impl<const MODULUS: u64> Mul for U64FieldElement<MODULUS> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            value: ((self.value as u128 * rhs.value as u128) % MODULUS as u128) as u64,
        }
    }
}

impl<const MODULUS: u64> Neg for U64FieldElement<MODULUS> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(0) - self
    }
}

impl<const MODULUS: u64> IsFieldElement for U64FieldElement<MODULUS> {
    fn zero() -> Self {
        Self::new(0)
    }

    fn one() -> Self {
        Self::new(1)
    }

    fn from_u64(value: u64) -> Self {
        Self::new(value)
    }

    /// Inverse by Fermat's little theorem.
    fn inv(&self) -> Result<Self, FieldError> {
        if self.value == 0 {
            return Err(FieldError::InvZeroError);
        }
        Ok(self.pow(MODULUS - 2))
    }
}

impl<const MODULUS: u64> IsScalar for U64FieldElement<MODULUS> {
    type BigInt = u64;

    fn as_bigint(&self) -> u64 {
        self.value
    }
}

/// The additive group of the field.
impl<const MODULUS: u64> IsGroup for U64FieldElement<MODULUS> {
    fn neutral_element() -> Self {
        Self::new(0)
    }

    fn operate_with(&self, other: &Self) -> Self {
        *self + *other
    }

    fn neg(&self) -> Self {
        -*self
    }
}
