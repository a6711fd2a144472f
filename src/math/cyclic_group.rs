use core::fmt::Debug;

use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// An additive group, as consumed by the multi-scalar multiplication strategies.
///
/// Types whose elements can be brought to a shared canonical representation
/// (affine coordinates for curve points) can opt into a cheaper addition by
/// setting `HAS_MIXED_ADDITION` and overriding `batch_normalize` and
/// `operate_with_normalized`. The defaults fall back to `operate_with`.
pub trait IsGroup: Clone + PartialEq + Debug + Send + Sync {
    /// Whether `operate_with_normalized` is faster than `operate_with` for
    /// elements that went through `batch_normalize`.
    const HAS_MIXED_ADDITION: bool = false;

    /// Returns the neutral element of the group.
    fn neutral_element() -> Self;

    fn is_neutral_element(&self) -> bool {
        *self == Self::neutral_element()
    }

    /// Applies the group operation between `self` and `other`.
    fn operate_with(&self, other: &Self) -> Self;

    /// Applies the group operation between `self` and itself.
    fn double(&self) -> Self {
        self.operate_with(self)
    }

    /// Returns the inverse of `self`.
    fn neg(&self) -> Self;

    /// Applies the group operation `exponent` times with itself, using
    /// double-and-add from the most significant bit down.
    fn operate_with_self<T: IsUnsignedInteger>(&self, exponent: &T) -> Self {
        (0..exponent.bits()).rev().fold(Self::neutral_element(), |acc, i| {
            let acc = acc.double();
            if exponent.bit(i) {
                acc.operate_with(self)
            } else {
                acc
            }
        })
    }

    /// Applies the group operation between `self` and an element that went
    /// through `batch_normalize`.
    fn operate_with_normalized(&self, normalized: &Self) -> Self {
        self.operate_with(normalized)
    }

    /// Brings every element to the canonical representation expected by
    /// `operate_with_normalized`. Group equality is unaffected.
    fn batch_normalize(_elements: &mut [Self]) {}
}
