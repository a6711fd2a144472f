use core::fmt::Debug;

/// A non-negative integer used as the exponent of a group element.
///
/// The MSM strategies only ever read exponents through this interface: bit
/// length, single bits, fixed-width windows, comparison and subtraction of a
/// smaller value. Implementations are expected to be lossless, so no overflow
/// class exists at this layer.
pub trait IsUnsignedInteger: Clone + Ord + Debug + Send + Sync {
    /// The integer `0`.
    fn zero() -> Self;

    /// Builds an exponent from a small literal.
    fn from_u64(value: u64) -> Self;

    fn is_zero(&self) -> bool;

    /// Number of significant bits. `0` has bit length `0`.
    fn bits(&self) -> usize;

    /// Returns bit `pos`, counting from the least significant bit.
    /// Positions at or above `bits()` read as `false`.
    fn bit(&self, pos: usize) -> bool;

    /// Computes `self -= other`.
    ///
    /// Panics if `other > self`.
    fn sub_smaller(&mut self, other: &Self);

    /// Returns the `width` bits of `self` starting at bit `offset`, as an integer.
    fn window(&self, offset: usize, width: usize) -> usize {
        debug_assert!(width < usize::BITS as usize);
        (0..width)
            .filter(|j| self.bit(offset + j))
            .fold(0, |acc, j| acc | (1 << j))
    }
}
