/// Implementations of the exponent capability for primitive and big integers.
pub mod element;
/// Common behaviour for non-negative integer exponents.
pub mod traits;
