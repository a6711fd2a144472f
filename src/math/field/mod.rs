/// Errors raised by field arithmetic.
pub mod errors;
/// Implementation of particular cases of fields.
pub mod fields;
/// Common behaviour for field elements and scalars.
pub mod traits;
