/// Concrete curves.
pub mod curves;
pub mod errors;
/// Projective point and its group law.
pub mod point;
/// Short Weierstrass curve parameters.
pub mod traits;
