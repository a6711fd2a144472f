/// Implementation of the short Weierstrass model in projective coordinates.
pub mod short_weierstrass;
/// Common behaviour for elliptic curves.
pub mod traits;
