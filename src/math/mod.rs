/// Additive group capability consumed by the MSM strategies.
pub mod cyclic_group;
/// Elliptic curve points used as bases.
pub mod elliptic_curve;
/// Field elements used as scalars and curve coordinates.
pub mod field;
/// Multi-scalar multiplication strategies and their dispatcher.
pub mod msm;
/// Non-negative integers used as exponents.
pub mod unsigned_integer;
