use rand::Rng;

use super::short_weierstrass::errors::EllipticCurveError;
use crate::math::cyclic_group::IsGroup;
use crate::math::field::traits::IsFieldElement;

pub trait IsEllipticCurve {
    /// Field over which the curve coordinates live.
    type BaseField: IsFieldElement;

    /// Group element type used to represent points of the curve.
    type PointRepresentation: IsGroup + FromAffine<Self::BaseField>;

    /// Returns a fixed generator of the curve group.
    fn generator() -> Self::PointRepresentation;

    /// Builds a point from affine coordinates, checking it lies on the curve.
    fn create_point_from_affine(
        x: Self::BaseField,
        y: Self::BaseField,
    ) -> Result<Self::PointRepresentation, EllipticCurveError> {
        Self::PointRepresentation::from_affine(x, y)
    }

    /// Returns a random multiple of the generator.
    fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Self::PointRepresentation {
        Self::generator().operate_with_self(&rng.gen::<u64>())
    }
}

pub trait FromAffine<F>: Sized {
    fn from_affine(x: F, y: F) -> Result<Self, EllipticCurveError>;
}
