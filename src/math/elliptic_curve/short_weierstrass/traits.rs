use core::fmt::Debug;

use crate::math::elliptic_curve::traits::IsEllipticCurve;
use crate::math::field::traits::IsFieldElement;

/// Trait to add elliptic curves behaviour to a struct.
/// The curve equation is `y^2 = x^3 + a * x + b`.
pub trait IsShortWeierstrass: IsEllipticCurve + Clone + Debug + Send + Sync {
    /// `a` coefficient for the equation `y^2 = x^3 + a * x + b`.
    fn a() -> Self::BaseField;

    /// `b` coefficient for the equation `y^2 = x^3 + a * x + b`.
    fn b() -> Self::BaseField;

    /// Evaluates `y^2 z - x^3 - a x z^2 - b z^3`, which vanishes exactly on
    /// projective points of the curve.
    fn defining_equation_projective(
        x: &Self::BaseField,
        y: &Self::BaseField,
        z: &Self::BaseField,
    ) -> Self::BaseField {
        y.square() * *z
            - x.square() * *x
            - Self::a() * *x * z.square()
            - Self::b() * z.square() * *z
    }
}
