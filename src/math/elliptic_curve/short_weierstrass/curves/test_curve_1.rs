use crate::math::elliptic_curve::short_weierstrass::point::ShortWeierstrassProjectivePoint;
use crate::math::elliptic_curve::short_weierstrass::traits::IsShortWeierstrass;
use crate::math::elliptic_curve::traits::IsEllipticCurve;
use crate::math::field::fields::u64_prime_field::{U64FieldElement, MERSENNE_61};

/// Order of the base field of `TestCurve1`.
pub const TEST_CURVE_1_PRIME_FIELD_ORDER: u64 = MERSENNE_61;

pub type TestCurve1PrimeField = U64FieldElement<TEST_CURVE_1_PRIME_FIELD_ORDER>;

/// The curve `y^2 = x^3 + 3` over the prime field of order `2^61 - 1`.
#[derive(Clone, Debug)]
pub struct TestCurve1;

impl IsEllipticCurve for TestCurve1 {
    type BaseField = TestCurve1PrimeField;
    type PointRepresentation = ShortWeierstrassProjectivePoint<Self>;

    /// Returns the point `(1, 2)`.
    fn generator() -> Self::PointRepresentation {
        ShortWeierstrassProjectivePoint {
            value: [
                TestCurve1PrimeField::new(1),
                TestCurve1PrimeField::new(2),
                TestCurve1PrimeField::new(1),
            ],
        }
    }
}

impl IsShortWeierstrass for TestCurve1 {
    fn a() -> TestCurve1PrimeField {
        TestCurve1PrimeField::new(0)
    }

    fn b() -> TestCurve1PrimeField {
        TestCurve1PrimeField::new(3)
    }
}
