use super::errors::EllipticCurveError;
use super::traits::IsShortWeierstrass;
use crate::math::cyclic_group::IsGroup;
use crate::math::elliptic_curve::traits::{FromAffine, IsEllipticCurve};
use crate::math::field::traits::IsFieldElement;

/// A point of a short Weierstrass curve in projective coordinates `(X : Y : Z)`.
///
/// The neutral element is any point with `Z = 0`; it is built as `(0 : 1 : 0)`.
#[derive(Clone, Debug)]
pub struct ShortWeierstrassProjectivePoint<E: IsEllipticCurve> {
    pub value: [E::BaseField; 3],
}

impl<E: IsShortWeierstrass> ShortWeierstrassProjectivePoint<E> {
    /// Creates a point from projective coordinates, checking it lies on the curve.
    pub fn new(value: [E::BaseField; 3]) -> Result<Self, EllipticCurveError> {
        let [x, y, z] = value;
        let all_zero = x.is_zero() && y.is_zero() && z.is_zero();
        if all_zero || !E::defining_equation_projective(&x, &y, &z).is_zero() {
            return Err(EllipticCurveError::InvalidPoint);
        }
        Ok(Self { value })
    }

    pub fn x(&self) -> &E::BaseField {
        &self.value[0]
    }

    pub fn y(&self) -> &E::BaseField {
        &self.value[1]
    }

    pub fn z(&self) -> &E::BaseField {
        &self.value[2]
    }

    pub fn coordinates(&self) -> &[E::BaseField; 3] {
        &self.value
    }

    /// Returns the same point with `Z = 1`, or `(0 : 1 : 0)` for the neutral element.
    pub fn to_affine(&self) -> Self {
        let [x, y, z] = self.value;
        match z.inv() {
            Ok(z_inv) => Self {
                value: [x * z_inv, y * z_inv, E::BaseField::one()],
            },
            Err(_) => Self::neutral_element(),
        }
    }

    /// Adds `self = (X1 : Y1 : Z1)` to another point given through the
    /// cross products `u1 = Y2 Z1`, `u2 = Y1 Z2`, `v1 = X2 Z1`, `v2 = X1 Z2`
    /// and `w = Z1 Z2`. Neither point may be the neutral element.
    fn add_cross_products(
        &self,
        u1: E::BaseField,
        u2: E::BaseField,
        v1: E::BaseField,
        v2: E::BaseField,
        w: E::BaseField,
    ) -> Self {
        if v1 == v2 {
            return if u1 != u2 || self.y().is_zero() {
                Self::neutral_element()
            } else {
                self.double()
            };
        }
        let two = E::BaseField::from_u64(2);
        let u = u1 - u2;
        let v = v1 - v2;
        let u_squared = u.square();
        let v_squared = v.square();
        let v_cubed = v * v_squared;
        let v_squared_x_v2 = v_squared * v2;
        let a = u_squared * w - v_cubed - two * v_squared_x_v2;
        let x = v * a;
        let y = u * (v_squared_x_v2 - a) - v_cubed * u2;
        let z = v_cubed * w;
        Self { value: [x, y, z] }
    }
}

impl<E: IsShortWeierstrass> PartialEq for ShortWeierstrassProjectivePoint<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_neutral_element(), other.is_neutral_element()) {
            (true, true) => true,
            (false, false) => {
                let [px, py, pz] = self.value;
                let [qx, qy, qz] = other.value;
                px * qz == qx * pz && py * qz == qy * pz
            }
            _ => false,
        }
    }
}

impl<E: IsShortWeierstrass> Eq for ShortWeierstrassProjectivePoint<E> {}

impl<E: IsShortWeierstrass> FromAffine<E::BaseField> for ShortWeierstrassProjectivePoint<E> {
    fn from_affine(x: E::BaseField, y: E::BaseField) -> Result<Self, EllipticCurveError> {
        Self::new([x, y, E::BaseField::one()])
    }
}

impl<E: IsShortWeierstrass> IsGroup for ShortWeierstrassProjectivePoint<E> {
    const HAS_MIXED_ADDITION: bool = true;

    fn neutral_element() -> Self {
        Self {
            value: [
                E::BaseField::zero(),
                E::BaseField::one(),
                E::BaseField::zero(),
            ],
        }
    }

    fn is_neutral_element(&self) -> bool {
        self.z().is_zero()
    }

    fn operate_with(&self, other: &Self) -> Self {
        if self.is_neutral_element() {
            return other.clone();
        }
        if other.is_neutral_element() {
            return self.clone();
        }
        let [px, py, pz] = self.value;
        let [qx, qy, qz] = other.value;
        self.add_cross_products(qy * pz, py * qz, qx * pz, px * qz, pz * qz)
    }

    fn double(&self) -> Self {
        let [x, y, z] = self.value;
        if z.is_zero() || y.is_zero() {
            return Self::neutral_element();
        }
        let two = E::BaseField::from_u64(2);
        let three = E::BaseField::from_u64(3);
        let four = E::BaseField::from_u64(4);
        let eight = E::BaseField::from_u64(8);

        let w = E::a() * z.square() + three * x.square();
        let s = y * z;
        let b = x * y * s;
        let h = w.square() - eight * b;
        let x3 = two * h * s;
        let y3 = w * (four * b - h) - eight * y.square() * s.square();
        let z3 = eight * s.square() * s;
        Self {
            value: [x3, y3, z3],
        }
    }

    fn neg(&self) -> Self {
        let [x, y, z] = self.value;
        Self { value: [x, -y, z] }
    }

    /// Mixed addition: `normalized` must have `Z = 1` or be the neutral element.
    fn operate_with_normalized(&self, normalized: &Self) -> Self {
        if normalized.is_neutral_element() {
            return self.clone();
        }
        if self.is_neutral_element() {
            return normalized.clone();
        }
        debug_assert!(*normalized.z() == E::BaseField::one());
        let [px, py, pz] = self.value;
        let [qx, qy, _] = normalized.value;
        self.add_cross_products(qy * pz, py, qx * pz, px, pz)
    }

    /// Converts every point to `Z = 1` with a single field inversion.
    fn batch_normalize(elements: &mut [Self]) {
        let mut prefix_products = Vec::with_capacity(elements.len());
        let mut acc = E::BaseField::one();
        for point in elements.iter() {
            prefix_products.push(acc);
            if !point.is_neutral_element() {
                acc = acc * *point.z();
            }
        }

        let mut acc_inv = match acc.inv() {
            Ok(inv) => inv,
            Err(_) => unreachable!("product of non-zero Z coordinates is non-zero"),
        };

        for (point, prefix) in elements.iter_mut().zip(prefix_products).rev() {
            if point.is_neutral_element() {
                *point = Self::neutral_element();
                continue;
            }
            let [x, y, z] = point.value;
            let z_inv = acc_inv * prefix;
            acc_inv = acc_inv * z;
            point.value = [x * z_inv, y * z_inv, E::BaseField::one()];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::elliptic_curve::short_weierstrass::curves::test_curve_1::{
        TestCurve1, TestCurve1PrimeField,
    };

    type Point = ShortWeierstrassProjectivePoint<TestCurve1>;
    type FE = TestCurve1PrimeField;

    fn point(k: u64) -> Point {
        TestCurve1::generator().operate_with_self(&k)
    }

    #[test]
    fn generator_is_on_the_curve() {
        let g = TestCurve1::generator();
        assert_eq!(Point::new(g.value), Ok(g));
    }

    #[test]
    fn create_invalid_point_fails() {
        assert_eq!(
            Point::from_affine(FE::new(1), FE::new(1)),
            Err(EllipticCurveError::InvalidPoint)
        );
        assert_eq!(
            Point::new([FE::new(0), FE::new(0), FE::new(0)]),
            Err(EllipticCurveError::InvalidPoint)
        );
    }

    #[test]
    fn results_of_the_group_law_stay_on_the_curve() {
        let p = point(17).operate_with(&point(5)).double();
        assert!(Point::new(p.value).is_ok());
    }

    #[test]
    fn operate_with_neutral_is_identity() {
        let g = TestCurve1::generator();
        assert_eq!(g.operate_with(&Point::neutral_element()), g);
        assert_eq!(Point::neutral_element().operate_with(&g), g);
    }

    #[test]
    fn point_plus_its_inverse_is_neutral() {
        let p = point(1234);
        assert!(p.operate_with(&p.neg()).is_neutral_element());
    }

    #[test]
    fn double_equals_operate_with_self() {
        let p = point(99);
        assert_eq!(p.double(), p.operate_with(&p));
    }

    #[test]
    fn addition_is_commutative_and_associative() {
        let (p, q, r) = (point(3), point(11), point(29));
        assert_eq!(p.operate_with(&q), q.operate_with(&p));
        assert_eq!(
            p.operate_with(&q).operate_with(&r),
            p.operate_with(&q.operate_with(&r))
        );
    }

    #[test]
    fn small_multiples_match_repeated_addition() {
        let g = TestCurve1::generator();
        let mut acc = Point::neutral_element();
        for k in 0..20u64 {
            assert_eq!(g.operate_with_self(&k), acc);
            acc = acc.operate_with(&g);
        }
    }

    #[test]
    fn equality_ignores_projective_scaling() {
        let p = point(42);
        let affine = p.to_affine();
        assert_eq!(*affine.z(), FE::one());
        assert_eq!(p, affine);
    }

    #[test]
    fn batch_normalize_keeps_points_and_neutral() {
        let original = vec![point(2), Point::neutral_element(), point(7).double(), point(123)];
        let mut normalized = original.clone();
        Point::batch_normalize(&mut normalized);
        assert_eq!(normalized, original);
        for p in normalized.iter().filter(|p| !p.is_neutral_element()) {
            assert_eq!(*p.z(), FE::one());
        }
    }

    #[test]
    fn mixed_addition_matches_projective_addition() {
        let p = point(31).double();
        let q = point(77);
        let q_affine = q.to_affine();
        assert_eq!(p.operate_with_normalized(&q_affine), p.operate_with(&q));
        assert_eq!(
            p.operate_with_normalized(&p.to_affine()),
            p.double()
        );
        assert!(p
            .operate_with_normalized(&p.neg().to_affine())
            .is_neutral_element());
    }
}
