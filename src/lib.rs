pub mod math;

use math::elliptic_curve::short_weierstrass::{
    curves::test_curve_1::{TestCurve1, TestCurve1PrimeField},
    point::ShortWeierstrassProjectivePoint,
};

pub use math::cyclic_group::IsGroup;
pub use math::field::traits::IsScalar;
pub use math::msm::{msm, msm_with_config, MSMError, MsmConfig, MsmMethod};
pub use math::unsigned_integer::traits::IsUnsignedInteger;

pub type G1Point = ShortWeierstrassProjectivePoint<TestCurve1>;

pub type FE = TestCurve1PrimeField;
