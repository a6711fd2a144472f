/// Curve `y^2 = x^3 + 3` over the Mersenne field `2^61 - 1`, for testing.
pub mod test_curve_1;
