use itertools::Itertools;

use super::wnaf::opt_window_wnaf_exp;
use crate::math::cyclic_group::IsGroup;
use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// Computes `sum(exponents[i] * bases[i])` by multiplying each base with
/// double-and-add and accumulating from left to right.
///
/// Panics if `bases` and `exponents` have different lengths.
#[tracing::instrument(skip_all, fields(n = bases.len()))]
pub fn msm_naive_plain<G: IsGroup, E: IsUnsignedInteger>(bases: &[G], exponents: &[E]) -> G {
    bases
        .iter()
        .zip_eq(exponents)
        .fold(G::neutral_element(), |acc, (base, exponent)| {
            acc.operate_with(&base.operate_with_self(exponent))
        })
}

/// Same as [`msm_naive_plain`], but every term goes through the windowed
/// exponentiation primitive.
///
/// Panics if `bases` and `exponents` have different lengths.
#[tracing::instrument(skip_all, fields(n = bases.len()))]
pub fn msm_naive<G: IsGroup, E: IsUnsignedInteger>(
    bases: &[G],
    exponents: &[E],
    wnaf_window_thresholds: &[usize],
) -> G {
    bases
        .iter()
        .zip_eq(exponents)
        .fold(G::neutral_element(), |acc, (base, exponent)| {
            let term = opt_window_wnaf_exp(base, exponent, exponent.bits(), wnaf_window_thresholds);
            acc.operate_with(&term)
        })
}
