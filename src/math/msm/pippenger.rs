//! Bucket (Pippenger) multi-scalar multiplication, in the variant of page 15
//! of Bernstein, Doumen, Lange and Oosterwijk, "Faster batch forgery
//! identification", INDOCRYPT 2012 (<https://eprint.iacr.org/2012/549.pdf>).

use std::borrow::Cow;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::math::cyclic_group::IsGroup;
use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// Largest accepted window width. The bucket table holds `2^c` slots.
pub const MAX_WINDOW_WIDTH: usize = 24;

/// Window width for a batch of `n` elements: `log2(n) - (log2(n) / 3 - 2)`,
/// with `log2` rounded down, capped at [`MAX_WINDOW_WIDTH`].
pub fn optimal_window_width(n: usize) -> usize {
    // Empirically, this seems to be a decent estimate of the optimal value of c.
    let log2_length = n.checked_ilog2().unwrap_or(0) as usize;
    (log2_length - log2_length / 3 + 2).min(MAX_WINDOW_WIDTH)
}

/// Number of `window_width`-bit windows needed to cover `num_bits` bits.
pub fn num_windows(num_bits: usize, window_width: usize) -> usize {
    num_bits.div_ceil(window_width)
}

/// Digit of `exponent` in window `k`: bits `[k c, k c + c)`.
pub fn window_digit<E: IsUnsignedInteger>(exponent: &E, k: usize, window_width: usize) -> usize {
    exponent.window(k * window_width, window_width)
}

/// `2^c` buckets, each holding an accumulated base once it received a
/// contribution in the current window.
struct BucketTable<G> {
    buckets: Vec<G>,
    occupied: Vec<bool>,
}

impl<G: IsGroup> BucketTable<G> {
    fn new(window_width: usize) -> Self {
        let size = 1 << window_width;
        Self {
            buckets: vec![G::neutral_element(); size],
            occupied: vec![false; size],
        }
    }

    fn reset(&mut self) {
        self.buckets.fill(G::neutral_element());
        self.occupied.fill(false);
    }

    fn accumulate(&mut self, id: usize, base: &G) {
        if self.occupied[id] {
            self.buckets[id] = self.buckets[id].operate_with_normalized(base);
        } else {
            self.buckets[id] = base.clone();
            self.occupied[id] = true;
        }
    }

    /// Returns `sum(id * buckets[id])`, or `None` if every bucket is empty.
    ///
    /// Scanning from the top bucket down, `running_sum` holds
    /// `buckets[id] + ... + buckets[2^c - 1]`; adding it once per id weights
    /// every bucket by its id with `O(2^c)` additions.
    fn weighted_sum(&mut self) -> Option<G> {
        if G::HAS_MIXED_ADDITION {
            G::batch_normalize(&mut self.buckets);
        }

        let mut running_sum: Option<G> = None;
        let mut window_sum: Option<G> = None;
        for id in (1..self.buckets.len()).rev() {
            if self.occupied[id] {
                running_sum = Some(match running_sum {
                    Some(sum) => sum.operate_with_normalized(&self.buckets[id]),
                    None => self.buckets[id].clone(),
                });
            }
            if let Some(sum) = &running_sum {
                window_sum = Some(match window_sum {
                    Some(acc) => acc.operate_with(sum),
                    None => sum.clone(),
                });
            }
        }
        window_sum
    }

    /// Fills the buckets with the digits of window `k` and returns the
    /// weighted sum of that window.
    fn window_sum<E: IsUnsignedInteger>(
        &mut self,
        bases: &[G],
        exponents: &[E],
        k: usize,
        window_width: usize,
    ) -> Option<G> {
        self.reset();
        for (base, exponent) in bases.iter().zip(exponents) {
            let id = window_digit(exponent, k, window_width);
            if id != 0 {
                self.accumulate(id, base);
            }
        }
        self.weighted_sum()
    }
}

/// Shifts the accumulated windows up by `window_width` bits and adds the
/// next window. Nothing is doubled until the first non-empty window.
fn combine<G: IsGroup>(result: Option<G>, window: Option<G>, window_width: usize) -> Option<G> {
    let shifted = result.map(|r| (0..window_width).fold(r, |acc, _| acc.double()));
    match (shifted, window) {
        (Some(r), Some(w)) => Some(r.operate_with(&w)),
        (r, None) => r,
        (None, w) => w,
    }
}

/// Copies the bases into the canonical form `operate_with_normalized` expects,
/// when the group has such a form.
fn normalized_bases<G: IsGroup>(bases: &[G]) -> Cow<'_, [G]> {
    if G::HAS_MIXED_ADDITION {
        let mut owned = bases.to_vec();
        G::batch_normalize(&mut owned);
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(bases)
    }
}

/// Computes `sum(exponents[i] * bases[i])` with the bucket method and windows
/// of `window_width` bits.
///
/// The windows cover every bit of the longest exponent. Panics if the slices
/// have different lengths or `window_width` is not in `1..=MAX_WINDOW_WIDTH`.
#[tracing::instrument(skip_all, fields(n = bases.len(), window_width = window_width))]
pub fn msm_pippenger<G: IsGroup, E: IsUnsignedInteger>(
    bases: &[G],
    exponents: &[E],
    window_width: usize,
) -> G {
    assert_eq!(
        bases.len(),
        exponents.len(),
        "Slices `bases` and `exponents` must be of the same length to compute `msm`."
    );
    assert!(
        (1..=MAX_WINDOW_WIDTH).contains(&window_width),
        "window width must be between 1 and {MAX_WINDOW_WIDTH}"
    );

    let num_bits = exponents.iter().map(E::bits).max().unwrap_or(0);
    let num_windows = num_windows(num_bits, window_width);
    tracing::debug!(num_bits, num_windows, "bucket method parameters");
    if num_windows == 0 {
        return G::neutral_element();
    }

    let bases = normalized_bases(bases);

    #[cfg(not(feature = "parallel"))]
    let result = {
        let mut table = BucketTable::new(window_width);
        (0..num_windows).rev().fold(None, |result, k| {
            let window = table.window_sum(&bases, exponents, k, window_width);
            combine(result, window, window_width)
        })
    };

    // Windows are independent: each one gets its own bucket table.
    #[cfg(feature = "parallel")]
    let result = {
        let window_sums: Vec<Option<G>> = (0..num_windows)
            .into_par_iter()
            .map(|k| BucketTable::new(window_width).window_sum(&bases, exponents, k, window_width))
            .collect();
        window_sums
            .into_iter()
            .rev()
            .fold(None, |result, window| combine(result, window, window_width))
    };

    result.unwrap_or_else(G::neutral_element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::elliptic_curve::short_weierstrass::curves::test_curve_1::TestCurve1;
    use crate::math::elliptic_curve::short_weierstrass::point::ShortWeierstrassProjectivePoint;
    use crate::math::elliptic_curve::traits::IsEllipticCurve;
    use crate::math::field::fields::u64_prime_field::{U64FieldElement, MERSENNE_61};
    use crate::math::msm::naive::msm_naive_plain;
    use num_bigint::BigUint;
    use proptest::collection::vec;
    use proptest::prelude::*;

    const ORDER_R: u64 = 5;
    type FE = U64FieldElement<ORDER_R>;
    type FE61 = U64FieldElement<MERSENNE_61>;

    #[test]
    fn window_width_follows_the_heuristic() {
        assert_eq!(optimal_window_width(0), 2);
        assert_eq!(optimal_window_width(1), 2);
        assert_eq!(optimal_window_width(8), 4);
        assert_eq!(optimal_window_width(1 << 10), 9);
        assert_eq!(optimal_window_width(1 << 20), 16);
        assert_eq!(optimal_window_width(usize::MAX), MAX_WINDOW_WIDTH);
    }

    #[test]
    fn windows_cover_every_bit() {
        assert_eq!(num_windows(0, 3), 0);
        assert_eq!(num_windows(1, 3), 1);
        assert_eq!(num_windows(3, 3), 1);
        assert_eq!(num_windows(4, 3), 2);
        assert_eq!(num_windows(255, 16), 16);
    }

    #[test]
    fn msm_23_is_6_over_field_elements() {
        let c: [u64; 1] = [3];
        let hiding = [FE::new(2)];
        assert_eq!(msm_pippenger(&hiding, &c, 2), FE::new(6));
    }

    #[test]
    fn msm_with_c_2_3_hiding_3_4_is_18_over_elliptic_curves() {
        let c: [u64; 2] = [2, 3];
        let g = TestCurve1::generator();
        let hiding = [g.operate_with_self(&3u64), g.operate_with_self(&4u64)];
        assert_eq!(msm_pippenger(&hiding, &c, 1), g.operate_with_self(&18u64));
        assert_eq!(msm_pippenger(&hiding, &c, 3), g.operate_with_self(&18u64));
    }

    #[test]
    fn msm_with_empty_c_is_none_over_elliptic_curves() {
        let c: [u64; 0] = [];
        let hiding: [ShortWeierstrassProjectivePoint<TestCurve1>; 0] = [];
        assert_eq!(
            msm_pippenger(&hiding, &c, 4),
            ShortWeierstrassProjectivePoint::neutral_element()
        );
    }

    #[test]
    fn all_zero_exponents_give_neutral_element() {
        let g = TestCurve1::generator();
        assert!(msm_pippenger(&[g.clone(), g.double()], &[0u64, 0], 3).is_neutral_element());
    }

    #[test]
    fn top_bit_of_the_longest_exponent_is_not_dropped() {
        // 2^8 has a single set bit sitting alone in the last window.
        let g = TestCurve1::generator();
        let exponents = [1u64 << 8, 1];
        let bases = [g.clone(), g.double()];
        assert_eq!(
            msm_pippenger(&bases, &exponents, 4),
            g.operate_with_self(&258u64)
        );
    }

    #[test]
    fn weighted_sum_weights_buckets_by_id() {
        let mut table = BucketTable::<FE61>::new(3);
        table.accumulate(1, &FE61::new(10));
        table.accumulate(5, &FE61::new(100));
        table.accumulate(5, &FE61::new(1));
        table.accumulate(7, &FE61::new(1000));
        assert_eq!(table.weighted_sum(), Some(FE61::new(10 + 5 * 101 + 7 * 1000)));
        table.reset();
        assert_eq!(table.weighted_sum(), None);
    }

    #[test]
    fn mixed_addition_path_matches_naive_with_non_normalized_bases() {
        let g = TestCurve1::generator();
        let bases: Vec<_> = (1..40u64)
            .map(|k| g.operate_with_self(&k).double().operate_with(&g))
            .collect();
        let exponents: Vec<BigUint> = (1..40u64)
            .map(|k| BigUint::from(k).pow(37) + BigUint::from(k * 99))
            .collect();
        assert_eq!(
            msm_pippenger(&bases, &exponents, optimal_window_width(bases.len())),
            msm_naive_plain(&bases, &exponents)
        );
    }

    proptest! {
        #[test]
        fn window_digits_reconstruct_the_exponent(exponent in any::<u128>(), window_width in 1usize..12) {
            let windows = num_windows(exponent.bits(), window_width);
            let rebuilt = (0..windows).rev().fold(0u128, |acc, k| {
                let digit = window_digit(&exponent, k, window_width) as u128;
                (acc << window_width) | digit
            });
            prop_assert_eq!(rebuilt, exponent);
        }

        #[test]
        fn agrees_with_naive_over_field(
            pairs in vec((any::<u64>(), any::<u64>()), 0..50),
            window_width in 1usize..10,
        ) {
            let (bases, exponents): (Vec<FE61>, Vec<u64>) =
                pairs.into_iter().map(|(b, e)| (FE61::new(b), e)).unzip();
            prop_assert_eq!(
                msm_pippenger(&bases, &exponents, window_width),
                msm_naive_plain(&bases, &exponents)
            );
        }
    }
}
