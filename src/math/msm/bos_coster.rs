//! Bos–Coster multi-scalar multiplication.
//!
//! The two largest pending exponents `a >= b`, attached to bases `A` and `B`,
//! are rewritten with `a A + b B = (a - b) A + b (A + B)`: one group addition
//! buys a reduction of the largest exponent. When `b` is much shorter than `a`
//! that reduction is too slow and `a A` is computed directly with a windowed
//! exponentiation instead. The loop ends once a single non-zero exponent is
//! left.
//!
//! See Bos and Coster, "Addition chain heuristics", CRYPTO '89, and
//! Bernstein, Duif, Lange, Schwabe and Yang, "High-speed high-security
//! signatures", CHES '11.

use super::wnaf::opt_window_wnaf_exp;
use crate::math::cyclic_group::IsGroup;
use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// Largest bit-length gap between the two top exponents that is still
/// considered for subtraction.
pub const DEFAULT_BOS_COSTER_BIT_GAP_CUTOFF: usize = 20;

/// Max-heap of exponents, stored as two parallel arrays: `values[i]` is an
/// exponent and `indices[i]` the position of the base it multiplies.
///
/// The heap always has odd length, so every internal node has two children.
#[derive(Debug)]
pub(crate) struct ExponentHeap<E> {
    values: Vec<E>,
    indices: Vec<usize>,
}

impl<E: IsUnsignedInteger> ExponentHeap<E> {
    /// Builds the heap. An even number of exponents gets a zero sentinel
    /// pointing at index `exponents.len()`.
    pub(crate) fn new(exponents: Vec<E>) -> Self {
        let indices = (0..exponents.len()).collect();
        let mut heap = Self {
            values: exponents,
            indices,
        };
        for pos in (0..heap.len() / 2).rev() {
            heap.sift_down(pos);
        }
        if heap.len() % 2 == 0 {
            // Zero is the minimum, so appending it keeps the heap property.
            heap.indices.push(heap.len());
            heap.values.push(E::zero());
        }
        heap
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.indices.swap(i, j);
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut largest = pos;
            if left < self.len() && self.values[left] > self.values[largest] {
                largest = left;
            }
            if right < self.len() && self.values[right] > self.values[largest] {
                largest = right;
            }
            if largest == pos {
                return;
            }
            self.swap(pos, largest);
            pos = largest;
        }
    }

    /// Position of the second largest exponent: the larger child of the root.
    fn second(&self) -> usize {
        if self.values[1] < self.values[2] {
            2
        } else {
            1
        }
    }

    /// Restores the heap property after the root was decreased: the root is
    /// pushed all the way down along the larger children, then sifted back up.
    fn restore_root(&mut self) {
        let mut pos = 0;
        while 2 * pos + 2 < self.len() {
            let child = if self.values[2 * pos + 1] < self.values[2 * pos + 2] {
                2 * pos + 2
            } else {
                2 * pos + 1
            };
            self.swap(pos, child);
            pos = child;
        }
        while pos > 0 && self.values[(pos - 1) / 2] < self.values[pos] {
            self.swap(pos, (pos - 1) / 2);
            pos = (pos - 1) / 2;
        }
    }

    /// `values[0] -= values[pos]`.
    fn subtract_from_root(&mut self, pos: usize) {
        let (root, rest) = self.values.split_at_mut(1);
        root[0].sub_smaller(&rest[pos - 1]);
    }

    #[cfg(test)]
    pub(crate) fn is_max_heap(&self) -> bool {
        (1..self.len()).all(|i| self.values[(i - 1) / 2] >= self.values[i])
    }
}

/// Computes `sum(exponents[i] * bases[i])` with the Bos–Coster heuristic.
///
/// `bit_gap_cutoff` bounds the bit-length gap used to decide between one more
/// subtraction and a direct exponentiation of the top exponent.
///
/// Panics if `bases` and `exponents` have different lengths.
#[tracing::instrument(skip_all, fields(n = bases.len()))]
pub fn msm_bos_coster<G: IsGroup, E: IsUnsignedInteger>(
    bases: &[G],
    exponents: Vec<E>,
    bit_gap_cutoff: usize,
    wnaf_window_thresholds: &[usize],
) -> G {
    bos_coster_with_inspector(
        bases,
        exponents,
        bit_gap_cutoff,
        wnaf_window_thresholds,
        |_| {},
    )
}

/// Runs Bos–Coster, handing the heap to `inspect` after every restoration.
pub(crate) fn bos_coster_with_inspector<G, E, F>(
    bases: &[G],
    exponents: Vec<E>,
    bit_gap_cutoff: usize,
    wnaf_window_thresholds: &[usize],
    mut inspect: F,
) -> G
where
    G: IsGroup,
    E: IsUnsignedInteger,
    F: FnMut(&ExponentHeap<E>),
{
    assert_eq!(
        bases.len(),
        exponents.len(),
        "Slices `bases` and `exponents` must be of the same length to compute `msm`."
    );
    match bases.len() {
        0 => return G::neutral_element(),
        1 => {
            let exponent = &exponents[0];
            return opt_window_wnaf_exp(
                &bases[0],
                exponent,
                exponent.bits(),
                wnaf_window_thresholds,
            );
        }
        _ => {}
    }

    let mut heap = ExponentHeap::new(exponents);
    let mut g = bases.to_vec();
    if g.len() < heap.len() {
        g.push(G::neutral_element());
    }
    assert!(
        heap.len() % 2 == 1 && heap.len() >= 3 && heap.len() == g.len(),
        "Bos-Coster heap lost its padded shape"
    );

    let mut result = G::neutral_element();
    let mut subtractions = 0usize;
    let mut exponentiations = 0usize;
    loop {
        let b_pos = heap.second();
        let a_idx = heap.indices[0];
        let abits = heap.values[0].bits();

        if heap.values[b_pos].is_zero() {
            let last = opt_window_wnaf_exp(&g[a_idx], &heap.values[0], abits, wnaf_window_thresholds);
            result = result.operate_with(&last);
            exponentiations += 1;
            break;
        }

        let bbits = heap.values[b_pos].bits();
        let limit = bit_gap_cutoff.min(abits - bbits);
        let b_is_short = 1usize
            .checked_shl(limit as u32)
            .map_or(true, |bound| bbits < bound);

        if b_is_short {
            // Exponentiating by `a` now is cheaper than subtracting `b` from it
            // many times over.
            let term = opt_window_wnaf_exp(&g[a_idx], &heap.values[0], abits, wnaf_window_thresholds);
            result = result.operate_with(&term);
            heap.values[0] = E::zero();
            exponentiations += 1;
        } else {
            // x A + y B => (x - y) A + y (A + B)
            let b_idx = heap.indices[b_pos];
            heap.subtract_from_root(b_pos);
            g[b_idx] = g[b_idx].operate_with(&g[a_idx]);
            subtractions += 1;
        }

        heap.restore_root();
        inspect(&heap);
    }

    tracing::debug!(subtractions, exponentiations, "bos-coster finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::elliptic_curve::short_weierstrass::curves::test_curve_1::TestCurve1;
    use crate::math::elliptic_curve::traits::IsEllipticCurve;
    use crate::math::field::fields::u64_prime_field::U64FieldElement;
    use crate::math::msm::naive::msm_naive_plain;
    use crate::math::msm::wnaf::DEFAULT_WNAF_WINDOW_THRESHOLDS;
    use num_bigint::BigUint;
    use proptest::collection::vec;
    use proptest::prelude::*;

    const P: u64 = 1_000_003;
    type FE = U64FieldElement<P>;

    fn bos_coster<G: IsGroup, E: IsUnsignedInteger>(bases: &[G], exponents: Vec<E>) -> G {
        msm_bos_coster(
            bases,
            exponents,
            DEFAULT_BOS_COSTER_BIT_GAP_CUTOFF,
            &DEFAULT_WNAF_WINDOW_THRESHOLDS,
        )
    }

    #[test]
    fn heap_pads_even_input_with_zero_sentinel() {
        let heap = ExponentHeap::new(vec![3u64, 9, 4, 1]);
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.values[0], 9);
        assert_eq!(heap.indices[0], 1);
        assert!(heap.indices.contains(&4));
        assert!(heap.is_max_heap());
    }

    #[test]
    fn heap_keeps_odd_input_unpadded() {
        let heap = ExponentHeap::new(vec![5u64, 2, 8]);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.values[0], 8);
        assert_eq!(heap.indices[0], 2);
        assert_eq!(heap.second(), 2);
    }

    #[test]
    fn restore_root_after_decrease_keeps_heap_property() {
        let mut heap = ExponentHeap::new((1..=15u64).collect());
        heap.values[0] = 7;
        heap.restore_root();
        assert!(heap.is_max_heap());
        assert_eq!(heap.values[0], 14);
    }

    #[test]
    fn empty_input_is_neutral() {
        let bases: [FE; 0] = [];
        assert_eq!(bos_coster(&bases, Vec::<u64>::new()), FE::new(0));
    }

    #[test]
    fn single_element_is_scalar_multiplication() {
        let g = TestCurve1::generator();
        let exponent = BigUint::from(0xdead_beef_u64) << 100usize;
        assert_eq!(
            bos_coster(&[g.clone()], vec![exponent.clone()]),
            g.operate_with_self(&exponent)
        );
    }

    #[test]
    fn equal_exponents_collapse_into_one_base() {
        let g = TestCurve1::generator();
        let bases = vec![g.clone(), g.double(), g.operate_with_self(&5u64)];
        let expected = g.operate_with_self(&(1000u64 * 8));
        assert_eq!(bos_coster(&bases, vec![1000u64, 1000, 1000]), expected);
    }

    #[test]
    fn widely_spread_exponents_take_the_direct_exponentiation_path() {
        let g = TestCurve1::generator();
        let bases = vec![g.clone(), g.double(), g.operate_with_self(&3u64)];
        let exponents = vec![u128::MAX, 3, 1 << 40];
        assert_eq!(
            bos_coster(&bases, exponents.clone()),
            msm_naive_plain(&bases, &exponents)
        );
    }

    #[test]
    fn zero_cutoff_reduces_by_subtraction_only() {
        let bases: Vec<FE> = (1..8).map(FE::new).collect();
        let exponents: Vec<u64> = (1..8).map(|k| k * 77_777).collect();
        assert_eq!(
            msm_bos_coster(&bases, exponents.clone(), 0, &DEFAULT_WNAF_WINDOW_THRESHOLDS),
            msm_naive_plain(&bases, &exponents)
        );
    }

    #[test]
    fn zero_exponents_are_skipped() {
        let g = TestCurve1::generator();
        let bases = vec![g.clone(), g.double(), g.operate_with_self(&7u64), g.neg()];
        let exponents = vec![0u64, 0, 9, 0];
        assert_eq!(bos_coster(&bases, exponents), g.operate_with_self(&63u64));
    }

    proptest! {
        #[test]
        fn heap_property_holds_after_every_iteration(exponents in vec(any::<u64>(), 2..40)) {
            let bases: Vec<FE> = (0..exponents.len() as u64).map(|i| FE::new(i * 31 + 7)).collect();
            let mut checked = 0usize;
            let result = bos_coster_with_inspector(
                &bases,
                exponents.clone(),
                DEFAULT_BOS_COSTER_BIT_GAP_CUTOFF,
                &DEFAULT_WNAF_WINDOW_THRESHOLDS,
                |heap| {
                    assert!(heap.is_max_heap());
                    checked += 1;
                },
            );
            prop_assert_eq!(result, msm_naive_plain(&bases, &exponents));
            prop_assert!(checked > 0 || exponents.iter().filter(|e| **e != 0).count() <= 1);
        }

        #[test]
        fn agrees_with_naive_over_field(pairs in vec((any::<u64>(), any::<u64>()), 0..30)) {
            let (bases, exponents): (Vec<FE>, Vec<u64>) =
                pairs.into_iter().map(|(b, e)| (FE::new(b), e)).unzip();
            prop_assert_eq!(bos_coster(&bases, exponents.clone()), msm_naive_plain(&bases, &exponents));
        }

        #[test]
        fn agrees_with_naive_for_clustered_exponents(offsets in vec(0u64..1024, 2..20)) {
            let g = TestCurve1::generator();
            let bases: Vec<_> = (1..=offsets.len() as u64).map(|k| g.operate_with_self(&k)).collect();
            let exponents: Vec<u64> = offsets.iter().map(|o| (1 << 50) + o).collect();
            prop_assert_eq!(bos_coster(&bases, exponents.clone()), msm_naive_plain(&bases, &exponents));
        }
    }
}
