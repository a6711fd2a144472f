//! Multi-scalar multiplication.
//!
//! Assume a group G of order r is given.
//! Let `bases = [g_1, ..., g_n]` be a tuple of group points in G and
//! let `scalars = [k_1, ..., k_n]` be a tuple of scalars in the Galois field GF(r).
//!
//! Then, with additive notation, `msm(method, bases, scalars)` computes
//! k_1 * g_1 + .... + k_n * g_n, with the strategy selected by `method`.

pub mod bos_coster;
pub mod naive;
pub mod pippenger;
pub mod wnaf;

use thiserror::Error;

use self::bos_coster::{msm_bos_coster, DEFAULT_BOS_COSTER_BIT_GAP_CUTOFF};
use self::naive::{msm_naive, msm_naive_plain};
use self::pippenger::{msm_pippenger, optimal_window_width, MAX_WINDOW_WIDTH};
use self::wnaf::DEFAULT_WNAF_WINDOW_THRESHOLDS;
use crate::math::cyclic_group::IsGroup;
use crate::math::field::traits::IsScalar;

/// Batches larger than this go to the bucket method under [`MsmMethod::Auto`].
pub const DEFAULT_AUTO_BUCKET_THRESHOLD: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MSMError {
    #[error("`bases` and `scalars` must have the same length, got {0} and {1}")]
    LengthMismatch(usize, usize),
    #[error("bucket window width must be between 1 and {max}, got {0}", max = MAX_WINDOW_WIDTH)]
    InvalidWindowWidth(usize),
}

/// Strategy used to compute a multi-scalar multiplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MsmMethod {
    /// Multiplies every base by its scalar with double-and-add and adds up the results.
    NaivePlain,
    /// Like `NaivePlain`, multiplying with the windowed (wNAF) exponentiation.
    Naive,
    /// Bos–Coster heap of exponents.
    BosCoster,
    /// Bucket method (Pippenger, BDLO12).
    Pippenger,
    /// Picks one of the above from the batch size only.
    #[default]
    Auto,
}

/// Tuning parameters of the strategies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsmConfig {
    /// Bos–Coster: largest bit-length gap between the two top exponents that is
    /// still reduced by subtraction.
    pub bos_coster_bit_gap_cutoff: usize,
    /// Bucket method: window width in bits. `None` picks it from the batch size
    /// with [`optimal_window_width`].
    pub window_width: Option<usize>,
    /// Windowed exponentiation: bit lengths at which the window grows.
    pub wnaf_window_thresholds: Vec<usize>,
    /// `Auto`: batches larger than this use the bucket method.
    pub auto_bucket_threshold: usize,
}

impl Default for MsmConfig {
    fn default() -> Self {
        Self {
            bos_coster_bit_gap_cutoff: DEFAULT_BOS_COSTER_BIT_GAP_CUTOFF,
            window_width: None,
            wnaf_window_thresholds: DEFAULT_WNAF_WINDOW_THRESHOLDS.to_vec(),
            auto_bucket_threshold: DEFAULT_AUTO_BUCKET_THRESHOLD,
        }
    }
}

impl MsmConfig {
    pub fn with_bos_coster_bit_gap_cutoff(mut self, cutoff: usize) -> Self {
        self.bos_coster_bit_gap_cutoff = cutoff;
        self
    }

    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = Some(window_width);
        self
    }

    pub fn with_wnaf_window_thresholds(mut self, thresholds: Vec<usize>) -> Self {
        self.wnaf_window_thresholds = thresholds;
        self
    }

    pub fn with_auto_bucket_threshold(mut self, threshold: usize) -> Self {
        self.auto_bucket_threshold = threshold;
        self
    }

    /// Resolves `Auto` to a concrete strategy for a batch of `n` elements.
    pub fn resolve(&self, method: MsmMethod, n: usize) -> MsmMethod {
        match method {
            MsmMethod::Auto if n <= 1 => MsmMethod::NaivePlain,
            MsmMethod::Auto if n > self.auto_bucket_threshold => MsmMethod::Pippenger,
            MsmMethod::Auto => MsmMethod::BosCoster,
            method => method,
        }
    }

    /// Window width the bucket method uses for a batch of `n` elements.
    pub fn window_width_for(&self, n: usize) -> usize {
        self.window_width.unwrap_or_else(|| optimal_window_width(n))
    }
}

/// This function computes the multiscalar multiplication (MSM) with the
/// default configuration.
///
/// If `bases` and `scalars` are empty, then `msm` returns the neutral element
/// of the group.
///
/// Returns `MSMError::LengthMismatch` if `bases` and `scalars` have different
/// lengths.
pub fn msm<G, S>(method: MsmMethod, bases: &[G], scalars: &[S]) -> Result<G, MSMError>
where
    G: IsGroup,
    S: IsScalar,
{
    msm_with_config(method, bases, scalars, &MsmConfig::default())
}

/// Same as [`msm`], with explicit tuning parameters.
///
/// Every check happens before the first group operation, so an error never
/// comes with a partial result.
#[tracing::instrument(skip_all, fields(n = bases.len(), ?method))]
pub fn msm_with_config<G, S>(
    method: MsmMethod,
    bases: &[G],
    scalars: &[S],
    config: &MsmConfig,
) -> Result<G, MSMError>
where
    G: IsGroup,
    S: IsScalar,
{
    if bases.len() != scalars.len() {
        return Err(MSMError::LengthMismatch(bases.len(), scalars.len()));
    }
    if let Some(window_width) = config.window_width {
        if !(1..=MAX_WINDOW_WIDTH).contains(&window_width) {
            return Err(MSMError::InvalidWindowWidth(window_width));
        }
    }
    if bases.is_empty() {
        return Ok(G::neutral_element());
    }

    let n = bases.len();
    let exponents: Vec<S::BigInt> = scalars.iter().map(IsScalar::as_bigint).collect();
    let resolved = config.resolve(method, n);
    tracing::debug!(?resolved, "dispatching msm");

    let result = match resolved {
        MsmMethod::NaivePlain => msm_naive_plain(bases, &exponents),
        MsmMethod::Naive => msm_naive(bases, &exponents, &config.wnaf_window_thresholds),
        MsmMethod::BosCoster => msm_bos_coster(
            bases,
            exponents,
            config.bos_coster_bit_gap_cutoff,
            &config.wnaf_window_thresholds,
        ),
        MsmMethod::Pippenger => msm_pippenger(bases, &exponents, config.window_width_for(n)),
        MsmMethod::Auto => unreachable!("`resolve` never returns `Auto`"),
    };
    Ok(result)
}
