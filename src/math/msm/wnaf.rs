use crate::math::cyclic_group::IsGroup;
use crate::math::unsigned_integer::traits::IsUnsignedInteger;

/// Bit lengths at which the windowed exponentiation switches to the next
/// window size: an exponent with at least `thresholds[i]` bits, and fewer than
/// `thresholds[i + 1]`, uses a window of `i + 2` bits. Shorter exponents use
/// plain double-and-add.
pub const DEFAULT_WNAF_WINDOW_THRESHOLDS: [usize; 4] = [11, 24, 60, 127];

/// Largest supported wNAF window.
pub const MAX_WNAF_WINDOW: usize = 16;

/// Computes the width-`window` non-adjacent form of `exponent`.
///
/// Returns little-endian signed digits `d_i` with `exponent = sum(d_i * 2^i)`.
/// Every non-zero digit is odd with `|d_i| < 2^(window - 1)`, and any two
/// non-zero digits are at least `window` positions apart. The output has
/// `exponent.bits() + 1` digits, the extra one absorbing the final carry.
pub fn find_wnaf<E: IsUnsignedInteger>(window: usize, exponent: &E) -> Vec<i64> {
    assert!(
        (2..=MAX_WNAF_WINDOW).contains(&window),
        "wNAF window must be between 2 and {MAX_WNAF_WINDOW}, got {window}"
    );
    let width = 1i64 << window;
    let len = exponent.bits() + 1;
    let mut digits = vec![0i64; len];

    let mut carry = 0i64;
    let mut pos = 0;
    while pos < len {
        let chunk = carry + exponent.window(pos, window) as i64;
        if chunk & 1 == 0 {
            pos += 1;
            continue;
        }
        if chunk < width / 2 {
            carry = 0;
            digits[pos] = chunk;
        } else {
            carry = 1;
            digits[pos] = chunk - width;
        }
        pos += window;
    }
    debug_assert_eq!(carry, 0);
    digits
}

/// Computes `exponent * base` with a width-`window` wNAF addition chain.
///
/// Precomputes the odd multiples `base, 3 base, ..., (2^(window-1) - 1) base`
/// and then doubles once per digit, adding or subtracting a table entry at
/// every non-zero digit, from the most significant digit down.
pub fn fixed_window_wnaf_exp<G: IsGroup, E: IsUnsignedInteger>(
    window: usize,
    base: &G,
    exponent: &E,
) -> G {
    let naf = find_wnaf(window, exponent);

    let table_len = 1usize << (window - 2);
    let double_base = base.double();
    let mut table = Vec::with_capacity(table_len);
    table.push(base.clone());
    for i in 1..table_len {
        let next = table[i - 1].operate_with(&double_base);
        table.push(next);
    }

    let mut result = G::neutral_element();
    let mut found_nonzero = false;
    for &digit in naf.iter().rev() {
        if found_nonzero {
            result = result.double();
        }
        if digit != 0 {
            found_nonzero = true;
            let multiple = &table[(digit.unsigned_abs() / 2) as usize];
            result = if digit > 0 {
                result.operate_with(multiple)
            } else {
                result.operate_with(&multiple.neg())
            };
        }
    }
    result
}

/// Computes `exponent * base`, choosing the wNAF window from the bit length
/// `bits` of the exponent and the given thresholds.
///
/// Exponents shorter than the first threshold go through plain double-and-add.
pub fn opt_window_wnaf_exp<G: IsGroup, E: IsUnsignedInteger>(
    base: &G,
    exponent: &E,
    bits: usize,
    thresholds: &[usize],
) -> G {
    let reached = thresholds.iter().take_while(|&&t| bits >= t).count();
    if reached == 0 {
        return base.operate_with_self(exponent);
    }
    fixed_window_wnaf_exp((reached + 1).min(MAX_WNAF_WINDOW), base, exponent)
}
