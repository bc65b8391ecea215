// This code is part of paulidecomp.
//
// (C) Copyright the paulidecomp developers 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

//! Bit-twiddling primitives shared by all the decomposition kernels.
//!
//! None of these functions check their preconditions outside of debug builds.  The kernels only
//! ever call them with arguments that satisfy the documented domain by construction (for example,
//! adjacent Gray codes always differ in exactly one bit).

/// The exact base-2 logarithm of `x`, which must be a power of two.
///
/// This is a branchless fold over five mask tests.  Each mask has a one in exactly those bit
/// positions whose index has the corresponding bit set, so testing the single set bit of `x`
/// against all five spells out its index.  The return value is unspecified for any `x` that is
/// not a power of two.
#[inline(always)]
pub fn log2_pow2(x: u32) -> u32 {
    debug_assert!(x.is_power_of_two());
    let mut r = ((x & 0xAAAA_AAAA) != 0) as u32;
    r |= (((x & 0xFFFF_0000) != 0) as u32) << 4;
    r |= (((x & 0xFF00_FF00) != 0) as u32) << 3;
    r |= (((x & 0xF0F0_F0F0) != 0) as u32) << 2;
    r |= (((x & 0xCCCC_CCCC) != 0) as u32) << 1;
    r
}

/// The `k`th reflected binary Gray code.  `gray_code(k)` and `gray_code(k - 1)` differ in exactly
/// one bit.
#[inline(always)]
pub fn gray_code(k: usize) -> usize {
    k ^ (k >> 1)
}

/// Bit `t` of `n`, as `0` or `1`.
#[inline(always)]
pub fn bit_at(n: usize, t: u32) -> usize {
    (n >> t) & 1
}

/// The index of the single bit in which `i` and `j` differ.
///
/// Only valid if `i ^ j` is a power of two that fits in 32 bits, which is always true for two
/// adjacent Gray codes of a matrix index.
#[inline(always)]
pub fn changed_bit(i: usize, j: usize) -> u32 {
    debug_assert!((i ^ j) <= u32::MAX as usize);
    log2_pow2((i ^ j) as u32)
}

/// Spread the low `num_bits` bits of `x` into the even bit positions of the output (Morton
/// encoding with zeros interlaced), so `0b1011` becomes `0b100_0101`.
#[inline]
pub fn interlace_zeros(x: usize, num_bits: u32) -> usize {
    (0..num_bits)
        .filter(|&s| x & (1 << s) != 0)
        .fold(0, |acc, s| acc | (1 << (2 * s)))
}

/// The inverse of [interlace_zeros]: gather the even bits of `x` (up to bit `2 * (num_bits - 1)`)
/// into the low `num_bits` bits of the output.  Odd bits of the input are ignored.
#[inline]
pub fn compact_even_bits(x: usize, num_bits: u32) -> usize {
    (0..num_bits).fold(0, |acc, s| acc | (bit_at(x, 2 * s) << s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log2_of_every_power_of_two() {
        for k in 0..32 {
            assert_eq!(log2_pow2(1 << k), k);
        }
    }

    #[test]
    fn adjacent_gray_codes_change_one_bit() {
        for k in 1..(1 << 10) {
            let (i, j) = (gray_code(k), gray_code(k - 1));
            assert_eq!((i ^ j).count_ones(), 1);
            assert_eq!(1 << changed_bit(i, j), i ^ j);
        }
    }

    #[test]
    fn gray_code_is_a_bijection() {
        let num_bits = 8;
        let mut seen = vec![false; 1 << num_bits];
        for k in 0..(1 << num_bits) {
            let code = gray_code(k);
            assert!(!seen[code]);
            seen[code] = true;
        }
    }

    #[test]
    fn bit_at_reads_single_bits() {
        assert_eq!(bit_at(0b1010, 0), 0);
        assert_eq!(bit_at(0b1010, 1), 1);
        assert_eq!(bit_at(0b1010, 3), 1);
        assert_eq!(bit_at(0b1010, 40), 0);
    }

    #[test]
    fn interlace_known_value() {
        assert_eq!(interlace_zeros(0b1011, 4), 0b100_0101);
        assert_eq!(interlace_zeros(0, 4), 0);
        // Bits above `num_bits` are not spread.
        assert_eq!(interlace_zeros(0b111, 2), 0b101);
    }

    #[test]
    fn compact_undoes_interlace() {
        let num_bits = 6;
        for x in 0..(1 << num_bits) {
            let spread = interlace_zeros(x, num_bits);
            assert_eq!(compact_even_bits(spread, num_bits), x);
            assert_eq!(compact_even_bits(spread << 1, num_bits), 0);
        }
    }
}
