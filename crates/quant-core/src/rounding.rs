// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Round-to-nearest right bit-shift.
//!
//! Fixed-point kernels keep intermediate products and sums at a wide
//! accumulator width and rescale them into the output representation with
//! a single rounding shift: if the inputs carry `x` and `y` fractional
//! bits, a result shifted right by `s` bits carries `x + y - s`.
//!
//! The shift rounds to nearest by adding `2^(s-1)` before truncating. The
//! bias add wraps on overflow; choosing `s` so that no overflow occurs is
//! the caller's contract, and no saturation or detection is performed.

/// Arithmetic right shift by `shift` bits with round-to-nearest.
///
/// For `shift == 0` this is the identity: a pure truncating path with no
/// rounding bias.
///
/// # Examples
/// ```
/// use quant_core::RoundShift;
/// assert_eq!(5i32.round_shift(1), 3);
/// assert_eq!((-5i32).round_shift(1), -2);
/// assert_eq!(7i64.round_shift(0), 7);
/// ```
pub trait RoundShift: Copy {
    fn round_shift(self, shift: u32) -> Self;
}

macro_rules! impl_round_shift {
    ($($t:ty),*) => {$(
        impl RoundShift for $t {
            #[inline(always)]
            fn round_shift(self, shift: u32) -> Self {
                debug_assert!(shift < <$t>::BITS, "shift {shift} exceeds accumulator width");
                if shift == 0 {
                    self
                } else {
                    // Round to nearest: add half the final ULP, then
                    // sign-propagating shift. Wrapping add per contract.
                    self.wrapping_add(1 << (shift - 1)) >> shift
                }
            }
        }
    )*};
}

impl_round_shift!(i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_zero_is_identity() {
        for x in [-17i32, -1, 0, 1, 42, i32::MAX, i32::MIN] {
            assert_eq!(x.round_shift(0), x);
        }
    }

    #[test]
    fn test_rounds_to_nearest_positive() {
        assert_eq!(5i32.round_shift(1), 3); // 2.5 -> 3
        assert_eq!(4i32.round_shift(1), 2);
        assert_eq!(6i32.round_shift(2), 2); // 1.5 -> 2
        assert_eq!(12i32.round_shift(1), 6);
        assert_eq!(18i32.round_shift(1), 9);
    }

    #[test]
    fn test_rounds_to_nearest_negative() {
        // Ties resolve toward +inf: -2.5 -> -2, matching the
        // add-half-then-truncate definition.
        assert_eq!((-5i32).round_shift(1), -2);
        assert_eq!((-4i32).round_shift(1), -2);
        assert_eq!((-6i32).round_shift(2), -1); // -1.5 -> -1
    }

    #[test]
    fn test_enumerated_small_pairs() {
        // Exhaustive check against the reference definition over a small grid.
        for x in -64i32..=64 {
            for s in 1u32..=6 {
                let expected = (x + (1 << (s - 1))) >> s;
                assert_eq!(x.round_shift(s), expected, "x={x}, s={s}");
            }
        }
    }

    #[test]
    fn test_i64_matches_i32_in_range() {
        for x in [-1000i32, -5, 0, 5, 1000] {
            for s in 0u32..=8 {
                assert_eq!((x as i64).round_shift(s), x.round_shift(s) as i64);
            }
        }
    }

    #[test]
    fn test_bias_add_wraps() {
        // The bias add near the top of the range wraps rather than
        // saturating; the result is still defined.
        let near_max = i32::MAX - 1;
        let _ = near_max.round_shift(4); // must not panic in release semantics
    }
}
