// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-point element types and their wide accumulators.
//!
//! Every narrow element type is paired with an accumulator of at least
//! double its width, so reduction loops can sum full-precision products
//! and apply the rounding shift exactly once at the end:
//!
//! | Element | Accumulator |
//! |---------|-------------|
//! | `i8`    | `i32`       |
//! | `i16`   | `i32`       |
//! | `i32`   | `i64`       |
//!
//! Narrowing back to the element width truncates per two's complement;
//! a value outside the representable range wraps. Choosing the shift so
//! that results fit is the caller's contract.

use crate::RoundShift;
use core::fmt::Debug;
use core::ops::{Add, Mul};

/// Contract for wide accumulator types.
///
/// An accumulator supports full-width add and multiply plus the final
/// [`RoundShift`] rescale.
pub trait Wide:
    Copy + PartialEq + Debug + Add<Output = Self> + Mul<Output = Self> + RoundShift
{
    const ZERO: Self;
    const ONE: Self;

    /// Left shift, wrapping on overflow.
    fn shl(self, bits: u32) -> Self;
}

macro_rules! impl_wide {
    ($($t:ty),*) => {$(
        impl Wide for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn shl(self, bits: u32) -> Self {
                self.wrapping_shl(bits)
            }
        }
    )*};
}

impl_wide!(i32, i64);

/// A narrow fixed-point element type.
///
/// `2^fracBits` represents the value 1; the trait itself is agnostic to
/// where the binary point sits; it only fixes the widen/narrow pair and
/// the accumulator width.
pub trait FixedWord: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Accumulator type, at least double the element width.
    type Acc: Wide;

    const ZERO: Self;

    /// Sign-extends into the accumulator width.
    fn widen(self) -> Self::Acc;

    /// Truncating two's-complement narrow back to the element width.
    /// Wraps rather than saturating.
    fn narrow(acc: Self::Acc) -> Self;

    /// The fixed-point representation of the value 1: `1 << frac_bits`,
    /// narrowed. A `frac_bits` at or beyond the element width wraps like
    /// any other narrowing.
    #[inline(always)]
    fn one_q(frac_bits: u32) -> Self {
        Self::narrow(Self::Acc::ONE.shl(frac_bits))
    }
}

macro_rules! impl_fixed_word {
    ($($t:ty => $acc:ty),*) => {$(
        impl FixedWord for $t {
            type Acc = $acc;

            const ZERO: Self = 0;

            #[inline(always)]
            fn widen(self) -> $acc {
                self as $acc
            }

            #[inline(always)]
            fn narrow(acc: $acc) -> Self {
                acc as $t
            }
        }
    )*};
}

impl_fixed_word!(i8 => i32, i16 => i32, i32 => i64);
