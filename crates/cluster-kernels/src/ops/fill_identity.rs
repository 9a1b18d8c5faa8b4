// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Identity-matrix fill: `dst[i][j] = (i == j) ? 1 << frac_bits : 0`.
//!
//! The diagonal value is the fixed-point representation of 1 in the
//! caller's format (`2^fracBits` represents 1). For floating point the
//! diagonal is simply `1.0`.

use crate::shards::DisjointRows;
use crate::team::{self, TeamError};
use crate::CoreClass;
use quant_core::{FixedWord, MatViewMut};
use work_partition::StaticPartition;

/// Fills an `N×N` view with the fixed-point identity, dispatching on the
/// executing core's class.
///
/// The view must be square (`rows == cols`); the stride may exceed `N`
/// to target a sub-region, and padding columns are left untouched.
pub fn fill_identity<T: FixedWord>(dst: &mut MatViewMut<'_, T>, frac_bits: u32) {
    match CoreClass::current() {
        CoreClass::Control => fill_identity_scalar(dst, frac_bits),
        CoreClass::Cluster => fill_identity_vectorized(dst, frac_bits),
    }
}

/// Scalar variant (control core).
pub fn fill_identity_scalar<T: FixedWord>(dst: &mut MatViewMut<'_, T>, frac_bits: u32) {
    debug_assert_eq!(dst.rows(), dst.cols());
    let one = T::one_q(frac_bits);
    let n = dst.rows();
    for i in 0..n {
        let row = dst.row_mut(i);
        for (j, x) in row.iter_mut().enumerate() {
            *x = if i == j { one } else { T::ZERO };
        }
    }
}

/// Vectorized variant (cluster cores): zero the row in 4-wide chunks,
/// then patch the diagonal element. Bit-exact with the scalar variant.
pub fn fill_identity_vectorized<T: FixedWord>(dst: &mut MatViewMut<'_, T>, frac_bits: u32) {
    debug_assert_eq!(dst.rows(), dst.cols());
    let one = T::one_q(frac_bits);
    let n = dst.rows();
    for i in 0..n {
        let row = dst.row_mut(i);
        zero_row(row);
        row[i] = one;
    }
}

/// Floating-point identity fill, dispatching on the executing core's class.
pub fn fill_identity_f32(dst: &mut MatViewMut<'_, f32>) {
    debug_assert_eq!(dst.rows(), dst.cols());
    let n = dst.rows();
    // A single body serves both classes: the store pattern is identical
    // and there is no arithmetic to vectorize differently.
    for i in 0..n {
        let row = dst.row_mut(i);
        row.fill(0.0);
        row[i] = 1.0;
    }
}

/// Invocation descriptor shared read-only by all workers.
struct FillIdentityArgs<'a, T: FixedWord> {
    frac_bits: u32,
    n_pe: usize,
    dst: DisjointRows<'a, T>,
}

/// Parallel identity fill: rows are split across `n_pe` workers.
///
/// The result is identical for any worker count.
///
/// # Errors
/// Returns [`TeamError`] if the worker team cannot be launched.
pub fn fill_identity_parallel<T: FixedWord>(
    dst: &mut MatViewMut<'_, T>,
    frac_bits: u32,
    n_pe: usize,
) -> Result<(), TeamError> {
    debug_assert_eq!(dst.rows(), dst.cols());
    let args = FillIdentityArgs {
        frac_bits,
        n_pe,
        dst: DisjointRows::new(dst),
    };
    team::fork(n_pe, |core_id| fill_identity_worker(core_id, &args))
}

fn fill_identity_worker<T: FixedWord>(core_id: usize, args: &FillIdentityArgs<'_, T>) {
    let one = T::one_q(args.frac_bits);
    for i in StaticPartition::new(args.dst.rows(), args.n_pe, core_id) {
        // SAFETY: the partition assigns row i to this worker only.
        let row = unsafe { args.dst.row_mut(i) };
        zero_row(row);
        row[i] = one;
    }
}

/// 4-way unrolled zero fill.
fn zero_row<T: FixedWord>(row: &mut [T]) {
    let mut chunks = row.chunks_exact_mut(4);
    for c in &mut chunks {
        c[0] = T::ZERO;
        c[1] = T::ZERO;
        c[2] = T::ZERO;
        c[3] = T::ZERO;
    }
    for x in chunks.into_remainder() {
        *x = T::ZERO;
    }
}
