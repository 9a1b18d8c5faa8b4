// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector scale: `dst[n] = round_shift(src[n] * factor, shift)`.
//!
//! For floating point the shift does not apply: `dst[n] = src[n] * factor`.
//!
//! The fixed-point product lives in the wide accumulator, is rounded and
//! shifted once, then narrowed; a result outside the output range wraps,
//! and callers choose `shift` so it does not.

use crate::shards::DisjointElems;
use crate::team::{self, TeamError};
use crate::CoreClass;
use quant_core::{FixedWord, RoundShift};
use work_partition::StaticPartition;

/// Scales `src` into `dst`, dispatching on the executing core's class.
///
/// `src` and `dst` must have equal length (the block size).
///
/// # Examples
/// ```
/// use cluster_kernels::ops::scale;
/// let src = [2i16, 4, 6];
/// let mut dst = [0i16; 3];
/// scale(&src, 3, 1, &mut dst);
/// assert_eq!(dst, [3, 6, 9]);
/// ```
pub fn scale<T: FixedWord>(src: &[T], factor: T, shift: u32, dst: &mut [T]) {
    match CoreClass::current() {
        CoreClass::Control => scale_scalar(src, factor, shift, dst),
        CoreClass::Cluster => scale_vectorized(src, factor, shift, dst),
    }
}

/// Scalar variant (control core).
pub fn scale_scalar<T: FixedWord>(src: &[T], factor: T, shift: u32, dst: &mut [T]) {
    debug_assert_eq!(src.len(), dst.len());
    let f = factor.widen();
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = T::narrow((s.widen() * f).round_shift(shift));
    }
}

/// Vectorized variant (cluster cores): 4-way unrolled main loop.
///
/// Bit-exact with [`scale_scalar`]: the per-element arithmetic is
/// identical, only the loop structure differs.
pub fn scale_vectorized<T: FixedWord>(src: &[T], factor: T, shift: u32, dst: &mut [T]) {
    debug_assert_eq!(src.len(), dst.len());
    let f = factor.widen();
    let mut s_chunks = src.chunks_exact(4);
    let mut d_chunks = dst.chunks_exact_mut(4);
    for (d, s) in (&mut d_chunks).zip(&mut s_chunks) {
        d[0] = T::narrow((s[0].widen() * f).round_shift(shift));
        d[1] = T::narrow((s[1].widen() * f).round_shift(shift));
        d[2] = T::narrow((s[2].widen() * f).round_shift(shift));
        d[3] = T::narrow((s[3].widen() * f).round_shift(shift));
    }
    for (d, &s) in d_chunks
        .into_remainder()
        .iter_mut()
        .zip(s_chunks.remainder())
    {
        *d = T::narrow((s.widen() * f).round_shift(shift));
    }
}

/// Floating-point scale, dispatching on the executing core's class.
pub fn scale_f32(src: &[f32], factor: f32, dst: &mut [f32]) {
    match CoreClass::current() {
        CoreClass::Control => scale_f32_scalar(src, factor, dst),
        CoreClass::Cluster => scale_f32_vectorized(src, factor, dst),
    }
}

/// Scalar f32 variant (control core).
pub fn scale_f32_scalar(src: &[f32], factor: f32, dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s * factor;
    }
}

/// Vectorized f32 variant (cluster cores): 4-way unrolled main loop.
///
/// Each element is a single independent multiply, so the unrolling keeps
/// results bit-identical to [`scale_f32_scalar`].
pub fn scale_f32_vectorized(src: &[f32], factor: f32, dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());
    let mut s_chunks = src.chunks_exact(4);
    let mut d_chunks = dst.chunks_exact_mut(4);
    for (d, s) in (&mut d_chunks).zip(&mut s_chunks) {
        d[0] = s[0] * factor;
        d[1] = s[1] * factor;
        d[2] = s[2] * factor;
        d[3] = s[3] * factor;
    }
    for (d, &s) in d_chunks
        .into_remainder()
        .iter_mut()
        .zip(s_chunks.remainder())
    {
        *d = s * factor;
    }
}

/// Invocation descriptor shared read-only by all workers.
struct ScaleArgs<'a, T: FixedWord> {
    src: &'a [T],
    factor: T,
    shift: u32,
    n_pe: usize,
    dst: DisjointElems<'a, T>,
}

/// Parallel scale across a team of `n_pe` workers.
///
/// Elements are split by the interleaved partition; results are identical
/// to the serial form for any worker count.
///
/// # Errors
/// Returns [`TeamError`] if the worker team cannot be launched.
pub fn scale_parallel<T: FixedWord>(
    src: &[T],
    factor: T,
    shift: u32,
    n_pe: usize,
    dst: &mut [T],
) -> Result<(), TeamError> {
    debug_assert_eq!(src.len(), dst.len());
    let args = ScaleArgs {
        src,
        factor,
        shift,
        n_pe,
        dst: DisjointElems::new(dst),
    };
    team::fork(n_pe, |core_id| scale_worker(core_id, &args))
}

fn scale_worker<T: FixedWord>(core_id: usize, args: &ScaleArgs<'_, T>) {
    let f = args.factor.widen();
    for i in StaticPartition::new(args.dst.len(), args.n_pe, core_id) {
        let v = T::narrow((args.src[i].widen() * f).round_shift(args.shift));
        // SAFETY: the partition assigns index i to this worker only.
        unsafe { args.dst.write(i, v) };
    }
}
