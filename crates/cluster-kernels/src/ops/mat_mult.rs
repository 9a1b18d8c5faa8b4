// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Strided matrix multiply:
//! `C[m][o] = round_shift(Σ_n A[m][n] * B[n][o], shift)`.
//!
//! `A` is `M×N`, `B` is `N×O`, `C` is `M×O`; each view carries its own
//! row stride, so any operand may be a sub-region of a larger matrix.
//!
//! The reduction runs entirely at accumulator width; the rounding shift
//! and the narrowing are applied exactly once per output element, never
//! per term. Both variants accumulate `n = 0..N` in order, so results are
//! bit-identical across variants for floats as well as integers.

use crate::shards::DisjointRows;
use crate::team::{self, TeamError};
use crate::CoreClass;
use quant_core::{FixedWord, MatView, MatViewMut, RoundShift, Wide};
use work_partition::StaticPartition;

fn check_dims<T>(a: &MatView<'_, T>, b: &MatView<'_, T>, dst: &MatViewMut<'_, T>) {
    debug_assert_eq!(a.cols(), b.rows(), "inner dimensions must agree");
    debug_assert_eq!(dst.rows(), a.rows());
    debug_assert_eq!(dst.cols(), b.cols());
}

/// Multiplies `a` by `b` into `dst`, dispatching on the executing core's
/// class.
///
/// # Examples
/// ```
/// use cluster_kernels::ops::mat_mult;
/// use quant_core::{MatView, MatViewMut};
///
/// let a = [1i16, 2, 3, 4];
/// let b = [5i16, 6, 7, 8];
/// let mut c = [0i16; 4];
/// mat_mult(
///     &MatView::from_slice(&a, 2, 2).unwrap(),
///     &MatView::from_slice(&b, 2, 2).unwrap(),
///     0,
///     &mut MatViewMut::from_slice(&mut c, 2, 2).unwrap(),
/// );
/// assert_eq!(c, [19, 22, 43, 50]);
/// ```
pub fn mat_mult<T: FixedWord>(
    a: &MatView<'_, T>,
    b: &MatView<'_, T>,
    shift: u32,
    dst: &mut MatViewMut<'_, T>,
) {
    match CoreClass::current() {
        CoreClass::Control => mat_mult_scalar(a, b, shift, dst),
        CoreClass::Cluster => mat_mult_vectorized(a, b, shift, dst),
    }
}

/// Scalar variant (control core).
pub fn mat_mult_scalar<T: FixedWord>(
    a: &MatView<'_, T>,
    b: &MatView<'_, T>,
    shift: u32,
    dst: &mut MatViewMut<'_, T>,
) {
    check_dims(a, b, dst);
    for m in 0..a.rows() {
        mat_mult_row(a.row(m), b, shift, dst.row_mut(m));
    }
}

/// One output row: the shared reduction body.
///
/// Serial, parallel, and scalar paths all funnel through this, keeping
/// the accumulation order identical everywhere.
fn mat_mult_row<T: FixedWord>(a_row: &[T], b: &MatView<'_, T>, shift: u32, out: &mut [T]) {
    for (o, slot) in out.iter_mut().enumerate() {
        let mut sum = T::Acc::ZERO;
        for (n, &av) in a_row.iter().enumerate() {
            sum = sum + av.widen() * b.at(n, o).widen();
        }
        *slot = T::narrow(sum.round_shift(shift));
    }
}

/// Vectorized variant (cluster cores): two output columns per pass share
/// one traversal of the `A` row and the `B` rows.
///
/// Each `(m, o)` accumulator still sums `n` in order, so the result is
/// bit-exact with [`mat_mult_scalar`].
pub fn mat_mult_vectorized<T: FixedWord>(
    a: &MatView<'_, T>,
    b: &MatView<'_, T>,
    shift: u32,
    dst: &mut MatViewMut<'_, T>,
) {
    check_dims(a, b, dst);
    let o_cols = b.cols();
    for m in 0..a.rows() {
        let a_row = a.row(m);
        let out = dst.row_mut(m);
        let mut o = 0;
        while o + 2 <= o_cols {
            let mut s0 = T::Acc::ZERO;
            let mut s1 = T::Acc::ZERO;
            for (n, &av) in a_row.iter().enumerate() {
                let av = av.widen();
                let b_row = b.row(n);
                s0 = s0 + av * b_row[o].widen();
                s1 = s1 + av * b_row[o + 1].widen();
            }
            out[o] = T::narrow(s0.round_shift(shift));
            out[o + 1] = T::narrow(s1.round_shift(shift));
            o += 2;
        }
        if o < o_cols {
            let mut sum = T::Acc::ZERO;
            for (n, &av) in a_row.iter().enumerate() {
                sum = sum + av.widen() * b.at(n, o).widen();
            }
            out[o] = T::narrow(sum.round_shift(shift));
        }
    }
}

/// Floating-point matrix multiply, dispatching on the executing core's
/// class. No shift applies; accumulation is in `f32`.
pub fn mat_mult_f32(a: &MatView<'_, f32>, b: &MatView<'_, f32>, dst: &mut MatViewMut<'_, f32>) {
    match CoreClass::current() {
        CoreClass::Control => mat_mult_f32_scalar(a, b, dst),
        CoreClass::Cluster => mat_mult_f32_vectorized(a, b, dst),
    }
}

/// Scalar f32 variant (control core).
pub fn mat_mult_f32_scalar(
    a: &MatView<'_, f32>,
    b: &MatView<'_, f32>,
    dst: &mut MatViewMut<'_, f32>,
) {
    check_dims(a, b, dst);
    for m in 0..a.rows() {
        let a_row = a.row(m);
        let out = dst.row_mut(m);
        for (o, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (n, &av) in a_row.iter().enumerate() {
                sum += av * b.at(n, o);
            }
            *slot = sum;
        }
    }
}

/// Vectorized f32 variant (cluster cores): two columns per pass, `n`
/// summed in order per accumulator, bit-exact with the scalar variant.
pub fn mat_mult_f32_vectorized(
    a: &MatView<'_, f32>,
    b: &MatView<'_, f32>,
    dst: &mut MatViewMut<'_, f32>,
) {
    check_dims(a, b, dst);
    let o_cols = b.cols();
    for m in 0..a.rows() {
        let a_row = a.row(m);
        let out = dst.row_mut(m);
        let mut o = 0;
        while o + 2 <= o_cols {
            let mut s0 = 0.0f32;
            let mut s1 = 0.0f32;
            for (n, &av) in a_row.iter().enumerate() {
                let b_row = b.row(n);
                s0 += av * b_row[o];
                s1 += av * b_row[o + 1];
            }
            out[o] = s0;
            out[o + 1] = s1;
            o += 2;
        }
        if o < o_cols {
            let mut sum = 0.0f32;
            for (n, &av) in a_row.iter().enumerate() {
                sum += av * b.at(n, o);
            }
            out[o] = sum;
        }
    }
}

/// Invocation descriptor shared read-only by all workers.
struct MatMultArgs<'a, T: FixedWord> {
    a: MatView<'a, T>,
    b: MatView<'a, T>,
    shift: u32,
    n_pe: usize,
    dst: DisjointRows<'a, T>,
}

/// Parallel strided matrix multiply: output rows are split across `n_pe`
/// workers. Results are identical to the serial form for any worker
/// count.
///
/// # Errors
/// Returns [`TeamError`] if the worker team cannot be launched.
pub fn mat_mult_parallel<T: FixedWord>(
    a: &MatView<'_, T>,
    b: &MatView<'_, T>,
    shift: u32,
    n_pe: usize,
    dst: &mut MatViewMut<'_, T>,
) -> Result<(), TeamError> {
    check_dims(a, b, dst);
    let args = MatMultArgs {
        a: *a,
        b: *b,
        shift,
        n_pe,
        dst: DisjointRows::new(dst),
    };
    team::fork(n_pe, |core_id| mat_mult_worker(core_id, &args))
}

fn mat_mult_worker<T: FixedWord>(core_id: usize, args: &MatMultArgs<'_, T>) {
    for m in StaticPartition::new(args.dst.rows(), args.n_pe, core_id) {
        // SAFETY: the partition assigns output row m to this worker only.
        let out = unsafe { args.dst.row_mut(m) };
        mat_mult_row(args.a.row(m), &args.b, args.shift, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_core::{MatView, MatViewMut};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Full-precision reference: plain dot product in i64, one narrow at
    /// the end.
    fn reference_i16(a: &[i16], b: &[i16], m: usize, n: usize, o: usize, shift: u32) -> Vec<i16> {
        let mut c = vec![0i16; m * o];
        for mi in 0..m {
            for oi in 0..o {
                let mut sum: i64 = 0;
                for ni in 0..n {
                    sum += a[mi * n + ni] as i64 * b[ni * o + oi] as i64;
                }
                let rounded = if shift == 0 {
                    sum
                } else {
                    (sum + (1i64 << (shift - 1))) >> shift
                };
                c[mi * o + oi] = rounded as i16;
            }
        }
        c
    }

    #[test]
    fn test_known_answer_2x2() {
        let a = [1i16, 2, 3, 4];
        let b = [5i16, 6, 7, 8];
        let mut c = [0i16; 4];
        mat_mult_scalar(
            &MatView::from_slice(&a, 2, 2).unwrap(),
            &MatView::from_slice(&b, 2, 2).unwrap(),
            0,
            &mut MatViewMut::from_slice(&mut c, 2, 2).unwrap(),
        );
        assert_eq!(c, [19, 22, 43, 50]);
    }

    #[test]
    fn test_matches_reference_shift_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(m, n, o) in &[(1usize, 1usize, 1usize), (2, 3, 4), (5, 5, 5), (4, 7, 3)] {
            let a: Vec<i16> = (0..m * n).map(|_| rng.gen_range(-50..=50)).collect();
            let b: Vec<i16> = (0..n * o).map(|_| rng.gen_range(-50..=50)).collect();
            let mut c = vec![0i16; m * o];
            mat_mult_scalar(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                0,
                &mut MatViewMut::from_slice(&mut c, m, o).unwrap(),
            );
            assert_eq!(c, reference_i16(&a, &b, m, n, o, 0), "{m}x{n}x{o}");
        }
    }

    #[test]
    fn test_rounds_once_not_per_term() {
        // Two terms of 3 each: per-term rounding at shift=1 would give
        // 2 + 2 = 4; full-width accumulation gives (3 + 3 + 1) >> 1 = 3.
        let a = [1i16, 1];
        let b = [3i16, 3];
        let mut c = [0i16; 1];
        mat_mult_scalar(
            &MatView::from_slice(&a, 1, 2).unwrap(),
            &MatView::from_slice(&b, 2, 1).unwrap(),
            1,
            &mut MatViewMut::from_slice(&mut c, 1, 1).unwrap(),
        );
        assert_eq!(c, [3]);
    }

    #[test]
    fn test_variants_bit_exact_fuzz() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let m = rng.gen_range(0..6);
            let n = rng.gen_range(0..6);
            let o = rng.gen_range(0..7);
            let shift = rng.gen_range(0..8);
            let a: Vec<i16> = (0..m * n).map(|_| rng.gen_range(-200..=200)).collect();
            let b: Vec<i16> = (0..n * o).map(|_| rng.gen_range(-200..=200)).collect();

            let mut c_scalar = vec![0i16; m * o];
            mat_mult_scalar(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                shift,
                &mut MatViewMut::from_slice(&mut c_scalar, m, o).unwrap(),
            );

            let mut c_vec = vec![0i16; m * o];
            mat_mult_vectorized(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                shift,
                &mut MatViewMut::from_slice(&mut c_vec, m, o).unwrap(),
            );

            assert_eq!(c_scalar, c_vec, "m={m} n={n} o={o} shift={shift}");
        }
    }

    #[test]
    fn test_f32_variants_bit_exact() {
        let mut rng = StdRng::seed_from_u64(9);
        for &(m, n, o) in &[(2usize, 3usize, 5usize), (3, 4, 1), (1, 6, 2)] {
            let a: Vec<f32> = (0..m * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let b: Vec<f32> = (0..n * o).map(|_| rng.gen_range(-1.0..1.0)).collect();

            let mut c_scalar = vec![0.0f32; m * o];
            mat_mult_f32_scalar(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                &mut MatViewMut::from_slice(&mut c_scalar, m, o).unwrap(),
            );

            let mut c_vec = vec![0.0f32; m * o];
            mat_mult_f32_vectorized(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                &mut MatViewMut::from_slice(&mut c_vec, m, o).unwrap(),
            );

            let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&c_scalar), bits(&c_vec), "{m}x{n}x{o}");
        }
    }

    #[test]
    fn test_strided_operands() {
        // A and C live in stride-4 buffers; B is tight. Same numbers as
        // the 2x2 known-answer case; padding is untouched.
        let a_buf = [1i16, 2, -1, -1, 3, 4, -1, -1];
        let b = [5i16, 6, 7, 8];
        let mut c_buf = [9i16; 8];
        mat_mult_scalar(
            &MatView::new(&a_buf, 2, 2, 4).unwrap(),
            &MatView::from_slice(&b, 2, 2).unwrap(),
            0,
            &mut MatViewMut::new(&mut c_buf, 2, 2, 4).unwrap(),
        );
        assert_eq!(c_buf, [19, 22, 9, 9, 43, 50, 9, 9]);
    }

    #[test]
    fn test_zero_dimension_is_noop() {
        let a: [i16; 0] = [];
        let b: [i16; 0] = [];
        let mut c: [i16; 0] = [];
        mat_mult_scalar(
            &MatView::from_slice(&a, 0, 3).unwrap(),
            &MatView::from_slice(&b, 3, 0).unwrap(),
            2,
            &mut MatViewMut::from_slice(&mut c, 0, 0).unwrap(),
        );
        // N = 0: every output is round_shift(0, shift) = 0.
        let mut c1 = [7i16; 4];
        mat_mult_scalar(
            &MatView::from_slice(&a, 2, 0).unwrap(),
            &MatView::from_slice(&b, 0, 2).unwrap(),
            2,
            &mut MatViewMut::from_slice(&mut c1, 2, 2).unwrap(),
        );
        assert_eq!(c1, [0, 0, 0, 0]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(3);
        let (m, n, o) = (7usize, 5usize, 6usize);
        let a: Vec<i32> = (0..m * n).map(|_| rng.gen_range(-1000..=1000)).collect();
        let b: Vec<i32> = (0..n * o).map(|_| rng.gen_range(-1000..=1000)).collect();

        let mut serial = vec![0i32; m * o];
        mat_mult_scalar(
            &MatView::from_slice(&a, m, n).unwrap(),
            &MatView::from_slice(&b, n, o).unwrap(),
            4,
            &mut MatViewMut::from_slice(&mut serial, m, o).unwrap(),
        );

        for n_pe in [1usize, 2, 4, 8] {
            let mut parallel = vec![0i32; m * o];
            mat_mult_parallel(
                &MatView::from_slice(&a, m, n).unwrap(),
                &MatView::from_slice(&b, n, o).unwrap(),
                4,
                n_pe,
                &mut MatViewMut::from_slice(&mut parallel, m, o).unwrap(),
            )
            .unwrap();
            assert_eq!(parallel, serial, "n_pe={n_pe}");
        }
    }

    #[test]
    fn test_shift_rescales() {
        // [2] * [8] with shift 3: (16 + 4) >> 3 = 2.
        let a = [2i16];
        let b = [8i16];
        let mut c = [0i16; 1];
        mat_mult_scalar(
            &MatView::from_slice(&a, 1, 1).unwrap(),
            &MatView::from_slice(&b, 1, 1).unwrap(),
            3,
            &mut MatViewMut::from_slice(&mut c, 1, 1).unwrap(),
        );
        assert_eq!(c, [2]);
    }
}
