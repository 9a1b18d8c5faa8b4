// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cluster-dsp verify` command: on-target equivalence checking.
//!
//! Runs every operation with the scalar variant, the vectorized variant,
//! and the parallel form over randomised shapes and fixed-point
//! parameters, and fails (non-zero exit) on the first mismatch. Useful as
//! a smoke test when bringing the library up on new hardware.

use anyhow::bail;
use cluster_kernels::ops::{
    fill_identity_parallel, fill_identity_scalar, fill_identity_vectorized, mat_mult_parallel,
    mat_mult_scalar, mat_mult_vectorized, scale_parallel, scale_scalar, scale_vectorized,
};
use cluster_kernels::ClusterConfig;
use quant_core::{MatView, MatViewMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn execute(config: &ClusterConfig, iterations: u64) -> anyhow::Result<()> {
    let workers = config.resolve_workers();
    let mut rng = StdRng::seed_from_u64(0xC1D5);

    println!("verifying kernel variants ({iterations} shapes per op, {workers} workers)…");

    verify_known_answers()?;
    println!("  known answers  ok");
    verify_scale(&mut rng, iterations, workers)?;
    println!("  scale          ok");
    verify_fill_identity(&mut rng, iterations, workers)?;
    println!("  fill_identity  ok");
    verify_mat_mult(&mut rng, iterations, workers)?;
    println!("  mat_mult       ok");

    println!("all variants bit-exact");
    Ok(())
}

/// Fixed vectors with hand-computed results, checked on both variants.
fn verify_known_answers() -> anyhow::Result<()> {
    let src = [2i16, 4, 6];
    let mut dst = [0i16; 3];
    scale_scalar(&src, 3, 1, &mut dst);
    if dst != [3, 6, 9] {
        bail!("scale known-answer failed: got {dst:?}, want [3, 6, 9]");
    }
    scale_vectorized(&src, 3, 1, &mut dst);
    if dst != [3, 6, 9] {
        bail!("vectorized scale known-answer failed: got {dst:?}");
    }

    let mut eye = [0x55i8; 16];
    fill_identity_scalar(&mut MatViewMut::from_slice(&mut eye, 4, 4)?, 2);
    for (i, &x) in eye.iter().enumerate() {
        let want = if i % 5 == 0 { 4 } else { 0 };
        if x != want {
            bail!("identity known-answer failed at flat index {i}: got {x}, want {want}");
        }
    }

    let a = [1i16, 2, 3, 4];
    let b = [5i16, 6, 7, 8];
    let mut c = [0i16; 4];
    mat_mult_scalar(
        &MatView::from_slice(&a, 2, 2)?,
        &MatView::from_slice(&b, 2, 2)?,
        0,
        &mut MatViewMut::from_slice(&mut c, 2, 2)?,
    );
    if c != [19, 22, 43, 50] {
        bail!("mat_mult known-answer failed: got {c:?}, want [19, 22, 43, 50]");
    }
    Ok(())
}

fn verify_scale(rng: &mut StdRng, iterations: u64, workers: usize) -> anyhow::Result<()> {
    for it in 0..iterations {
        let len = rng.gen_range(0..=257);
        let factor: i16 = rng.gen_range(-128..=127);
        let shift: u32 = rng.gen_range(0..=8);
        let src: Vec<i16> = (0..len).map(|_| rng.gen_range(-1024..=1024)).collect();

        let mut scalar = vec![0i16; len];
        let mut vector = vec![0i16; len];
        let mut parallel = vec![0i16; len];
        scale_scalar(&src, factor, shift, &mut scalar);
        scale_vectorized(&src, factor, shift, &mut vector);
        scale_parallel(&src, factor, shift, workers, &mut parallel)?;

        if scalar != vector || scalar != parallel {
            bail!("scale mismatch at iteration {it}: len={len} factor={factor} shift={shift}");
        }
    }
    Ok(())
}

fn verify_fill_identity(rng: &mut StdRng, iterations: u64, workers: usize) -> anyhow::Result<()> {
    for it in 0..iterations {
        let n = rng.gen_range(0..=33);
        let frac_bits: u32 = rng.gen_range(0..=6);

        let mut scalar = vec![0i8; n * n];
        let mut vector = vec![0i8; n * n];
        let mut parallel = vec![0i8; n * n];
        fill_identity_scalar(
            &mut MatViewMut::from_slice(&mut scalar, n, n)?,
            frac_bits,
        );
        fill_identity_vectorized(
            &mut MatViewMut::from_slice(&mut vector, n, n)?,
            frac_bits,
        );
        fill_identity_parallel(
            &mut MatViewMut::from_slice(&mut parallel, n, n)?,
            frac_bits,
            workers,
        )?;

        if scalar != vector || scalar != parallel {
            bail!("fill_identity mismatch at iteration {it}: n={n} frac_bits={frac_bits}");
        }
    }
    Ok(())
}

fn verify_mat_mult(rng: &mut StdRng, iterations: u64, workers: usize) -> anyhow::Result<()> {
    for it in 0..iterations {
        let m = rng.gen_range(0..=12);
        let n = rng.gen_range(0..=12);
        let o = rng.gen_range(0..=13);
        let shift: u32 = rng.gen_range(0..=10);
        let a: Vec<i16> = (0..m * n).map(|_| rng.gen_range(-500..=500)).collect();
        let b: Vec<i16> = (0..n * o).map(|_| rng.gen_range(-500..=500)).collect();

        let mut scalar = vec![0i16; m * o];
        let mut vector = vec![0i16; m * o];
        let mut parallel = vec![0i16; m * o];
        mat_mult_scalar(
            &MatView::from_slice(&a, m, n)?,
            &MatView::from_slice(&b, n, o)?,
            shift,
            &mut MatViewMut::from_slice(&mut scalar, m, o)?,
        );
        mat_mult_vectorized(
            &MatView::from_slice(&a, m, n)?,
            &MatView::from_slice(&b, n, o)?,
            shift,
            &mut MatViewMut::from_slice(&mut vector, m, o)?,
        );
        mat_mult_parallel(
            &MatView::from_slice(&a, m, n)?,
            &MatView::from_slice(&b, n, o)?,
            shift,
            workers,
            &mut MatViewMut::from_slice(&mut parallel, m, o)?,
        )?;

        if scalar != vector || scalar != parallel {
            bail!("mat_mult mismatch at iteration {it}: {m}x{n}x{o} shift={shift}");
        }
    }
    Ok(())
}
