// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The parallel-launch collaborator: a fixed team of homogeneous workers.
//!
//! [`fork`] runs the same kernel body once on each of `n_pe` workers
//! (single program, multiple data). Each worker receives its own `core_id`
//! in `[0, n_pe)`; all workers share the invocation descriptor by
//! immutable reference. `fork` returning is the join barrier: every
//! worker's writes are complete before the caller sees the output.
//!
//! Workers never synchronise among themselves: the partitioner hands each
//! one a disjoint slice of the output, so the barrier at the end is the
//! only ordering point.

/// Errors launching the worker team.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    /// The underlying thread pool could not be built.
    #[error("failed to build worker team of {n_pe} workers: {source}")]
    PoolBuild {
        n_pe: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Runs `body(core_id)` once for each worker in a team of `n_pe`.
///
/// Returns after all workers have joined. `n_pe == 0` is a caller
/// contract violation.
///
/// # Errors
/// Returns [`TeamError::PoolBuild`] if the worker pool cannot be created
/// (platform thread limits).
pub fn fork<F>(n_pe: usize, body: F) -> Result<(), TeamError>
where
    F: Fn(usize) + Sync,
{
    debug_assert!(n_pe > 0, "worker team needs at least one worker");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_pe)
        .thread_name(|i| format!("pe-{i}"))
        .build()
        .map_err(|source| TeamError::PoolBuild { n_pe, source })?;
    tracing::debug!("forking worker team: {n_pe} workers");
    // `broadcast` runs the closure exactly once per pool thread and joins
    // before returning, which is the entry/exit barrier of the region.
    pool.broadcast(|ctx| body(ctx.index()));
    Ok(())
}
