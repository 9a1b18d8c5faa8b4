// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # work-partition
//!
//! Deterministic, interleaved partitioning of an iteration space across a
//! fixed team of homogeneous workers.
//!
//! Worker `core_id` out of `n_pe` claims the indices
//! `{core_id, core_id + n_pe, core_id + 2*n_pe, …}` below `total`. The
//! round-robin assignment guarantees:
//!
//! - **Completeness**: the union over all workers is exactly `0..total`,
//!   with no gaps and no duplicates.
//! - **Load skew of at most one**: the largest and smallest share differ by
//!   at most one index when `total` is not divisible by `n_pe`.
//! - **Determinism**: the partition is a pure function of
//!   `(total, n_pe, core_id)`; it never depends on runtime timing.
//!
//! Workers whose `core_id >= total` receive an empty share and must do no
//! work at all.
//!
//! This crate is purely algorithmic, with no I/O and no synchronisation,
//! making it trivially unit-testable and safe to call from any worker
//! context.

/// The ordered index subsequence assigned to one worker.
///
/// # Examples
/// ```
/// use work_partition::StaticPartition;
///
/// let mine: Vec<usize> = StaticPartition::new(10, 4, 1).collect();
/// assert_eq!(mine, vec![1, 5, 9]);
///
/// assert!(StaticPartition::new(2, 4, 3).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StaticPartition {
    next: usize,
    total: usize,
    step: usize,
}

impl StaticPartition {
    /// Partition of `0..total` for worker `core_id` out of `n_pe`.
    ///
    /// `n_pe == 0` or `core_id >= n_pe` is a caller contract violation.
    pub fn new(total: usize, n_pe: usize, core_id: usize) -> Self {
        debug_assert!(n_pe > 0, "worker count must be at least 1");
        debug_assert!(core_id < n_pe, "core_id {core_id} out of range for {n_pe} workers");
        Self {
            next: core_id,
            total,
            step: n_pe,
        }
    }

    /// Exact number of indices in this share.
    pub fn len(&self) -> usize {
        if self.next >= self.total {
            0
        } else {
            (self.total - self.next + self.step - 1) / self.step
        }
    }

    /// `true` when this worker has no work assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for StaticPartition {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        // Saturating: `next + step` cannot meaningfully wrap, but keep the
        // iterator fused near usize::MAX.
        self.next = self.next.saturating_add(self.step);
        Some(i)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for StaticPartition {}

/// Share size without constructing an iterator.
///
/// Equivalent to `StaticPartition::new(total, n_pe, core_id).len()`.
pub fn share_len(total: usize, n_pe: usize, core_id: usize) -> usize {
    StaticPartition::new(total, n_pe, core_id).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_sequence() {
        let s: Vec<usize> = StaticPartition::new(10, 3, 0).collect();
        assert_eq!(s, vec![0, 3, 6, 9]);
        let s: Vec<usize> = StaticPartition::new(10, 3, 2).collect();
        assert_eq!(s, vec![2, 5, 8]);
    }

    #[test]
    fn test_completeness_no_gaps_no_duplicates() {
        for total in 0..=1000 {
            for n_pe in 1..=16 {
                let mut seen = vec![0u8; total];
                for core_id in 0..n_pe {
                    for i in StaticPartition::new(total, n_pe, core_id) {
                        seen[i] += 1;
                    }
                }
                assert!(
                    seen.iter().all(|&c| c == 1),
                    "partition of {total} over {n_pe} workers is not exact"
                );
            }
        }
    }

    #[test]
    fn test_load_skew_at_most_one() {
        for total in 0..=1000 {
            for n_pe in 1..=16 {
                let shares: Vec<usize> =
                    (0..n_pe).map(|id| share_len(total, n_pe, id)).collect();
                let max = *shares.iter().max().unwrap();
                let min = *shares.iter().min().unwrap();
                assert!(
                    max - min <= 1,
                    "skew {} for total={total}, n_pe={n_pe}",
                    max - min
                );
            }
        }
    }

    #[test]
    fn test_len_matches_iteration() {
        for total in [0, 1, 7, 16, 100, 999] {
            for n_pe in 1..=16 {
                for core_id in 0..n_pe {
                    let p = StaticPartition::new(total, n_pe, core_id);
                    let len = p.len();
                    assert_eq!(len, p.count());
                }
            }
        }
    }

    #[test]
    fn test_empty_share_when_fewer_units_than_workers() {
        for core_id in 2..8 {
            assert!(StaticPartition::new(2, 8, core_id).is_empty());
        }
        assert_eq!(StaticPartition::new(2, 8, 1).len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let a: Vec<usize> = StaticPartition::new(97, 5, 3).collect();
        let b: Vec<usize> = StaticPartition::new(97, 5, 3).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_worker_owns_everything() {
        let all: Vec<usize> = StaticPartition::new(5, 1, 0).collect();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_total() {
        for core_id in 0..4 {
            assert!(StaticPartition::new(0, 4, core_id).is_empty());
        }
    }
}
