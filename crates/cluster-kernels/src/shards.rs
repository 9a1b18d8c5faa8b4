// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Disjoint output shards for parallel kernels.
//!
//! A parallel operation logically partitions its output across workers:
//! each worker owns the rows (or elements) the partitioner assigned to it
//! and touches nothing else. These wrappers carry a raw pointer plus the
//! view geometry so all workers can hold them at once; the safety contract
//! is exactly the partitioner's disjointness guarantee.

use quant_core::MatViewMut;
use std::marker::PhantomData;

/// Shared write access to a strided matrix, split by row.
///
/// `Send + Sync` under the invariant that no row index is handed to two
/// concurrent workers. Row disjointness comes from
/// `work_partition::StaticPartition`, which assigns each index to exactly
/// one `core_id`.
pub(crate) struct DisjointRows<'a, T> {
    ptr: *mut T,
    rows: usize,
    cols: usize,
    stride: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: workers write disjoint rows only (see struct docs); the wrapper
// itself holds no interior state.
unsafe impl<T: Send> Send for DisjointRows<'_, T> {}
unsafe impl<T: Send> Sync for DisjointRows<'_, T> {}

impl<'a, T> DisjointRows<'a, T> {
    pub(crate) fn new(view: &'a mut MatViewMut<'_, T>) -> Self {
        let rows = view.rows();
        let cols = view.cols();
        let stride = view.stride();
        Self {
            ptr: view.as_mut_ptr(),
            rows,
            cols,
            stride,
            _marker: PhantomData,
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    /// Mutable access to row `r`.
    ///
    /// # Safety
    /// No other worker may access row `r` for the lifetime of the returned
    /// slice. Callers obtain `r` from their own `StaticPartition` share,
    /// which guarantees this.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn row_mut(&self, r: usize) -> &mut [T] {
        debug_assert!(r < self.rows);
        std::slice::from_raw_parts_mut(self.ptr.add(r * self.stride), self.cols)
    }
}

/// Shared write access to a flat buffer, split by element index.
pub(crate) struct DisjointElems<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: same disjointness invariant as `DisjointRows`, per element.
unsafe impl<T: Send> Send for DisjointElems<'_, T> {}
unsafe impl<T: Send> Sync for DisjointElems<'_, T> {}

impl<'a, T: Copy> DisjointElems<'a, T> {
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Writes element `i`.
    ///
    /// # Safety
    /// No other worker may write index `i`; indices come from the caller's
    /// own `StaticPartition` share.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, i: usize, value: T) {
        debug_assert!(i < self.len);
        *self.ptr.add(i) = value;
    }
}
