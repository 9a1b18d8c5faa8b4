// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Strided matrix views over caller-owned flat buffers.
//!
//! A view is `rows × cols` elements laid out row-major with `stride`
//! elements between consecutive row starts. `stride >= cols` always holds;
//! `stride > cols` lets a kernel operate on a sub-region of a larger
//! matrix without copying.
//!
//! Views never allocate and never outlive the buffer they borrow.

use crate::ViewError;

/// Minimum buffer length for a `rows × cols` view with the given stride.
///
/// The last row only needs `cols` elements, not a full stride.
fn required_len(rows: usize, cols: usize, stride: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) * stride + cols
    }
}

fn check(
    len: usize,
    rows: usize,
    cols: usize,
    stride: usize,
) -> Result<(), ViewError> {
    if stride < cols {
        return Err(ViewError::StrideTooSmall { stride, cols });
    }
    let required = required_len(rows, cols, stride);
    if len < required {
        return Err(ViewError::BufferTooSmall {
            rows,
            cols,
            stride,
            required,
            actual: len,
        });
    }
    Ok(())
}

/// A read-only strided matrix view.
#[derive(Debug, Clone, Copy)]
pub struct MatView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a, T> MatView<'a, T> {
    /// Creates a view with an explicit row stride.
    ///
    /// # Errors
    /// Returns [`ViewError::StrideTooSmall`] if `stride < cols`, or
    /// [`ViewError::BufferTooSmall`] if the buffer cannot hold the view.
    pub fn new(
        data: &'a [T],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, ViewError> {
        check(data.len(), rows, cols, stride)?;
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Creates a tightly-packed view (`stride == cols`).
    pub fn from_slice(data: &'a [T], rows: usize, cols: usize) -> Result<Self, ViewError> {
        Self::new(data, rows, cols, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `r` as a slice of exactly `cols` elements.
    ///
    /// # Panics
    /// Panics if `r >= rows` (slice indexing).
    pub fn row(&self, r: usize) -> &'a [T] {
        let start = r * self.stride;
        &self.data[start..start + self.cols]
    }
}

impl<'a, T: Copy> MatView<'a, T> {
    /// Element at `(r, c)`.
    #[inline(always)]
    pub fn at(&self, r: usize, c: usize) -> T {
        self.data[r * self.stride + c]
    }
}

/// A mutable strided matrix view.
#[derive(Debug)]
pub struct MatViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a, T> MatViewMut<'a, T> {
    /// Creates a mutable view with an explicit row stride.
    ///
    /// # Errors
    /// Same conditions as [`MatView::new`].
    pub fn new(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, ViewError> {
        check(data.len(), rows, cols, stride)?;
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Creates a tightly-packed mutable view (`stride == cols`).
    pub fn from_slice(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
    ) -> Result<Self, ViewError> {
        Self::new(data, rows, cols, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `r` as a mutable slice of exactly `cols` elements.
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        let start = r * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// Re-borrows as a read-only view.
    pub fn as_view(&self) -> MatView<'_, T> {
        MatView {
            data: self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
        }
    }

    /// Raw pointer to the first element.
    ///
    /// Used by parallel kernels to split the view into disjoint row shards;
    /// the pointer stays valid for the lifetime of the borrow.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }
}
