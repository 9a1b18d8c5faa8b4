// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for view construction.

/// Errors that can occur when constructing a matrix view.
///
/// Kernels themselves have no error channel; all validation happens here,
/// at construction time.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The row stride is smaller than the column count.
    #[error("stride {stride} is smaller than cols {cols}")]
    StrideTooSmall { stride: usize, cols: usize },

    /// The backing buffer cannot hold the described view.
    #[error(
        "buffer too small for {rows}x{cols} view with stride {stride}: \
         need {required} elements, got {actual}"
    )]
    BufferTooSmall {
        rows: usize,
        cols: usize,
        stride: usize,
        required: usize,
        actual: usize,
    },
}
