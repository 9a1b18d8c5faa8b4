// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cluster-kernels
//!
//! Fixed-point and floating-point linear-algebra kernels for a multi-core
//! compute cluster, with per-core-class kernel variants and a fixed-size
//! worker team for parallel operations.
//!
//! Each public operation is a thin dispatcher: it queries the
//! [`CoreClass`] the calling code is running on and forwards to the
//! matching kernel variant. A scalar variant (lightweight control core)
//! and a vectorized variant (wide worker cores) exist side by side and are
//! bit-exact with each other: dispatch changes performance, never
//! results.
//!
//! Parallel forms (`*_parallel`) split their output across `n_pe` workers
//! using the interleaved partition from [`work_partition`], so each worker
//! owns a disjoint set of output rows or elements and no locking is ever
//! needed.
//!
//! # Example
//! ```
//! use cluster_kernels::ops::scale;
//!
//! let src = [2i16, 4, 6];
//! let mut dst = [0i16; 3];
//! scale(&src, 3, 1, &mut dst);
//! assert_eq!(dst, [3, 6, 9]);
//! ```
//!
//! # Numeric contract
//! Kernels perform no saturation and no overflow detection: products and
//! sums live in a wide accumulator, are rounded and narrowed exactly once,
//! and wrap per two's complement beyond the output range. Callers pick the
//! shift so that results fit.

mod config;
mod core_class;
mod error;
mod shards;

pub mod ops;
pub mod team;

pub use config::ClusterConfig;
pub use core_class::CoreClass;
pub use error::KernelError;
pub use team::TeamError;
