// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Kernel operations.
//!
//! Each operation family lives in its own module and exposes:
//! - a dispatching entry point (queries [`crate::CoreClass`] and forwards),
//! - the scalar and vectorized variants (public so equivalence can be
//!   verified directly; normal callers use the entry point),
//! - for parallel operations, a `*_parallel` form that splits the output
//!   across a fixed worker team.

mod fill_identity;
mod mat_mult;
mod scale;

pub use fill_identity::{
    fill_identity, fill_identity_f32, fill_identity_parallel, fill_identity_scalar,
    fill_identity_vectorized,
};
pub use mat_mult::{
    mat_mult, mat_mult_f32, mat_mult_f32_scalar, mat_mult_f32_vectorized, mat_mult_parallel,
    mat_mult_scalar, mat_mult_vectorized,
};
pub use scale::{
    scale, scale_f32, scale_f32_scalar, scale_f32_vectorized, scale_parallel, scale_scalar,
    scale_vectorized,
};
