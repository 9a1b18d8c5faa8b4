// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # quant-core
//!
//! Fixed-point arithmetic primitives and strided matrix views for the
//! cluster-dsp kernel library.
//!
//! This crate provides:
//! - [`RoundShift`]: round-to-nearest right bit-shift, the rescaling
//!   primitive every fixed-point kernel is built on.
//! - [`FixedWord`] / [`Wide`]: the narrow element types (`i8`, `i16`,
//!   `i32`) paired with their wide accumulator types.
//! - [`MatView`] / [`MatViewMut`]: flat-buffer matrix views with an
//!   explicit row stride, enabling kernels to operate on sub-regions of a
//!   larger backing buffer.
//!
//! # Design Goals
//! - No allocation anywhere: views borrow caller-owned buffers.
//! - Overflow is the caller's contract, never a runtime check; see the
//!   [`RoundShift`] and [`FixedWord::narrow`] docs.
//! - Validation happens once, at view construction, via `thiserror` types;
//!   everything past a constructed view is branch-free hot path.

mod elem;
mod error;
mod rounding;
mod view;

pub use elem::{FixedWord, Wide};
pub use error::ViewError;
pub use rounding::RoundShift;
pub use view::{MatView, MatViewMut};
