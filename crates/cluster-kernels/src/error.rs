// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the kernel library boundary.
//!
//! Kernel bodies themselves are contract-based and infallible; errors only
//! arise at the configuration and team-launch boundary.

/// Errors from configuration parsing or worker-team launch.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// A core-class identifier outside the closed `{control, cluster}` set.
    #[error("unknown core class '{0}'; expected 'control' or 'cluster'")]
    UnknownCoreClass(String),

    /// Configuration error (TOML parse failure, invalid worker count, …).
    #[error("configuration error: {0}")]
    Config(String),

    /// The worker team could not be launched.
    #[error(transparent)]
    Team(#[from] crate::TeamError),
}
