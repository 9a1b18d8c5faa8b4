// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cluster configuration loaded from TOML files or constructed
//! programmatically.
//!
//! Configuration is a platform concern; kernel hot paths never read it.
//! It exists for tooling (the CLI, harnesses) to pick a worker count and,
//! for diagnostics, to force a core class.
//!
//! # TOML Format
//! ```toml
//! num_workers = 8
//! core_class = "cluster"
//! ```

use crate::{CoreClass, KernelError};
use std::path::Path;

/// Configuration for tooling built on the kernel library.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ClusterConfig {
    /// Number of parallel workers (defaults to the number of online cores).
    pub num_workers: Option<usize>,
    /// Core-class override for diagnostics: `"control"` or `"cluster"`.
    /// `None` means use runtime detection.
    pub core_class: Option<String>,
}

impl ClusterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, KernelError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KernelError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, KernelError> {
        toml::from_str(toml_str)
            .map_err(|e| KernelError::Config(format!("TOML parse error: {e}")))
    }

    /// Resolves the worker count.
    pub fn resolve_workers(&self) -> usize {
        self.num_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Resolves the core class: the override if present and valid,
    /// otherwise the detected class.
    ///
    /// # Errors
    /// Returns [`KernelError::UnknownCoreClass`] for an override outside
    /// the closed class set.
    pub fn resolve_core_class(&self) -> Result<CoreClass, KernelError> {
        match &self.core_class {
            Some(name) => CoreClass::from_name(name),
            None => Ok(CoreClass::current()),
        }
    }
}
