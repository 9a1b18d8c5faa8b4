// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core-class discovery and the dispatch policy.
//!
//! The cluster has two classes of processing element: a lightweight
//! control core with a plain scalar instruction set, and worker cores
//! with wide SIMD-capable datapaths. Application code is written
//! core-class-agnostic; every kernel entry point queries [`CoreClass`]
//! itself and forwards to the matching variant.
//!
//! The class is an environment property, discovered once per process via
//! runtime capability detection and cached. The set of classes is closed,
//! so dispatch is an exhaustive two-arm `match`: an unrecognized class is
//! unrepresentable, and the only place external identifiers enter
//! ([`CoreClass::from_name`]) rejects unknown names up front.

use crate::KernelError;
use std::fmt;
use std::sync::OnceLock;

/// The class of processing element executing the current code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreClass {
    /// Lightweight control core: scalar kernel variants.
    Control,
    /// Cluster worker core with a wide SIMD-capable datapath: vectorized
    /// kernel variants.
    Cluster,
}

static CORE_CLASS: OnceLock<CoreClass> = OnceLock::new();

impl CoreClass {
    /// The class of the core this process is running on.
    ///
    /// Detected once and cached; every kernel dispatch reads the cached
    /// value.
    pub fn current() -> CoreClass {
        *CORE_CLASS.get_or_init(|| {
            let class = detect();
            tracing::debug!("core class detected: {class}");
            class
        })
    }

    /// Parses a class name, for configuration overrides.
    ///
    /// # Errors
    /// Returns [`KernelError::UnknownCoreClass`] for any name outside the
    /// closed set; unknown identifiers never reach dispatch.
    pub fn from_name(name: &str) -> Result<CoreClass, KernelError> {
        match name.to_lowercase().as_str() {
            "control" | "scalar" => Ok(CoreClass::Control),
            "cluster" | "vector" => Ok(CoreClass::Cluster),
            other => Err(KernelError::UnknownCoreClass(other.to_string())),
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            CoreClass::Control => "control",
            CoreClass::Cluster => "cluster",
        }
    }

    /// `true` for the wide-datapath worker class.
    pub fn is_vector_capable(self) -> bool {
        matches!(self, CoreClass::Cluster)
    }
}

impl fmt::Display for CoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect() -> CoreClass {
    if is_x86_feature_detected!("avx2") {
        CoreClass::Cluster
    } else {
        CoreClass::Control
    }
}

// NEON is baseline on aarch64.
#[cfg(target_arch = "aarch64")]
fn detect() -> CoreClass {
    CoreClass::Cluster
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect() -> CoreClass {
    CoreClass::Control
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_is_stable() {
        assert_eq!(CoreClass::current(), CoreClass::current());
    }

    #[test]
    fn test_from_name_known() {
        assert_eq!(CoreClass::from_name("control").unwrap(), CoreClass::Control);
        assert_eq!(CoreClass::from_name("SCALAR").unwrap(), CoreClass::Control);
        assert_eq!(CoreClass::from_name("cluster").unwrap(), CoreClass::Cluster);
        assert_eq!(CoreClass::from_name("vector").unwrap(), CoreClass::Cluster);
    }

    #[test]
    fn test_from_name_unknown_is_rejected() {
        let err = CoreClass::from_name("gpu").unwrap_err();
        assert!(matches!(err, KernelError::UnknownCoreClass(_)));
    }

    #[test]
    fn test_vector_capability() {
        assert!(!CoreClass::Control.is_vector_capable());
        assert!(CoreClass::Cluster.is_vector_capable());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CoreClass::Control), "control");
        assert_eq!(format!("{}", CoreClass::Cluster), "cluster");
    }
}
