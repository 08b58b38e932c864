//! # gat-core: Distribution Modeling Core
//!
//! Shared primitives for the GAT distribution-network models.
//!
//! ## Design Philosophy
//!
//! Three-phase distribution equipment (lines, transformers, regulators) is
//! described per phase conductor. The types here keep that bookkeeping
//! explicit and type-safe:
//! - [`Phase`] / [`PhaseSet`]: which of the A, B, C conductors an element uses
//! - [`ObjectId`] / [`ObjectRef`]: stable identity for error and log context
//! - [`units`]: newtype wrappers for volts and kVA
//! - [`GatError`]: the unified error type at API boundaries
//! - [`Diagnostics`]: non-fatal validation findings
//!
//! ## Quick Start
//!
//! ```rust
//! use gat_core::{ObjectId, ObjectRef, Phase, PhaseSet};
//!
//! let phases = PhaseSet::A | PhaseSet::B | PhaseSet::C;
//! assert!(phases.contains(Phase::B));
//! assert_eq!(phases.to_string(), "ABC");
//!
//! let obj = ObjectRef::new(ObjectId::new(7), "xfmr_7", "transformer");
//! assert_eq!(obj.to_string(), "xfmr_7 (transformer:7)");
//! ```
//!
//! ## Modules
//!
//! - [`diagnostics`] - Validation and diagnostic reporting
//! - [`error`] - Unified error type
//! - [`phase`] - Phase conductor sets
//! - [`units`] - Compile-time unit safety

use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;
pub mod phase;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{GatError, GatResult};
pub use num_complex::Complex64;
pub use phase::{Phase, PhaseSet};
pub use units::{KilovoltAmperes, Volts};

/// Newtype wrapper for simulation object ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub fn new(value: u32) -> Self {
        ObjectId(value)
    }
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a simulation object as reported in errors and logs.
///
/// Renders as `name (class:id)`, e.g. `xfmr_7 (transformer:7)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub name: String,
    pub class: String,
}

impl ObjectRef {
    pub fn new(id: ObjectId, name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            class: class.into(),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.class, self.id)
    }
}
