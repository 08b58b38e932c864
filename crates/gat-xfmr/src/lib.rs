//! # gat-xfmr: Transformer Two-Port Models
//!
//! Three-phase distribution transformers for iterative unbalanced power flow.
//! A transformer sits between a primary and a secondary node and contributes
//! six 3×3 complex matrices relating the phase voltages and currents on its
//! two sides:
//!
//! ```text
//! V_pri = a·V_sec + b·I_sec
//! I_pri = c·V_sec + d·I_sec
//! V_sec = A·V_pri − B·I_sec
//! ```
//!
//! Forward-backward sweep (FBS) uses `b` as a series impedance. Gauss-Seidel
//! (GS) stores the series admittance in `b` and uses `c`/`B` for the
//! delta–wye voltage and current transforms. Newton-Raphson is recognized
//! but has no transformer formulation, so init rejects it.
//!
//! ## Supported Connections
//!
//! | `connect_type`                  | FBS | GS  |
//! |---------------------------------|-----|-----|
//! | `WYE_WYE` (1), `SINGLE_PHASE` (4) | yes | yes |
//! | `DELTA_DELTA` (2)               | yes | yes |
//! | `DELTA_GWYE` (3)                | yes | yes |
//! | `SINGLE_PHASE_CENTER_TAPPED` (5)| yes | no  |
//!
//! ## Quick Start
//!
//! ```rust
//! use gat_core::units::{KilovoltAmperes, Volts};
//! use gat_core::{Complex64, ObjectId, PhaseSet};
//! use gat_xfmr::{
//!     ConnectionType, PowerflowSettings, TransformerBuilder, TransformerConfiguration,
//!     TwoPortLink,
//! };
//!
//! let config = TransformerConfiguration::new(
//!     ConnectionType::WyeWye,
//!     Volts(7200.0),
//!     Volts(120.0),
//!     Complex64::new(0.01, 0.04),
//!     KilovoltAmperes(25.0),
//! );
//!
//! let xfmr = TransformerBuilder::new(ObjectId::new(1), "xfmr_1")
//!     .phases(PhaseSet::ABC)
//!     .configuration(config)
//!     .init(&PowerflowSettings::default())?;
//!
//! assert!((xfmr.voltage_ratio() - 60.0).abs() < 1e-10);
//! assert!((xfmr.matrices().a()[(0, 0)].re - 60.0).abs() < 1e-10);
//! # Ok::<(), gat_xfmr::InitError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Transformer configurations and connection types
//! - [`settings`] - Solver method and run-wide settings
//! - [`per_unit`] - Turns ratio and impedance base
//! - [`matrix`] - 3×3 phase matrices and the two-port bundle
//! - [`topology`] - Per-connection matrix builders
//! - [`transformer`] - Builder, initialized transformer, link seam
//! - [`error`] - Init failures

pub mod config;
pub mod error;
pub mod matrix;
pub mod per_unit;
pub mod settings;
pub mod topology;
pub mod transformer;

pub use config::{ConnectionType, TransformerConfiguration};
pub use error::{InitError, TransformerError};
pub use matrix::{CyclicShift, Matrix3, TwoPortMatrices};
pub use per_unit::PerUnitParameters;
pub use settings::{PowerflowSettings, SolverMethod};
pub use topology::{build_two_port, is_supported, SpecialLink};
pub use transformer::{ConfigurationObject, Transformer, TransformerBuilder, TwoPortLink};
