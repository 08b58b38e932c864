//! Connection-topology dispatch.
//!
//! Each `(connection, solver method)` pair maps to exactly one pure builder
//! function that fills a fresh [`TwoPortMatrices`]. Builders never see an
//! unsupported pair: [`select_builder`] rejects those up front.
//!
//! | connection                  | FBS         | GS          | NR  |
//! |-----------------------------|-------------|-------------|-----|
//! | SINGLE_PHASE, WYE_WYE       | wye         | wye         | err |
//! | DELTA_DELTA                 | delta-delta | delta-delta | err |
//! | DELTA_GWYE                  | delta-gwye  | delta-gwye  | err |
//! | SINGLE_PHASE_CENTER_TAPPED  | center-tap  | err         | err |

mod center_tap;
mod delta_delta;
mod delta_gwye;
mod wye;

use gat_core::PhaseSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConnectionType, TransformerConfiguration};
use crate::error::{Result, TransformerError};
use crate::matrix::TwoPortMatrices;
use crate::per_unit::PerUnitParameters;
use crate::settings::SolverMethod;

/// Everything a builder reads.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuildInput<'a> {
    pub config: &'a TransformerConfiguration,
    pub phases: PhaseSet,
    pub params: PerUnitParameters,
}

pub(crate) type BuildFn = fn(&BuildInput<'_>) -> Result<TwoPortMatrices>;

/// Pick the builder for a connection under a solver method.
pub(crate) fn select_builder(connection: ConnectionType, method: SolverMethod) -> Result<BuildFn> {
    // Newton-Raphson has no formulation for any topology, so it wins over an
    // unknown connection code.
    if method == SolverMethod::NewtonRaphson {
        return Err(TransformerError::UnsupportedSolverMethod { method, connection });
    }

    let builder: BuildFn = match (connection, method) {
        (ConnectionType::Unknown(code), _) => {
            return Err(TransformerError::UnknownConnectionType { code })
        }
        (ConnectionType::SinglePhase | ConnectionType::WyeWye, SolverMethod::ForwardBackwardSweep) => {
            wye::forward_backward_sweep
        }
        (ConnectionType::SinglePhase | ConnectionType::WyeWye, _) => wye::gauss_seidel,
        (ConnectionType::DeltaDelta, SolverMethod::ForwardBackwardSweep) => {
            delta_delta::forward_backward_sweep
        }
        (ConnectionType::DeltaDelta, _) => delta_delta::gauss_seidel,
        (ConnectionType::DeltaGroundedWye, SolverMethod::ForwardBackwardSweep) => {
            delta_gwye::forward_backward_sweep
        }
        (ConnectionType::DeltaGroundedWye, _) => delta_gwye::gauss_seidel,
        (ConnectionType::SinglePhaseCenterTapped, SolverMethod::ForwardBackwardSweep) => {
            center_tap::forward_backward_sweep
        }
        (ConnectionType::SinglePhaseCenterTapped, _) => {
            return Err(TransformerError::UnsupportedSolverMethod { method, connection })
        }
    };
    Ok(builder)
}

/// Whether a two-port formulation exists for this pair.
pub fn is_supported(connection: ConnectionType, method: SolverMethod) -> bool {
    select_builder(connection, method).is_ok()
}

/// Compute per-unit parameters and the six matrices for one transformer.
///
/// The result is either a complete, finite matrix set or an error; a
/// transformer never enters service half-built.
pub fn build_two_port(
    config: &TransformerConfiguration,
    phases: PhaseSet,
    method: SolverMethod,
) -> Result<(PerUnitParameters, TwoPortMatrices)> {
    let builder = select_builder(config.connect_type, method)?;
    // Phase-set errors outrank rating and voltage errors.
    if config.connect_type == ConnectionType::SinglePhaseCenterTapped {
        center_tap::attached_phase(phases)?;
    }
    let params = PerUnitParameters::compute(config)?;

    let input = BuildInput {
        config,
        phases,
        params,
    };
    let matrices = builder(&input)?;

    if let Some(label) = matrices.first_non_finite() {
        return Err(TransformerError::ConfigurationInvalid {
            field: "impedance",
            reason: format!("{} matrix has non-finite entries", label),
        });
    }

    Ok((params, matrices))
}

/// Step-down test for delta–grounded-wye units, shared by both solver forms.
#[inline]
pub(crate) fn is_step_down(turns_ratio: f64) -> bool {
    turns_ratio > 1.0
}

/// Extra phase handling the network link applies for some connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialLink {
    #[default]
    Normal,
    /// Delta primary feeding a grounded-wye secondary
    DeltaGwye,
    /// Center-tapped secondary (two hot legs plus neutral)
    SplitPhase,
}

impl SpecialLink {
    pub fn for_connection(connection: ConnectionType) -> Self {
        match connection {
            ConnectionType::DeltaGroundedWye => SpecialLink::DeltaGwye,
            ConnectionType::SinglePhaseCenterTapped => SpecialLink::SplitPhase,
            _ => SpecialLink::Normal,
        }
    }
}
