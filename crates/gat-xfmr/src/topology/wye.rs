//! Single-phase and wye–wye units: decoupled per-phase windings.
//!
//! Inactive phases get zero ratio terms. `B` keeps the series impedance on
//! all three diagonals regardless of which phases are present.

use gat_core::Phase;
use num_complex::Complex64;

use super::BuildInput;
use crate::error::Result;
use crate::matrix::TwoPortMatrices;

/// Per-phase `(nt, zt, 1/nt)`, zeroed for a phase the unit does not carry.
fn phase_terms(input: &BuildInput<'_>, phase: Phase) -> (f64, Complex64, f64) {
    if input.phases.contains(phase) {
        let nt = input.params.turns_ratio;
        (nt, input.params.base_impedance * nt, 1.0 / nt)
    } else {
        (0.0, Complex64::new(0.0, 0.0), 0.0)
    }
}

fn common(input: &BuildInput<'_>) -> TwoPortMatrices {
    let mut m = TwoPortMatrices::zeros();
    let zt = input.params.base_impedance;

    for phase in Phase::ALL {
        let k = phase.index();
        let (nt, _, inv_nt) = phase_terms(input, phase);
        m.a.set(k, k, Complex64::new(nt, 0.0));
        m.d.set(k, k, Complex64::new(inv_nt, 0.0));
        m.a_rev.set(k, k, Complex64::new(inv_nt, 0.0));
        m.b_rev.set(k, k, zt);
    }
    m
}

pub(crate) fn forward_backward_sweep(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let mut m = common(input);
    for phase in Phase::ALL {
        let (_, zt_phase, _) = phase_terms(input, phase);
        m.b.set(phase.index(), phase.index(), zt_phase);
    }
    Ok(m)
}

pub(crate) fn gauss_seidel(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let mut m = common(input);
    m.b.set_diagonal(input.params.admittance());
    Ok(m)
}
