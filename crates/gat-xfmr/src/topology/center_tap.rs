//! Single-phase center-tapped units (split-phase secondary).
//!
//! The primary attaches to one phase `k`; the secondary's two hot legs sit in
//! rows 0 and 1. The winding impedance is split into a primary part `z0`, two
//! half-secondary parts `z1 = z2`, and a core shunt `zc` built from the
//! resistance and reactance scaled by 1e6 and 1e3.
//!
//! ```text
//! zb_hi = V_pri² / (S_k · 1000)       zb_lo = V_sec² / (S_k · 1000)
//! z0    = (0.5·R + j·0.8·X) · zb_hi
//! z1    = (R + j·0.4·X) · zb_lo
//! zc    = zb_hi · (1e6·R)(j·1e3·X) / (1e6·R + j·1e3·X)
//! ```

use gat_core::{Phase, PhaseSet};
use num_complex::Complex64;

use super::BuildInput;
use crate::config::{ConnectionType, TransformerConfiguration};
use crate::error::{Result, TransformerError};
use crate::matrix::TwoPortMatrices;

/// The four branch impedances of the split-phase equivalent circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SplitPhaseImpedances {
    pub z0: Complex64,
    pub z1: Complex64,
    pub z2: Complex64,
    pub zc: Complex64,
}

impl SplitPhaseImpedances {
    pub fn compute(config: &TransformerConfiguration, rating_kva: f64) -> Self {
        let rating_va = rating_kva * 1000.0;
        let zb_hi = config.primary_voltage.squared() / rating_va;
        let zb_lo = config.secondary_voltage.squared() / rating_va;
        let r = config.impedance.re;
        let x = config.impedance.im;

        let z0 = Complex64::new(0.5 * r, 0.8 * x) * zb_hi;
        let z1 = Complex64::new(r, 0.4 * x) * zb_lo;
        let shunt_r = Complex64::new(1e6 * r, 0.0);
        let shunt_x = Complex64::new(0.0, 1e3 * x);
        let zc = (shunt_r * shunt_x / (shunt_r + shunt_x)) * zb_hi;

        Self {
            z0,
            z1,
            z2: z1,
            zc,
        }
    }
}

/// Resolve the single primary phase, rejecting delta taps and empty sets.
pub(super) fn attached_phase(phases: PhaseSet) -> Result<Phase> {
    let unsupported = |reason: &'static str| TransformerError::UnsupportedTopologyCombination {
        connection: ConnectionType::SinglePhaseCenterTapped,
        phases,
        reason,
    };

    if phases.len() >= 2 {
        return Err(unsupported("delta split tap"));
    }
    phases.single().ok_or_else(|| unsupported("split tap with no primary phase"))
}

pub(crate) fn forward_backward_sweep(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let phase = attached_phase(input.phases)?;
    let rating = input.config.phase_rating(phase);
    if rating.is_zero() {
        return Err(TransformerError::ZeroRating {
            phase,
            field: TransformerConfiguration::phase_rating_field(phase),
        });
    }

    let SplitPhaseImpedances { z0, z1, z2, zc } =
        SplitPhaseImpedances::compute(input.config, rating.value());
    let nt = input.params.turns_ratio;
    let one = Complex64::new(1.0, 0.0);
    let k = phase.index();
    let mut m = TwoPortMatrices::zeros();

    let a_tap = (z0 / zc + one) * nt;
    m.a.set(0, k, a_tap);
    m.a.set(1, k, a_tap);

    m.c.set(k, 0, one * nt / zc);

    m.d.set(k, 0, one / nt + z1 * nt / zc);
    m.d.set(k, 1, Complex64::new(-1.0 / nt, 0.0));

    let a_rev_tap = (zc / (zc + z0)) / nt;
    m.a_rev.set(0, k, a_rev_tap);
    m.a_rev.set(1, k, a_rev_tap);

    m.b.set(0, 0, (z0 / zc + one) * (z1 * nt) + z0 / nt);
    m.b.set(0, 1, -(z0 / nt));
    m.b.set(1, 0, z0 / nt);
    m.b.set(1, 1, -(z0 / zc + one) * (z2 * nt) - z0 / nt);

    let shunt = z0 * zc / ((zc + z0) * (nt * nt));
    m.b_rev.set(0, 0, z1 + shunt);
    m.b_rev.set(0, 1, -shunt);
    m.b_rev.set(1, 0, shunt);
    m.b_rev.set(1, 1, -(z2 + shunt));

    Ok(m)
}
