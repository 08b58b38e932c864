//! Delta–grounded-wye units.
//!
//! The delta side sees line-to-line voltage, so the effective ratio is
//! `nt·√3`, and the 30° shift puts the coupling terms on one cyclic
//! off-diagonal rotation. Which rotation depends on whether the unit steps
//! down (`turns_ratio > 1.0`) or up:
//!
//! ```text
//! Leading = (A,B) (B,C) (C,A)      Lagging = (A,C) (B,A) (C,B)
//! ```

use num_complex::Complex64;

use super::{is_step_down, BuildInput};
use crate::error::Result;
use crate::matrix::{CyclicShift, TwoPortMatrices};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

fn c(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// `a`, `d` and `A`, identical between the two solver forms.
fn ratio_matrices(m: &mut TwoPortMatrices, nt: f64, step_down: bool) {
    let inv = c(1.0 / nt);
    m.d.set_diagonal(inv);
    m.a_rev.set_diagonal(inv);

    if step_down {
        m.a.set_cyclic(CyclicShift::Leading, c(-nt * 2.0 / 3.0));
        m.a.set_cyclic(CyclicShift::Lagging, c(-nt / 3.0));
        m.d.set_cyclic(CyclicShift::Leading, -inv);
        m.a_rev.set_cyclic(CyclicShift::Lagging, -inv);
    } else {
        m.a.set_diagonal(c(nt * 2.0 / 3.0));
        m.a.set_cyclic(CyclicShift::Leading, c(nt / 3.0));
        m.d.set_cyclic(CyclicShift::Lagging, -inv);
        m.a_rev.set_cyclic(CyclicShift::Leading, -inv);
    }
}

pub(crate) fn forward_backward_sweep(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let step_down = is_step_down(input.params.turns_ratio);
    let nt = input.params.turns_ratio * SQRT_3;
    let zt = input.params.base_impedance;
    let mut m = TwoPortMatrices::zeros();

    ratio_matrices(&mut m, nt, step_down);

    if step_down {
        m.b.set_cyclic(CyclicShift::Leading, zt * (-nt * 2.0 / 3.0));
        m.b.set_cyclic(CyclicShift::Lagging, zt * (-nt / 3.0));
    } else {
        m.b.set_diagonal(zt * (nt * 2.0 / 3.0));
        m.b.set_cyclic(CyclicShift::Leading, zt * (nt / 3.0));
    }
    m.b_rev.set_diagonal(zt);

    Ok(m)
}

/// Admittance form: `b` holds the series admittance, `c` the voltage change
/// across the bank, and `B` the current change between the two sides.
pub(crate) fn gauss_seidel(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let step_down = is_step_down(input.params.turns_ratio);
    let alpha = input.params.turns_ratio * SQRT_3;
    let inv_alpha = c(1.0 / alpha);
    let mut m = TwoPortMatrices::zeros();

    ratio_matrices(&mut m, alpha, step_down);

    m.b.set_diagonal(input.params.admittance());
    m.c.set_diagonal(inv_alpha);
    m.b_rev.set_diagonal(inv_alpha);

    if step_down {
        m.c.set_cyclic(CyclicShift::Lagging, -inv_alpha);
        m.b_rev.set_cyclic(CyclicShift::Leading, -inv_alpha);
    } else {
        m.c.set_cyclic(CyclicShift::Leading, -inv_alpha);
        m.b_rev.set_cyclic(CyclicShift::Lagging, -inv_alpha);
    }

    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionType, TransformerConfiguration};
    use crate::per_unit::PerUnitParameters;
    use crate::topology::test_support::{close, configuration, real};
    use gat_core::PhaseSet;

    const LEAD: [(usize, usize); 3] = CyclicShift::Leading.positions();
    const LAG: [(usize, usize); 3] = CyclicShift::Lagging.positions();

    fn run(
        cfg: &TransformerConfiguration,
        phases: PhaseSet,
        build: fn(&BuildInput<'_>) -> Result<TwoPortMatrices>,
    ) -> (PerUnitParameters, TwoPortMatrices) {
        let params = PerUnitParameters::compute(cfg).unwrap();
        let m = build(&BuildInput {
            config: cfg,
            phases,
            params,
        })
        .unwrap();
        (params, m)
    }

    #[test]
    fn test_step_down_forward_sweep() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 7200.0, 120.0);
        let (params, m) = run(&cfg, PhaseSet::ABC, forward_backward_sweep);
        let nt = 60.0 * 3f64.sqrt();
        assert!((nt - 103.923_048_454_132_6).abs() < 1e-9);

        let zt = params.base_impedance;
        for pos in LEAD {
            assert!(close(m.a()[pos], real(-2.0 * nt / 3.0)));
            assert!(close(m.b()[pos], zt * (-2.0 * nt / 3.0)));
            assert!(close(m.d()[pos], real(-1.0 / nt)));
            assert_eq!(m.a_rev()[pos], real(0.0));
        }
        for pos in LAG {
            assert!(close(m.a()[pos], real(-nt / 3.0)));
            assert!(close(m.b()[pos], zt * (-nt / 3.0)));
            assert!(close(m.a_rev()[pos], real(-1.0 / nt)));
            assert_eq!(m.d()[pos], real(0.0));
        }
        for k in 0..3 {
            assert_eq!(m.a()[(k, k)], real(0.0));
            assert!(close(m.d()[(k, k)], real(1.0 / nt)));
            assert_eq!(m.b_rev()[(k, k)], zt);
        }
        assert!(m.c().is_zero());
    }

    #[test]
    fn test_step_up_forward_sweep() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 480.0, 4160.0);
        let (params, m) = run(&cfg, PhaseSet::ABC, forward_backward_sweep);
        let nt = params.turns_ratio * 3f64.sqrt();
        let zt = params.base_impedance;

        for k in 0..3 {
            assert!(close(m.a()[(k, k)], real(2.0 * nt / 3.0)));
            assert!(close(m.b()[(k, k)], zt * (2.0 * nt / 3.0)));
        }
        for pos in LEAD {
            assert!(close(m.a()[pos], real(nt / 3.0)));
            assert!(close(m.a_rev()[pos], real(-1.0 / nt)));
        }
        for pos in LAG {
            assert_eq!(m.a()[pos], real(0.0));
            assert!(close(m.d()[pos], real(-1.0 / nt)));
        }
    }

    #[test]
    fn test_gauss_seidel_step_down_transforms() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 7200.0, 120.0);
        let (params, m) = run(&cfg, PhaseSet::ABC, gauss_seidel);
        let alpha = 60.0 * 3f64.sqrt();

        for k in 0..3 {
            assert!(close(m.b()[(k, k)], params.admittance()));
            assert!(close(m.c()[(k, k)], real(1.0 / alpha)));
            assert!(close(m.b_rev()[(k, k)], real(1.0 / alpha)));
        }
        for pos in LAG {
            assert!(close(m.c()[pos], real(-1.0 / alpha)));
            assert_eq!(m.b_rev()[pos], real(0.0));
        }
        for pos in LEAD {
            assert!(close(m.b_rev()[pos], real(-1.0 / alpha)));
            assert!(close(m.a()[pos], real(-2.0 * alpha / 3.0)));
        }
        assert_eq!(m.b().structural_zeros(), 6);
    }

    #[test]
    fn test_gauss_seidel_step_up_transforms() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 480.0, 4160.0);
        let (params, m) = run(&cfg, PhaseSet::ABC, gauss_seidel);
        let alpha = params.turns_ratio * 3f64.sqrt();
        for pos in LEAD {
            assert!(close(m.c()[pos], real(-1.0 / alpha)));
        }
        for pos in LAG {
            assert!(close(m.b_rev()[pos], real(-1.0 / alpha)));
        }
    }

    #[test]
    fn test_unity_ratio_is_step_up_for_both_solvers() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 4160.0, 4160.0);
        let (_, fbs) = run(&cfg, PhaseSet::ABC, forward_backward_sweep);
        let (_, gs) = run(&cfg, PhaseSet::ABC, gauss_seidel);

        // Step-up puts a non-zero diagonal on `a`; step-down leaves it empty.
        assert_ne!(fbs.a()[(0, 0)], real(0.0));
        assert_eq!(fbs.a(), gs.a());
        assert_eq!(fbs.d(), gs.d());
        assert_eq!(fbs.a_rev(), gs.a_rev());
    }

    #[test]
    fn test_just_above_unity_is_step_down_for_both_solvers() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 4160.001, 4160.0);
        let (_, fbs) = run(&cfg, PhaseSet::ABC, forward_backward_sweep);
        let (_, gs) = run(&cfg, PhaseSet::ABC, gauss_seidel);

        assert_eq!(fbs.a()[(0, 0)], real(0.0));
        assert_eq!(fbs.a(), gs.a());
        assert_eq!(fbs.a_rev(), gs.a_rev());
    }

    #[test]
    fn test_independent_of_phases() {
        let cfg = configuration(ConnectionType::DeltaGroundedWye, 7200.0, 120.0);
        for build in [forward_backward_sweep, gauss_seidel] {
            let (_, all) = run(&cfg, PhaseSet::ABC, build);
            let (_, one) = run(&cfg, PhaseSet::A, build);
            assert_eq!(all, one);
        }
    }
}
