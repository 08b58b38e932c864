//! Delta–delta units. The matrices do not depend on the active phases.

use num_complex::Complex64;

use super::BuildInput;
use crate::error::Result;
use crate::matrix::TwoPortMatrices;

fn common(input: &BuildInput<'_>) -> TwoPortMatrices {
    let nt = input.params.turns_ratio;
    let zt = input.params.base_impedance;
    let mut m = TwoPortMatrices::zeros();

    m.a.set_diagonal(Complex64::new(nt * 2.0 / 3.0, 0.0));
    m.a.set_off_diagonal(Complex64::new(-nt / 3.0, 0.0));

    m.d.set_diagonal(Complex64::new(1.0 / nt, 0.0));

    m.a_rev.set_diagonal(Complex64::new(2.0 / (nt * 3.0), 0.0));
    m.a_rev.set_off_diagonal(Complex64::new(-1.0 / (nt * 3.0), 0.0));

    m.b_rev.set(0, 0, zt);
    m.b_rev.set(1, 1, zt);
    m.b_rev.set(2, 0, -zt);
    m.b_rev.set(2, 1, -zt);
    m
}

pub(crate) fn forward_backward_sweep(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let mut m = common(input);
    let ztn = input.params.base_impedance * input.params.turns_ratio;
    m.b.set(0, 0, ztn);
    m.b.set(1, 1, ztn);
    m.b.set(2, 0, -ztn);
    m.b.set(2, 1, -ztn);
    Ok(m)
}

pub(crate) fn gauss_seidel(input: &BuildInput<'_>) -> Result<TwoPortMatrices> {
    let mut m = common(input);
    m.b.set_diagonal(input.params.admittance());
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionType;
    use crate::per_unit::PerUnitParameters;
    use crate::topology::test_support::{close, configuration, real};
    use gat_core::PhaseSet;

    fn input_for(phases: PhaseSet) -> (crate::config::TransformerConfiguration, PhaseSet) {
        (configuration(ConnectionType::DeltaDelta, 12470.0, 4160.0), phases)
    }

    #[test]
    fn test_forward_sweep_entries() {
        let (cfg, phases) = input_for(PhaseSet::ABC);
        let params = PerUnitParameters::compute(&cfg).unwrap();
        let m = forward_backward_sweep(&BuildInput {
            config: &cfg,
            phases,
            params,
        })
        .unwrap();

        let nt = params.turns_ratio;
        let zt = params.base_impedance;
        assert!(close(m.a()[(0, 0)], real(2.0 * nt / 3.0)));
        assert!(close(m.a()[(1, 2)], real(-nt / 3.0)));
        assert!(close(m.b()[(0, 0)], zt * nt));
        assert!(close(m.b()[(2, 1)], -zt * nt));
        assert_eq!(m.b()[(2, 2)], real(0.0));
        assert!(close(m.a_rev()[(2, 2)], real(2.0 / (3.0 * nt))));
        assert!(close(m.a_rev()[(0, 1)], real(-1.0 / (3.0 * nt))));
        assert_eq!(m.b_rev()[(2, 0)], -zt);
        assert!(m.d()[(0, 1)] == real(0.0));
    }

    #[test]
    fn test_independent_of_phases() {
        let (cfg, _) = input_for(PhaseSet::ABC);
        let params = PerUnitParameters::compute(&cfg).unwrap();
        for build in [forward_backward_sweep, gauss_seidel] {
            let all = build(&BuildInput {
                config: &cfg,
                phases: PhaseSet::ABC,
                params,
            })
            .unwrap();
            let one = build(&BuildInput {
                config: &cfg,
                phases: PhaseSet::B,
                params,
            })
            .unwrap();
            assert_eq!(all, one);
        }
    }

    #[test]
    fn test_solver_forms_share_all_but_b() {
        let (cfg, phases) = input_for(PhaseSet::ABC);
        let params = PerUnitParameters::compute(&cfg).unwrap();
        let input = BuildInput {
            config: &cfg,
            phases,
            params,
        };
        let fbs = forward_backward_sweep(&input).unwrap();
        let gs = gauss_seidel(&input).unwrap();

        assert_eq!(fbs.a(), gs.a());
        assert_eq!(fbs.c(), gs.c());
        assert_eq!(fbs.d(), gs.d());
        assert_eq!(fbs.a_rev(), gs.a_rev());
        assert_eq!(fbs.b_rev(), gs.b_rev());
        assert_ne!(fbs.b(), gs.b());
    }

    #[test]
    fn test_gauss_seidel_admittance_diagonal() {
        let (cfg, phases) = input_for(PhaseSet::ABC);
        let params = PerUnitParameters::compute(&cfg).unwrap();
        let m = gauss_seidel(&BuildInput {
            config: &cfg,
            phases,
            params,
        })
        .unwrap();
        for k in 0..3 {
            assert!(close(m.b()[(k, k)], params.admittance()));
        }
        assert_eq!(m.b().structural_zeros(), 6);
        assert_eq!(m.b_rev()[(1, 1)], params.base_impedance);
    }
}
