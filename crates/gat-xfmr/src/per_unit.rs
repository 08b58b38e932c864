//! Per-unit parameters shared by every topology builder.
//!
//! ```text
//! n_t    = V_pri / V_sec
//! Z_base = z_pu · V_sec² / (S_kVA · 1000)
//! ```
//!
//! `Z_base` here is already the series impedance in ohms referred to the
//! secondary (`z_pu` times the secondary base impedance).

use gat_core::units::base_impedance_ohms;
use num_complex::Complex64;

use crate::config::TransformerConfiguration;
use crate::error::{Result, TransformerError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerUnitParameters {
    /// Primary-to-secondary voltage ratio
    pub turns_ratio: f64,
    /// Series impedance in ohms, secondary-referred
    pub base_impedance: Complex64,
}

impl PerUnitParameters {
    /// Derive the turns ratio and impedance from a configuration.
    ///
    /// Zero or non-finite voltages and ratings are rejected with the
    /// offending property named.
    pub fn compute(config: &TransformerConfiguration) -> Result<Self> {
        require_usable("primary_voltage", config.primary_voltage.value())?;
        require_usable("secondary_voltage", config.secondary_voltage.value())?;
        require_usable("power_rating", config.power_rating.value())?;

        let turns_ratio = config.primary_voltage / config.secondary_voltage;
        let base_impedance =
            config.impedance * base_impedance_ohms(config.secondary_voltage, config.power_rating);

        Ok(Self {
            turns_ratio,
            base_impedance,
        })
    }

    /// Series admittance `1 / Z_base`, the Gauss-Seidel form of `b`.
    pub fn admittance(&self) -> Complex64 {
        self.base_impedance.inv()
    }
}

fn require_usable(field: &'static str, value: f64) -> Result<()> {
    let reason = if value == 0.0 {
        "must be non-zero"
    } else if !value.is_finite() {
        "must be finite"
    } else {
        return Ok(());
    };
    Err(TransformerError::ConfigurationInvalid {
        field,
        reason: format!("{} (got {})", reason, value),
    })
}
