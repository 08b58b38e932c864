//! Simulation-wide power-flow settings that affect link models.
//!
//! The solver formulation is a global choice: every transformer in a run is
//! initialized for the same method. Settings load from TOML with partial
//! files falling back to defaults:
//!
//! ```toml
//! solver_method = "GS"
//! show_matrix_values = true
//! ```

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use gat_core::GatResult;
use serde::{Deserialize, Serialize};

/// Numerical method of the surrounding power-flow solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Forward-backward sweep: impedance-form two-port parameters
    #[default]
    #[serde(rename = "FBS", alias = "fbs", alias = "FORWARD_BACKWARD_SWEEP")]
    ForwardBackwardSweep,
    /// Gauss-Seidel: admittance-form parameters
    #[serde(rename = "GS", alias = "gs", alias = "GAUSS_SEIDEL")]
    GaussSeidel,
    /// Newton-Raphson: recognized, but no transformer formulation exists
    #[serde(rename = "NR", alias = "nr", alias = "NEWTON_RAPHSON")]
    NewtonRaphson,
}

impl SolverMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverMethod::ForwardBackwardSweep => "FBS",
            SolverMethod::GaussSeidel => "GS",
            SolverMethod::NewtonRaphson => "NR",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            SolverMethod::ForwardBackwardSweep => "forward-backward sweep",
            SolverMethod::GaussSeidel => "Gauss-Seidel",
            SolverMethod::NewtonRaphson => "Newton-Raphson",
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["FBS", "GS", "NR"]
    }
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.long_name())
    }
}

impl FromStr for SolverMethod {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().replace('-', "_").as_str() {
            "fbs" | "forward_backward_sweep" => Ok(SolverMethod::ForwardBackwardSweep),
            "gs" | "gauss_seidel" => Ok(SolverMethod::GaussSeidel),
            "nr" | "newton_raphson" => Ok(SolverMethod::NewtonRaphson),
            other => Err(format!(
                "unknown solver method '{}'; supported values: {}",
                other,
                SolverMethod::available().join(", ")
            )),
        }
    }
}

/// Power-flow settings consumed during link initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerflowSettings {
    pub solver_method: SolverMethod,

    /// Dump every initialized transformer's matrices at `info` level
    /// (they are always emitted at `debug`).
    pub show_matrix_values: bool,
}

impl Default for PowerflowSettings {
    fn default() -> Self {
        Self {
            solver_method: SolverMethod::ForwardBackwardSweep,
            show_matrix_values: false,
        }
    }
}

impl PowerflowSettings {
    pub fn new(solver_method: SolverMethod) -> Self {
        Self {
            solver_method,
            ..Self::default()
        }
    }

    pub fn with_matrix_dump(mut self, enabled: bool) -> Self {
        self.show_matrix_values = enabled;
        self
    }

    pub fn from_toml_str(input: &str) -> GatResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading powerflow settings '{}'", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("parsing powerflow settings '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_method_parsing_supports_all_methods() {
        assert_eq!(
            "fbs".parse::<SolverMethod>().unwrap(),
            SolverMethod::ForwardBackwardSweep
        );
        assert_eq!(
            "Gauss-Seidel".parse::<SolverMethod>().unwrap(),
            SolverMethod::GaussSeidel
        );
        assert_eq!(
            "NR".parse::<SolverMethod>().unwrap(),
            SolverMethod::NewtonRaphson
        );
        assert!("jacobi".parse::<SolverMethod>().is_err());
    }

    #[test]
    fn test_settings_default_to_forward_backward_sweep() {
        let settings = PowerflowSettings::from_toml_str("").unwrap();
        assert_eq!(settings.solver_method, SolverMethod::ForwardBackwardSweep);
        assert!(!settings.show_matrix_values);
    }

    #[test]
    fn test_settings_accept_short_and_long_method_names() {
        let gs = PowerflowSettings::from_toml_str("solver_method = \"GS\"").unwrap();
        assert_eq!(gs.solver_method, SolverMethod::GaussSeidel);

        let nr = PowerflowSettings::from_toml_str("solver_method = \"NEWTON_RAPHSON\"").unwrap();
        assert_eq!(nr.solver_method, SolverMethod::NewtonRaphson);
    }

    #[test]
    fn test_settings_reject_unknown_method() {
        assert!(PowerflowSettings::from_toml_str("solver_method = \"LU\"").is_err());
    }

    #[test]
    fn test_settings_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerflow.toml");
        std::fs::write(&path, "solver_method = \"GS\"\nshow_matrix_values = true\n").unwrap();

        let settings = PowerflowSettings::load(&path).unwrap();
        assert_eq!(settings.solver_method, SolverMethod::GaussSeidel);
        assert!(settings.show_matrix_values);
    }
}
