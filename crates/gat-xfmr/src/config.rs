//! Transformer configuration objects.
//!
//! A configuration describes a transformer design (winding connection,
//! ratings, per-unit impedance) and is shared by every transformer built to
//! that design. It is immutable once loaded.
//!
//! Property names follow the feeder-model conventions:
//!
//! ```toml
//! name = "xfmr_25kva_ct"
//! connect_type = "SINGLE_PHASE_CENTER_TAPPED"   # or the code, 5
//! primary_voltage = 7200.0
//! secondary_voltage = 120.0
//! power_rating = 25.0
//! powerA_rating = 25.0
//! impedance = [0.006, 0.0136]
//! ```

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use gat_core::units::{KilovoltAmperes, Volts};
use gat_core::{Diagnostics, GatResult, Phase};
use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Winding connection topology.
///
/// Discriminants match the configuration codes (`connect_type = 3` is
/// delta–grounded-wye). Codes with no topology are kept as `Unknown` so that
/// initialization, not loading, rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    WyeWye,
    DeltaDelta,
    DeltaGroundedWye,
    SinglePhase,
    SinglePhaseCenterTapped,
    Unknown(i64),
}

impl ConnectionType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ConnectionType::WyeWye,
            2 => ConnectionType::DeltaDelta,
            3 => ConnectionType::DeltaGroundedWye,
            4 => ConnectionType::SinglePhase,
            5 => ConnectionType::SinglePhaseCenterTapped,
            other => ConnectionType::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ConnectionType::WyeWye => 1,
            ConnectionType::DeltaDelta => 2,
            ConnectionType::DeltaGroundedWye => 3,
            ConnectionType::SinglePhase => 4,
            ConnectionType::SinglePhaseCenterTapped => 5,
            ConnectionType::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::WyeWye => "WYE_WYE",
            ConnectionType::DeltaDelta => "DELTA_DELTA",
            ConnectionType::DeltaGroundedWye => "DELTA_GWYE",
            ConnectionType::SinglePhase => "SINGLE_PHASE",
            ConnectionType::SinglePhaseCenterTapped => "SINGLE_PHASE_CENTER_TAPPED",
            ConnectionType::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ConnectionType::Unknown(_))
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::Unknown(code) => write!(f, "UNKNOWN({})", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "WYE_WYE" => Ok(ConnectionType::WyeWye),
            "DELTA_DELTA" => Ok(ConnectionType::DeltaDelta),
            "DELTA_GWYE" | "DELTA_GROUNDED_WYE" => Ok(ConnectionType::DeltaGroundedWye),
            "SINGLE_PHASE" => Ok(ConnectionType::SinglePhase),
            "SINGLE_PHASE_CENTER_TAPPED" | "CENTER_TAPPED" => {
                Ok(ConnectionType::SinglePhaseCenterTapped)
            }
            _ => Err(format!("unknown connect_type '{}'", input)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConnectionTypeRepr {
    Code(i64),
    Name(String),
}

impl Serialize for ConnectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConnectionType::Unknown(code) => serializer.serialize_i64(*code),
            known => serializer.serialize_str(known.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for ConnectionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ConnectionTypeRepr::deserialize(deserializer)? {
            ConnectionTypeRepr::Code(code) => Ok(ConnectionType::from_code(code)),
            ConnectionTypeRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Immutable transformer design shared by every transformer built to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfiguration {
    #[serde(default)]
    pub name: String,
    pub connect_type: ConnectionType,
    /// Rated primary voltage (line-to-line for delta primaries)
    pub primary_voltage: Volts,
    pub secondary_voltage: Volts,
    /// Series impedance in per-unit of the transformer's own base, `[re, im]`
    pub impedance: Complex64,
    /// Total kVA rating
    #[serde(alias = "kVA_rating")]
    pub power_rating: KilovoltAmperes,
    #[serde(rename = "powerA_rating", default)]
    pub power_a_rating: KilovoltAmperes,
    #[serde(rename = "powerB_rating", default)]
    pub power_b_rating: KilovoltAmperes,
    #[serde(rename = "powerC_rating", default)]
    pub power_c_rating: KilovoltAmperes,
}

impl TransformerConfiguration {
    pub fn new(
        connect_type: ConnectionType,
        primary_voltage: Volts,
        secondary_voltage: Volts,
        impedance: Complex64,
        power_rating: KilovoltAmperes,
    ) -> Self {
        Self {
            name: String::new(),
            connect_type,
            primary_voltage,
            secondary_voltage,
            impedance,
            power_rating,
            power_a_rating: KilovoltAmperes(0.0),
            power_b_rating: KilovoltAmperes(0.0),
            power_c_rating: KilovoltAmperes(0.0),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set per-phase kVA ratings (used by center-tapped designs).
    pub fn with_phase_ratings(mut self, a: f64, b: f64, c: f64) -> Self {
        self.power_a_rating = KilovoltAmperes(a);
        self.power_b_rating = KilovoltAmperes(b);
        self.power_c_rating = KilovoltAmperes(c);
        self
    }

    pub fn phase_rating(&self, phase: Phase) -> KilovoltAmperes {
        match phase {
            Phase::A => self.power_a_rating,
            Phase::B => self.power_b_rating,
            Phase::C => self.power_c_rating,
        }
    }

    /// Property name of a phase's rating, for error context.
    pub fn phase_rating_field(phase: Phase) -> &'static str {
        match phase {
            Phase::A => "powerA_rating",
            Phase::B => "powerB_rating",
            Phase::C => "powerC_rating",
        }
    }

    fn entity(&self) -> String {
        if self.name.is_empty() {
            "transformer_configuration".to_string()
        } else {
            format!("transformer_configuration:{}", self.name)
        }
    }

    /// Validate the design for issues that make the two-port model
    /// meaningless or suspicious.
    pub fn validate_into(&self, diag: &mut Diagnostics) {
        let entity = self.entity();

        if !self.connect_type.is_known() {
            diag.add_error_with_entity(
                "connection",
                &format!("connect_type code {} has no topology", self.connect_type.code()),
                &entity,
            );
        }

        if self.primary_voltage.is_zero() || !self.primary_voltage.is_finite() {
            diag.add_error_with_entity("voltage", "primary_voltage must be non-zero", &entity);
        }
        if self.secondary_voltage.is_zero() || !self.secondary_voltage.is_finite() {
            diag.add_error_with_entity("voltage", "secondary_voltage must be non-zero", &entity);
        }

        if self.power_rating.is_zero() {
            diag.add_error_with_entity("rating", "power_rating is zero", &entity);
        }

        if self.connect_type == ConnectionType::SinglePhase
            && self.secondary_voltage > self.primary_voltage
        {
            diag.add_warning_with_entity(
                "voltage",
                &format!(
                    "secondary_voltage ({}) above primary_voltage ({}) on a single-phase unit",
                    self.secondary_voltage, self.primary_voltage
                ),
                &entity,
            );
        }

        if self.impedance.re == 0.0 && self.impedance.im == 0.0 {
            diag.add_warning_with_entity(
                "impedance",
                "per-unit impedance is zero; admittance-form matrices will not be finite",
                &entity,
            );
        } else if self.impedance.re == 0.0
            && self.connect_type == ConnectionType::SinglePhaseCenterTapped
        {
            diag.add_warning_with_entity(
                "impedance",
                "center-tapped core branch needs a non-zero resistance",
                &entity,
            );
        }

        if self.connect_type == ConnectionType::SinglePhaseCenterTapped {
            let defined = Phase::ALL
                .iter()
                .filter(|p| !self.phase_rating(**p).is_zero())
                .count();
            if defined == 0 {
                diag.add_warning_with_entity(
                    "rating",
                    "center-tapped configuration defines no per-phase rating",
                    &entity,
                );
            }
            let phase_total: KilovoltAmperes =
                Phase::ALL.iter().map(|p| self.phase_rating(*p)).sum();
            if defined > 0 && phase_total > self.power_rating {
                diag.add_warning_with_entity(
                    "rating",
                    &format!(
                        "per-phase ratings ({}) exceed power_rating ({})",
                        phase_total, self.power_rating
                    ),
                    &entity,
                );
            }
        }
    }

    pub fn from_toml_str(input: &str) -> GatResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading transformer configuration '{}'", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("parsing transformer configuration '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wye_25kva() -> TransformerConfiguration {
        TransformerConfiguration::new(
            ConnectionType::WyeWye,
            Volts(7200.0),
            Volts(120.0),
            Complex64::new(0.01, 0.04),
            KilovoltAmperes(25.0),
        )
    }

    #[test]
    fn test_connection_codes_roundtrip() {
        for code in 1..=5i64 {
            let ct = ConnectionType::from_code(code);
            assert!(ct.is_known());
            assert_eq!(ct.code(), code);
        }
        assert_eq!(ConnectionType::from_code(0), ConnectionType::Unknown(0));
        assert_eq!(ConnectionType::from_code(9).code(), 9);
        assert_eq!(ConnectionType::from_code(300), ConnectionType::Unknown(300));
        assert_eq!(ConnectionType::from_code(-1).to_string(), "UNKNOWN(-1)");
    }

    #[test]
    fn test_connection_names() {
        assert_eq!(
            "delta-gwye".parse::<ConnectionType>().unwrap(),
            ConnectionType::DeltaGroundedWye
        );
        assert_eq!(
            "single_phase_center_tapped".parse::<ConnectionType>().unwrap(),
            ConnectionType::SinglePhaseCenterTapped
        );
        assert!("zigzag".parse::<ConnectionType>().is_err());
    }

    #[test]
    fn test_toml_with_names_and_codes() {
        let by_name = TransformerConfiguration::from_toml_str(
            r#"
            name = "cfg_dd"
            connect_type = "DELTA_DELTA"
            primary_voltage = 12470.0
            secondary_voltage = 4160.0
            power_rating = 500.0
            impedance = [0.01, 0.06]
            "#,
        )
        .unwrap();
        assert_eq!(by_name.connect_type, ConnectionType::DeltaDelta);
        assert_eq!(by_name.impedance, Complex64::new(0.01, 0.06));
        assert!(by_name.power_a_rating.is_zero());

        let by_code = TransformerConfiguration::from_toml_str(
            r#"
            connect_type = 7
            primary_voltage = 12470.0
            secondary_voltage = 4160.0
            kVA_rating = 500.0
            impedance = [0.01, 0.06]
            "#,
        )
        .unwrap();
        assert_eq!(by_code.connect_type, ConnectionType::Unknown(7));
        assert_eq!(by_code.power_rating, KilovoltAmperes(500.0));
    }

    #[test]
    fn test_toml_per_phase_ratings() {
        let cfg = TransformerConfiguration::from_toml_str(
            r#"
            connect_type = 5
            primary_voltage = 7200.0
            secondary_voltage = 120.0
            power_rating = 50.0
            powerB_rating = 50.0
            impedance = [0.006, 0.0136]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.phase_rating(Phase::B), KilovoltAmperes(50.0));
        assert!(cfg.phase_rating(Phase::A).is_zero());
    }

    #[test]
    fn test_valid_configuration_has_no_issues() {
        let mut diag = Diagnostics::new();
        wye_25kva().validate_into(&mut diag);
        assert!(!diag.has_issues(), "{}", diag);
    }

    #[test]
    fn test_validation_flags_zero_rating_and_voltage() {
        let mut cfg = wye_25kva().with_name("bad");
        cfg.power_rating = KilovoltAmperes(0.0);
        cfg.secondary_voltage = Volts(0.0);

        let mut diag = Diagnostics::new();
        cfg.validate_into(&mut diag);
        assert_eq!(diag.error_count(), 2);
        assert!(diag
            .errors()
            .all(|i| i.entity.as_deref() == Some("transformer_configuration:bad")));
    }

    #[test]
    fn test_validation_warns_on_center_tap_without_phase_rating() {
        let mut cfg = wye_25kva();
        cfg.connect_type = ConnectionType::SinglePhaseCenterTapped;

        let mut diag = Diagnostics::new();
        cfg.validate_into(&mut diag);
        assert_eq!(diag.warning_count(), 1);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validation_warns_on_single_phase_step_up() {
        let mut cfg = wye_25kva();
        cfg.connect_type = ConnectionType::SinglePhase;
        cfg.primary_voltage = Volts(120.0);
        cfg.secondary_voltage = Volts(7200.0);

        let mut diag = Diagnostics::new();
        cfg.validate_into(&mut diag);
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(diag.issues_by_category("voltage").count(), 1);
    }

    #[test]
    fn test_serialize_roundtrip_through_json() {
        let cfg = wye_25kva().with_phase_ratings(10.0, 10.0, 5.0);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"connect_type\":\"WYE_WYE\""));
        assert!(json.contains("\"powerC_rating\":5.0"));
        let back: TransformerConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
