//! Errors raised while initializing transformer two-port models.
//!
//! Every error is fatal to the single transformer being initialized. The
//! builders report a [`TransformerError`]; [`InitError`] attaches the object
//! identity so the host can report it and decide whether to abort the run or
//! skip the object.

use gat_core::{GatError, ObjectRef, Phase, PhaseSet};
use thiserror::Error;

use crate::config::ConnectionType;
use crate::settings::SolverMethod;

pub type Result<T> = std::result::Result<T, TransformerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformerError {
    #[error("no transformer configuration specified")]
    ConfigurationMissing,

    #[error("invalid transformer configuration: attached object is a {class}")]
    ConfigurationInvalidType { class: String },

    #[error("{method} solution method is not supported for {connection} transformers")]
    UnsupportedSolverMethod {
        method: SolverMethod,
        connection: ConnectionType,
    },

    #[error("{reason} is not supported for {connection} transformers (phases {phases})")]
    UnsupportedTopologyCombination {
        connection: ConnectionType,
        phases: PhaseSet,
        reason: &'static str,
    },

    #[error("unknown transformer connect type {code}")]
    UnknownConnectionType { code: i64 },

    #[error("trying to attach to phase {phase} not defined in the configuration ({field} is zero)")]
    ZeroRating { phase: Phase, field: &'static str },

    #[error("invalid transformer configuration field {field}: {reason}")]
    ConfigurationInvalid { field: &'static str, reason: String },
}

impl TransformerError {
    /// Configuration property the error points at, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TransformerError::ConfigurationMissing
            | TransformerError::ConfigurationInvalidType { .. } => Some("configuration"),
            TransformerError::UnknownConnectionType { .. } => Some("connect_type"),
            TransformerError::ZeroRating { field, .. }
            | TransformerError::ConfigurationInvalid { field, .. } => Some(*field),
            TransformerError::UnsupportedSolverMethod { .. }
            | TransformerError::UnsupportedTopologyCombination { .. } => None,
        }
    }
}

/// A [`TransformerError`] tagged with the transformer it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{object}: {source}")]
pub struct InitError {
    pub object: ObjectRef,
    #[source]
    pub source: TransformerError,
}

impl InitError {
    pub fn new(object: ObjectRef, source: TransformerError) -> Self {
        Self { object, source }
    }

    pub fn kind(&self) -> &TransformerError {
        &self.source
    }
}

impl From<InitError> for GatError {
    fn from(err: InitError) -> Self {
        let message = err.to_string();
        match err.source {
            TransformerError::UnsupportedSolverMethod { .. } => GatError::Solver(message),
            TransformerError::UnsupportedTopologyCombination { .. }
            | TransformerError::UnknownConnectionType { .. } => GatError::Model(message),
            TransformerError::ConfigurationMissing
            | TransformerError::ConfigurationInvalidType { .. }
            | TransformerError::ZeroRating { .. }
            | TransformerError::ConfigurationInvalid { .. } => GatError::Config(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gat_core::ObjectId;

    fn object() -> ObjectRef {
        ObjectRef::new(ObjectId::new(12), "xfmr_12", "transformer")
    }

    #[test]
    fn test_init_error_display_carries_object() {
        let err = InitError::new(object(), TransformerError::ConfigurationMissing);
        assert_eq!(
            err.to_string(),
            "xfmr_12 (transformer:12): no transformer configuration specified"
        );
    }

    #[test]
    fn test_zero_rating_message_names_phase_and_field() {
        let err = TransformerError::ZeroRating {
            phase: Phase::B,
            field: "powerB_rating",
        };
        let text = err.to_string();
        assert!(text.contains("phase B"));
        assert!(text.contains("powerB_rating"));
        assert_eq!(err.field(), Some("powerB_rating"));
    }

    #[test]
    fn test_gat_error_mapping() {
        let solver = InitError::new(
            object(),
            TransformerError::UnsupportedSolverMethod {
                method: SolverMethod::NewtonRaphson,
                connection: ConnectionType::WyeWye,
            },
        );
        assert!(matches!(GatError::from(solver), GatError::Solver(_)));

        let config = InitError::new(
            object(),
            TransformerError::ConfigurationInvalid {
                field: "power_rating",
                reason: "must be non-zero".into(),
            },
        );
        let gat: GatError = config.into();
        assert!(matches!(gat, GatError::Config(ref m) if m.contains("power_rating")));
    }
}
