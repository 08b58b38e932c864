//! Transformer link objects and their one-shot initialization.
//!
//! A [`TransformerBuilder`] collects identity, attached phases and the
//! configuration reference; [`TransformerBuilder::init`] validates, computes
//! the two-port matrices and returns a read-only [`Transformer`]. There is no
//! half-initialized state and no way to mutate matrices afterwards.

use std::sync::Arc;

use gat_core::{Diagnostics, ObjectId, ObjectRef, PhaseSet};
use tracing::{debug, info, warn};

use crate::config::{ConnectionType, TransformerConfiguration};
use crate::error::{InitError, TransformerError};
use crate::matrix::TwoPortMatrices;
use crate::per_unit::PerUnitParameters;
use crate::settings::{PowerflowSettings, SolverMethod};
use crate::topology::{build_two_port, SpecialLink};

pub const OBJECT_CLASS: &str = "transformer";
pub const CONFIGURATION_CLASS: &str = "transformer_configuration";

/// Whatever object the `configuration` property points at.
///
/// Host models can reference any object there; only a transformer
/// configuration is accepted at init.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationObject {
    Transformer(Arc<TransformerConfiguration>),
    Other { class: String },
}

impl ConfigurationObject {
    pub fn other(class: impl Into<String>) -> Self {
        ConfigurationObject::Other {
            class: class.into(),
        }
    }

    pub fn class(&self) -> &str {
        match self {
            ConfigurationObject::Transformer(_) => CONFIGURATION_CLASS,
            ConfigurationObject::Other { class } => class,
        }
    }
}

impl From<TransformerConfiguration> for ConfigurationObject {
    fn from(config: TransformerConfiguration) -> Self {
        ConfigurationObject::Transformer(Arc::new(config))
    }
}

impl From<Arc<TransformerConfiguration>> for ConfigurationObject {
    fn from(config: Arc<TransformerConfiguration>) -> Self {
        ConfigurationObject::Transformer(config)
    }
}

/// Seam between a link model and the network solver.
///
/// The solver only reads matrices and phase metadata; it never needs to know
/// what kind of equipment produced them.
pub trait TwoPortLink {
    fn matrices(&self) -> &TwoPortMatrices;
    fn phases(&self) -> PhaseSet;
    fn special_link(&self) -> SpecialLink;
    /// Primary-to-secondary voltage ratio
    fn voltage_ratio(&self) -> f64;
}

/// Pre-init transformer description.
#[derive(Debug, Clone)]
pub struct TransformerBuilder {
    object: ObjectRef,
    phases: PhaseSet,
    configuration: Option<ConfigurationObject>,
}

impl TransformerBuilder {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            object: ObjectRef::new(id, name, OBJECT_CLASS),
            phases: PhaseSet::EMPTY,
            configuration: None,
        }
    }

    pub fn phases(mut self, phases: PhaseSet) -> Self {
        self.phases = phases;
        self
    }

    pub fn configuration(mut self, configuration: impl Into<ConfigurationObject>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    /// Compute the two-port matrices under the run's solver settings.
    pub fn init(self, settings: &PowerflowSettings) -> Result<Transformer, InitError> {
        let object = self.object;
        let fail = |source: TransformerError| InitError::new(object.clone(), source);

        let config = match self.configuration {
            None => return Err(fail(TransformerError::ConfigurationMissing)),
            Some(ConfigurationObject::Other { class }) => {
                return Err(fail(TransformerError::ConfigurationInvalidType { class }))
            }
            Some(ConfigurationObject::Transformer(config)) => config,
        };

        let mut diag = Diagnostics::new();
        config.validate_into(&mut diag);
        for issue in diag.warnings() {
            warn!("{}: {}", object, issue.message);
        }
        if diag.has_errors() {
            debug!("{}: configuration rejected\n{}", object, diag);
        }

        let method = settings.solver_method;
        let (parameters, matrices) =
            build_two_port(&config, self.phases, method).map_err(fail)?;

        info!(
            "{}: initialized {} transformer on phases {} for {}",
            object, config.connect_type, self.phases, method
        );
        if settings.show_matrix_values {
            info!("{}: two-port matrices\n{}", object, matrices);
        } else {
            debug!("{}: two-port matrices\n{}", object, matrices);
        }

        Ok(Transformer {
            special_link: SpecialLink::for_connection(config.connect_type),
            object,
            phases: self.phases,
            solver_method: method,
            configuration: config,
            parameters,
            matrices,
        })
    }
}

/// An initialized transformer link.
#[derive(Debug, Clone)]
pub struct Transformer {
    object: ObjectRef,
    phases: PhaseSet,
    solver_method: SolverMethod,
    configuration: Arc<TransformerConfiguration>,
    parameters: PerUnitParameters,
    special_link: SpecialLink,
    matrices: TwoPortMatrices,
}

impl Transformer {
    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    pub fn solver_method(&self) -> SolverMethod {
        self.solver_method
    }

    pub fn configuration(&self) -> &TransformerConfiguration {
        &self.configuration
    }

    pub fn connection(&self) -> ConnectionType {
        self.configuration.connect_type
    }

    pub fn parameters(&self) -> &PerUnitParameters {
        &self.parameters
    }
}

impl TwoPortLink for Transformer {
    fn matrices(&self) -> &TwoPortMatrices {
        &self.matrices
    }

    fn phases(&self) -> PhaseSet {
        self.phases
    }

    fn special_link(&self) -> SpecialLink {
        self.special_link
    }

    fn voltage_ratio(&self) -> f64 {
        self.parameters.turns_ratio
    }
}
