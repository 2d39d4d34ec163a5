//! Error types for component operations.

use pf_core::error::{ErrorClass, VpError};
use thiserror::Error;

/// Errors that can occur while mutating or recomputing a component.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-numeric value for {what}: {value}")]
    NonNumeric { what: &'static str, value: f64 },

    #[error("Speed must be 0 or greater (got {speed})")]
    NegativeSpeed { speed: i64 },

    #[error("Valve position must be within 0..=100 (got {position})")]
    InvalidPosition { position: i64 },

    #[error("Gate valve '{name}' cannot be partially opened (requested {position}%)")]
    PartialGatePosition { name: String, position: i64 },

    #[error("Pump outlet pressure must be > 0")]
    MissingOutletPressure,

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ComponentError::Domain { .. } => ErrorClass::Domain,
            ComponentError::NotSupported { .. } => ErrorClass::Topology,
            _ => ErrorClass::Validation,
        }
    }
}

impl From<VpError> for ComponentError {
    fn from(e: VpError) -> Self {
        match e {
            VpError::NonFinite { what, value } => ComponentError::NonNumeric { what, value },
            VpError::InvalidArg { what } => ComponentError::InvalidArg { what },
            VpError::Domain { what } => ComponentError::Domain { what },
            VpError::IndexOob { what, .. } | VpError::Invariant { what } => {
                ComponentError::NotSupported { what }
            }
        }
    }
}

impl From<ComponentError> for VpError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonNumeric { what, value } => VpError::NonFinite { what, value },
            ComponentError::NegativeSpeed { .. } => VpError::InvalidArg {
                what: "negative pump speed",
            },
            ComponentError::InvalidPosition { .. } => VpError::InvalidArg {
                what: "valve position out of range",
            },
            ComponentError::PartialGatePosition { .. } => VpError::InvalidArg {
                what: "partial gate position",
            },
            ComponentError::MissingOutletPressure => VpError::InvalidArg {
                what: "missing pump outlet pressure",
            },
            ComponentError::InvalidArg { what } => VpError::InvalidArg { what },
            ComponentError::Domain { what } => VpError::Domain { what },
            ComponentError::NotSupported { what } => VpError::Invariant { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::PartialGatePosition {
            name: "gate1".into(),
            position: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("gate1"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn error_conversion() {
        let core: VpError = ComponentError::NegativeSpeed { speed: -1 }.into();
        assert!(matches!(core, VpError::InvalidArg { .. }));

        let comp: ComponentError = VpError::Domain { what: "cv" }.into();
        assert_eq!(comp.class(), ErrorClass::Domain);
    }
}
