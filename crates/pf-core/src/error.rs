use thiserror::Error;

pub type VpResult<T> = Result<T, VpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

/// Coarse error taxonomy shared by every layer.
///
/// Validation errors reject caller input before anything is mutated. Domain
/// errors point at a simulation-setup mistake (a zero flow coefficient, a
/// non-positive pressure drop). Topology errors come from wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Domain,
    Topology,
}

impl VpError {
    pub fn class(&self) -> ErrorClass {
        match self {
            VpError::NonFinite { .. } | VpError::InvalidArg { .. } => ErrorClass::Validation,
            VpError::Domain { .. } => ErrorClass::Domain,
            VpError::IndexOob { .. } | VpError::Invariant { .. } => ErrorClass::Topology,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        let e = VpError::NonFinite {
            what: "level",
            value: f64::NAN,
        };
        assert_eq!(e.class(), ErrorClass::Validation);
        assert_eq!(
            VpError::Domain { what: "cv" }.class(),
            ErrorClass::Domain
        );
        assert!(VpError::Domain { what: "cv" }.to_string().contains("cv"));
    }
}
