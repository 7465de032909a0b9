//! Error types for parameter validation, redshift checks and integration.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CosmoError {
    /// A parameter value violates its constraint, e.g. a negative density.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// A redshift lies outside the physical domain z >= -1.
    #[error("Invalid redshift z = {redshift}: {reason}")]
    Domain { redshift: f64, reason: String },

    /// Adaptive integration did not reach the requested tolerance.
    #[error(
        "Integration did not converge after {subdivisions} subdivisions: \
         estimate {estimate:e} with error bound {error_bound:e} (tolerance {tolerance:e})"
    )]
    Convergence {
        estimate: f64,
        error_bound: f64,
        tolerance: f64,
        subdivisions: usize,
    },

    #[error("Unable to read parameter file {path}: {message}")]
    ParameterFileRead { path: String, message: String },

    #[error("Failed parsing value {value} of parameter {name}: {message}")]
    ParameterParse {
        name: String,
        value: String,
        message: String,
    },

    #[error("Unknown parameter {name}")]
    UnknownParameter { name: String },
}

pub type CosmoResult<T> = Result<T, CosmoError>;

impl CosmoError {
    pub(crate) fn invalid_parameter<S: Into<String>>(name: &str, value: f64, reason: S) -> Self {
        CosmoError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.into(),
        }
    }

    pub(crate) fn domain<S: Into<String>>(redshift: f64, reason: S) -> Self {
        CosmoError::Domain {
            redshift,
            reason: reason.into(),
        }
    }

    /// Whether the error stems from a failed integration.
    pub fn is_convergence(&self) -> bool {
        matches!(self, CosmoError::Convergence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = CosmoError::invalid_parameter("omega_dark_matter", -0.1, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid parameter omega_dark_matter = -0.1: must be non-negative"
        );

        let err = CosmoError::domain(-2.0, "redshift must be >= -1");
        assert!(err.to_string().contains("z = -2"));
        assert!(!err.is_convergence());
    }
}
