use thiserror::Error;

use crate::version::Version;

/// Errors raised while configuring a rational activation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RationalError {
    /// The version tag did not name one of the supported formula variants.
    #[error("unknown version '{0}', expected one of A, B, C or D")]
    UnknownVersion(String),
    /// No tuned initialisation exists for the requested combination.
    #[error(
        "no tuned coefficients for '{approx_func}' with version {version} and degrees ({}, {})",
        degrees.0,
        degrees.1
    )]
    MissingCoefficients { approx_func: String, version: Version, degrees: (usize, usize) },
}
