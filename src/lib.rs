/// Contains the embedded table of tuned initial coefficients.
pub mod coeffs;
/// Contains the library error type.
pub mod error;
/// Contains the `Layer` trait and the `ExecutionContext` threaded
/// through forward and backward passes.
pub mod layer;
/// Contains the colour-coded console logger.
pub mod logger;
/// Contains the `Optimiser` trait and the provided Adam variants.
pub mod optimiser;
/// Contains the rational activation layer itself.
pub mod rational;
/// Contains random sampling helpers.
pub mod rng;
/// Contains the dense matrix and tensor storage types.
pub mod tensor;
/// Contains the denominator formula variants.
pub mod version;

pub use error::RationalError;
pub use rational::{Rational, RationalConfig};
pub use version::Version;
