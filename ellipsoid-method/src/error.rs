use thiserror::Error;

/// Errors surfaced by the public API.
///
/// `CutStatus` is ordinary control flow returned from `SearchSpace::update`
/// and is never wrapped here; `Error` is reserved for misuse (bad
/// construction parameters, out-of-sequence calls) and for oracle output
/// that cannot be classified at all (non-finite `g`/`β`).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("dimension must be at least 1, got {n}")]
    InvalidDimension { n: usize },

    #[error("non-finite value encountered in {context}")]
    NonFiniteInput { context: &'static str },

    #[error("witness() called before a failed factorization")]
    WitnessBeforeFailure,

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

impl From<ellipsoid_kernel::KernelError> for Error {
    fn from(e: ellipsoid_kernel::KernelError) -> Self {
        match e {
            ellipsoid_kernel::KernelError::WitnessBeforeFailure => Error::WitnessBeforeFailure,
        }
    }
}
